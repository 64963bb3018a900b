//! Source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across `declarations`,
//!   `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Supported Subset
//!
//! - Types: any identifier used as a type name, plus fixed-size arrays `int[N]`
//! - Statements: declarations (single, `,`-chained, initialized), assignments,
//!   calls, nested function definitions, `if`/`else`, `while`, `return`,
//!   `cin >>`, `cout <<`, comments
//! - Expressions: arithmetic, relational, `&&`, `||`, `not`, unary minus,
//!   indexing, calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies. The first malformed construct
//! aborts the parse; there is no error recovery.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
