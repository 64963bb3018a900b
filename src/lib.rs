//! # Introduction
//!
//! cpp2pas translates programs written in a small C-like language into
//! Pascal source text.
//!
//! ## Translation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic analyzer → Translator → Pascal
//! ```
//!
//! 1. [`parser`] tokenises the source and builds an AST. Lexical and syntax
//!    errors stop the run.
//! 2. [`semantic`] builds nested scopes, resolves every name and counts how
//!    often each symbol is used. Its diagnostics never stop the run.
//! 3. [`translator`] writes the target program, optionally dropping variables
//!    that are never used.
//! 4. [`pipeline`] chains the stages: [`run_pipeline`], [`tokenize`] and
//!    [`parse_only`].
//!
//! ## Supported subset
//!
//! Types: `int`, `float`, `char`, `bool`, `string`, fixed-size arrays.
//! Control flow: `if/else`, `while`, `return`, nested function definitions.
//! I/O: `cin >>`, `cout <<`.

pub mod parser;
pub mod pipeline;
pub mod semantic;
pub mod translator;

pub use pipeline::{parse_only, run_pipeline, tokenize, PipelineOutput};
pub use translator::{TranslateOptions, TranslateWarning, Translation};
