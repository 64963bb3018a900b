//! Semantic analysis
//!
//! - [`scope`]: arena of nested symbol tables
//! - [`analyzer`]: the AST walk that fills the scopes and counts uses
//! - [`errors`]: non-fatal diagnostics collected along the way

pub mod analyzer;
pub mod errors;
pub mod scope;

pub use analyzer::{analyze, Analysis};
pub use errors::{SemanticError, SemanticErrorKind};
pub use scope::{ScopeForest, ScopeId, Symbol, SymbolKind, SymbolRef};
