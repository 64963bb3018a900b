//! Semantic diagnostics
//!
//! Unlike lexical and syntax errors, none of these stop the analysis: they
//! are collected while walking the tree and returned next to the scopes.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    /// A referenced name resolves in no enclosing scope
    #[error("Undeclared identifier '{0}'")]
    UndeclaredIdentifier(String),

    /// A name declared twice in the same scope
    #[error("Redeclaration of '{0}'")]
    Redeclaration(String),

    /// A declaration's type name does not resolve to a type
    #[error("Undefined type '{0}'")]
    UndefinedType(String),

    /// No `main` function in the global scope
    #[error("No 'main' function found")]
    MissingMain,
}

/// A semantic error with the position it was found at
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Semantic error at line {}, column {}: {}", .location.line, .location.column, .kind)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub location: SourceLocation,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}
