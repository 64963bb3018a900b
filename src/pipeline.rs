//! End-to-end entry points
//!
//! Lexical and syntax errors abort the run and come back as `Err`.
//! Semantic problems never do: they are returned next to the translation.

use crate::parser::ast::Program;
use crate::parser::lexer::Lexer;
use crate::parser::parse::{ParseError, Parser};
use crate::semantic::analyzer::analyze;
use crate::semantic::errors::SemanticError;
use crate::translator::{translate, TranslateOptions, TranslateWarning};
use tracing::debug;

/// Everything a full run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub target_text: String,
    pub diagnostics: Vec<SemanticError>,
    pub removal_log: Vec<String>,
    /// Source names the translation had to merge or drop
    pub warnings: Vec<TranslateWarning>,
}

impl PipelineOutput {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Diagnostics rendered one per entry, in order of discovery
    pub fn diagnostic_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Lex, parse, analyze and translate `source`.
pub fn run_pipeline(source: &str, options: &TranslateOptions) -> Result<PipelineOutput, ParseError> {
    let program = parse_only(source)?;
    debug!(statements = program.statements.len(), "parsed program");

    let analysis = analyze(&program);
    debug!(errors = analysis.error_count(), "analyzed program");

    let translation = translate(&program, &analysis.forest, options);
    Ok(PipelineOutput {
        target_text: translation.text,
        diagnostics: analysis.diagnostics,
        removal_log: translation.removal_log,
        warnings: translation.warnings,
    })
}

/// Lazy token stream over `source`, ending with `Eof`.
pub fn tokenize(source: &str) -> Lexer {
    Lexer::new(source)
}

/// Parse `source` without analyzing it.
pub fn parse_only(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse()
}
