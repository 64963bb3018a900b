//! Target-text generation
//!
//! The translator walks the same AST as the analyzer and reads the finished
//! [`ScopeForest`] for var-sections; it never changes either.
//!
//! - [`tables`]: type and operator spellings
//! - `expressions`: expression rendering
//! - `statements`: statements, blocks and function definitions
//!
//! # Layout
//!
//! ```text
//! program <name>;
//! <var-section of the global scope, then of main>
//!
//! <each top-level function, then each function nested in main>
//!
//! begin
//!    <top-level statements, then main's statements>
//! end. {END OF <name>}
//! ```
//!
//! Nested blocks are indented three spaces per level. With
//! [`TranslateOptions::optimize`] set, variables that were never referenced
//! are left out of their var-section and reported in
//! [`Translation::removal_log`].
//!
//! Globals and `main`'s locals share the program's var-section, as do
//! top-level functions and those nested in `main`. Where `main` reuses a
//! name only `main`'s definition is written, and a [`TranslateWarning`]
//! says so.

mod expressions;
mod statements;
pub mod tables;

use crate::parser::ast::{AstNode, Program};
use crate::semantic::scope::{ScopeForest, ScopeId};
use statements::{nested_functions, FunctionDef};
use tables::pascal_type;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name of the function whose body becomes the program body.
pub const MAIN: &str = "main";

const INDENT: &str = "   ";

/// Translation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Leave never-referenced variables out of the var-sections
    pub optimize: bool,
    /// Name written in the `program` header and the final comment
    pub program_name: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            optimize: false,
            program_name: "translated".to_string(),
        }
    }
}

/// Output of the translator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// One note per variable declaration removed by the optimizer
    pub removal_log: Vec<String>,
    pub warnings: Vec<TranslateWarning>,
}

/// Source constructs the target's flat program level cannot hold as written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateWarning {
    #[error("Variable '{0}' of 'main' shadows a global variable; only the 'main' declaration is emitted")]
    ShadowedGlobal(String),

    #[error("Function '{0}' nested in 'main' clashes with a top-level function; only the top-level one is emitted")]
    DuplicateFunction(String),
}

/// Translate an analyzed program.
pub fn translate(program: &Program, forest: &ScopeForest, options: &TranslateOptions) -> Translation {
    let mut translator = Translator::new(forest, options);
    let text = translator.program(program);
    debug!(
        lines = text.lines().count(),
        removed = translator.removal_log.len(),
        "translation finished"
    );
    Translation {
        text,
        removal_log: translator.removal_log,
        warnings: translator.warnings,
    }
}

pub(crate) struct Translator<'a> {
    forest: &'a ScopeForest,
    options: &'a TranslateOptions,
    removal_log: Vec<String>,
    warnings: Vec<TranslateWarning>,
}

impl<'a> Translator<'a> {
    pub(crate) fn new(forest: &'a ScopeForest, options: &'a TranslateOptions) -> Self {
        Self {
            forest,
            options,
            removal_log: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn program(&mut self, program: &Program) -> String {
        let global = self.forest.global();
        let (main, top_level): (Vec<_>, Vec<_>) = nested_functions(&program.statements)
            .into_iter()
            .partition(|def| def.name == MAIN);
        let main = main.first().copied();
        let main_scope = main.and_then(|_| self.forest.scope(global).child(MAIN));

        let mut out = vec![format!("program {};", self.options.program_name)];
        let global_vars = self.var_section(global);
        let main_vars = match main_scope {
            Some(scope) => self.var_section(scope),
            None => Vec::new(),
        };
        let main_names: FxHashSet<&str> = main_vars.iter().map(|(name, _)| *name).collect();
        for (name, line) in global_vars {
            if main_names.contains(name) {
                let warning = TranslateWarning::ShadowedGlobal(name.to_string());
                warn!("{}", warning);
                self.warnings.push(warning);
            } else {
                out.push(line);
            }
        }
        out.extend(main_vars.into_iter().map(|(_, line)| line));

        for &def in &top_level {
            out.push(String::new());
            self.function(def, global, &mut out);
        }
        if let (Some(main), Some(scope)) = (main, main_scope) {
            for def in nested_functions(&main.body.statements) {
                if top_level.iter().any(|top| top.name == def.name) {
                    let warning = TranslateWarning::DuplicateFunction(def.name.to_string());
                    warn!("{}", warning);
                    self.warnings.push(warning);
                    continue;
                }
                out.push(String::new());
                self.function(def, scope, &mut out);
            }
        }

        out.push(String::new());
        let mut body: Vec<&AstNode> = program.statements.iter().collect();
        if let Some(main) = main {
            body.extend(main.body.statements.iter());
        }
        self.block(
            &body,
            format!("end. {{END OF {}}}", self.options.program_name),
            &mut out,
        );

        let mut text = out.join("\n");
        text.push('\n');
        text
    }

    /// One `var` line per variable of `scope` in declaration order, keyed by
    /// the variable's name.
    fn var_section(&mut self, scope: ScopeId) -> Vec<(&'a str, String)> {
        let forest = self.forest;
        let table = forest.scope(scope);
        let mut lines = Vec::new();
        for symbol in table.variables() {
            if self.options.optimize && symbol.uses < 1 {
                let note = format!(
                    "removed unused variable declaration '{}' in scope '{}'",
                    symbol.name, table.name
                );
                info!("{}", note);
                self.removal_log.push(note);
                continue;
            }
            let ty = symbol
                .written_type
                .as_deref()
                .or_else(|| forest.type_name(symbol))
                .map(pascal_type)
                .unwrap_or_default();
            lines.push((symbol.name.as_str(), format!("var {}: {};", symbol.name, ty)));
        }
        lines
    }
}

/// Indent non-empty lines by one level.
pub(crate) fn indent(lines: Vec<String>) -> impl Iterator<Item = String> {
    lines.into_iter().map(|line| {
        if line.is_empty() {
            line
        } else {
            format!("{}{}", INDENT, line)
        }
    })
}
