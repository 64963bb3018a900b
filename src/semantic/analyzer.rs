//! Scope-resolving semantic pass
//!
//! One walk over the AST builds the [`ScopeForest`]: the global scope with
//! the builtin types, plus one scope per function definition nested in
//! whichever scope was active at its header. Declarations are inserted,
//! every reference is resolved outward along the scope chain, and each
//! successful resolution bumps the symbol's usage counter.
//!
//! The active scope is passed down explicitly as a [`ScopeId`]. Errors never
//! stop the walk; they are collected into the returned [`Analysis`].

use crate::parser::ast::*;
use crate::semantic::errors::{SemanticError, SemanticErrorKind};
use crate::semantic::scope::{ScopeForest, ScopeId, Symbol, SymbolKind, SymbolRef};
use tracing::{debug, warn};

/// Result of analyzing a program
#[derive(Debug, Clone)]
pub struct Analysis {
    pub forest: ScopeForest,
    pub diagnostics: Vec<SemanticError>,
}

impl Analysis {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Analyze a program. Never fails; problems are reported as diagnostics.
pub fn analyze(program: &Program) -> Analysis {
    let mut analyzer = SemanticAnalyzer {
        forest: ScopeForest::new(),
        diagnostics: Vec::new(),
    };
    analyzer.visit_program(program);

    debug!(
        scopes = analyzer.forest.scopes().count(),
        errors = analyzer.diagnostics.len(),
        "semantic analysis finished"
    );

    Analysis {
        forest: analyzer.forest,
        diagnostics: analyzer.diagnostics,
    }
}

struct SemanticAnalyzer {
    forest: ScopeForest,
    diagnostics: Vec<SemanticError>,
}

impl SemanticAnalyzer {
    fn error(&mut self, kind: SemanticErrorKind, location: SourceLocation) {
        let err = SemanticError::new(kind, location);
        warn!("{}", err);
        self.diagnostics.push(err);
    }

    fn visit_program(&mut self, program: &Program) {
        let global = self.forest.global();
        self.visit_statements(&program.statements, global);

        let has_main = self
            .forest
            .lookup_local(global, "main")
            .map(|main| matches!(self.forest.symbol(main).kind, SymbolKind::Function { .. }))
            .unwrap_or(false);
        if !has_main {
            self.error(SemanticErrorKind::MissingMain, program.end_location);
        }
    }

    fn visit_statements(&mut self, statements: &[AstNode], scope: ScopeId) {
        for statement in statements {
            self.visit(statement, scope);
        }
    }

    fn visit(&mut self, node: &AstNode, scope: ScopeId) {
        match node {
            AstNode::Declaration(decl) => self.visit_declaration(decl, scope),
            AstNode::MultipleDeclarations { items, .. } => self.visit_statements(items, scope),
            AstNode::Function {
                return_type,
                name,
                params,
                body,
                location,
            } => self.visit_function(return_type, name, params, body, *location, scope),
            AstNode::Assignment { target, value, .. } => {
                self.visit(target, scope);
                self.visit(value, scope);
            }
            AstNode::If {
                condition, body, ..
            }
            | AstNode::While {
                condition, body, ..
            } => {
                self.visit(condition, scope);
                self.visit_statements(&body.statements, scope);
            }
            AstNode::ElseBlock { body, .. } => self.visit_statements(&body.statements, scope),
            AstNode::Return { value, .. } => self.visit(value, scope),
            AstNode::Cin { targets: items, .. }
            | AstNode::Cout { items, .. }
            | AstNode::Sequence { items, .. } => self.visit_statements(items, scope),
            AstNode::BinaryOp { left, right, .. } => {
                self.visit(left, scope);
                self.visit(right, scope);
            }
            AstNode::UnaryMinus { operand, .. } | AstNode::Not { operand, .. } => {
                self.visit(operand, scope)
            }
            AstNode::Var { name, location } | AstNode::IdRef { name, location } => {
                self.visit_reference(name, *location, scope);
            }
            AstNode::FunctionCall {
                name,
                args,
                location,
            } => {
                self.visit_reference(name, *location, scope);
                self.visit_statements(&args.args, scope);
            }
            AstNode::IndexAccess { target, index, .. } => {
                self.visit(target, scope);
                self.visit(index, scope);
            }
            AstNode::Comment { .. }
            | AstNode::StringLiteral(..)
            | AstNode::IntLiteral(..)
            | AstNode::FloatLiteral(..) => {}
        }
    }

    fn visit_reference(&mut self, name: &str, location: SourceLocation, scope: ScopeId) {
        if self.forest.resolve(scope, name).is_none() {
            self.error(
                SemanticErrorKind::UndeclaredIdentifier(name.to_string()),
                location,
            );
        }
    }

    /// Resolve a declared type name, counting a use of the type.
    fn resolve_type(&mut self, ty: &TypeSpec, scope: ScopeId) -> Option<SymbolRef> {
        let found = self
            .forest
            .resolve(scope, ty.base_name())
            .filter(|&symbol| self.forest.symbol(symbol).is_type());
        if found.is_none() {
            self.error(
                SemanticErrorKind::UndefinedType(ty.base_name().to_string()),
                ty.location(),
            );
        }
        found
    }

    fn declare(&mut self, scope: ScopeId, symbol: Symbol, location: SourceLocation) -> SymbolRef {
        let name = symbol.name.clone();
        match self.forest.insert(scope, symbol) {
            Ok(inserted) => inserted,
            Err(existing) => {
                self.error(SemanticErrorKind::Redeclaration(name), location);
                existing
            }
        }
    }

    fn visit_declaration(&mut self, decl: &Declaration, scope: ScopeId) {
        let ty = self.resolve_type(&decl.ty, scope);
        self.declare(
            scope,
            Symbol::new(&decl.name, SymbolKind::Variable, ty).written_as(decl.ty.base_name()),
            decl.location,
        );
    }

    fn visit_function(
        &mut self,
        return_type: &str,
        name: &str,
        params: &FormalParams,
        body: &Block,
        location: SourceLocation,
        scope: ScopeId,
    ) {
        let symbol = Symbol::new(
            name,
            SymbolKind::Function {
                params: Vec::new(),
                return_type: return_type.to_string(),
            },
            None,
        );
        let function = match self.forest.insert(scope, symbol) {
            Ok(function) => Some(function),
            Err(_) => {
                self.error(SemanticErrorKind::Redeclaration(name.to_string()), location);
                None
            }
        };

        let function_scope = self.forest.create_function_scope(scope, name);
        debug!(
            function = name,
            level = self.forest.scope(function_scope).level,
            "entering function scope"
        );

        let mut param_symbols = Vec::with_capacity(params.params.len());
        for param in &params.params {
            let ty = self.resolve_type(&param.ty, function_scope);
            let symbol = self.declare(
                function_scope,
                Symbol::new(&param.name, SymbolKind::FormalParameter, ty)
                    .written_as(param.ty.base_name()),
                param.location,
            );
            param_symbols.push(symbol);
        }

        // A redefinition keeps the first definition's signature
        if let Some(function) = function {
            if let SymbolKind::Function { params, .. } = &mut self.forest.symbol_mut(function).kind
            {
                *params = param_symbols;
            }
        }

        self.visit_statements(&body.statements, function_scope);
    }
}
