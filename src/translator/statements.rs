//! Statement and function emission
//!
//! Every routine appends whole lines to an output buffer. Nested content is
//! produced into its own buffer and indented by the caller, so each routine
//! only knows about its own column.
//!
//! Statement terminators are decided while walking a statement list: a
//! statement followed (comments and declarations aside) by an `else` block
//! gets no `;`, since the target forbids one before `else`.

use crate::parser::ast::*;
use crate::semantic::scope::ScopeId;
use crate::translator::tables::{pascal_type, VOID};
use crate::translator::{indent, Translator};

/// Borrowed view of a function definition node
#[derive(Debug, Clone, Copy)]
pub(crate) struct FunctionDef<'a> {
    pub return_type: &'a str,
    pub name: &'a str,
    pub params: &'a FormalParams,
    pub body: &'a Block,
}

impl<'a> FunctionDef<'a> {
    pub fn from_node(node: &'a AstNode) -> Option<Self> {
        match node {
            AstNode::Function {
                return_type,
                name,
                params,
                body,
                ..
            } => Some(Self {
                return_type,
                name,
                params,
                body,
            }),
            _ => None,
        }
    }
}

/// Function definitions in a statement list, looking into control blocks
/// but not into other functions.
pub(crate) fn nested_functions(statements: &[AstNode]) -> Vec<FunctionDef<'_>> {
    let mut found = Vec::new();
    for statement in statements {
        match statement {
            AstNode::If { body, .. }
            | AstNode::While { body, .. }
            | AstNode::ElseBlock { body, .. } => found.extend(nested_functions(&body.statements)),
            other => found.extend(FunctionDef::from_node(other)),
        }
    }
    found
}

/// Brace comment, or `(* *)` when the text itself holds a closing brace
fn comment(text: &str) -> String {
    if text.contains('}') {
        format!("(* {} *)", text.replace("*)", "* )"))
    } else {
        format!("{{ {} }}", text)
    }
}

/// Statements that produce no executable line of their own
fn is_silent(node: &AstNode) -> bool {
    matches!(
        node,
        AstNode::Comment { .. } | AstNode::Declaration(_) | AstNode::Function { .. }
    )
}

impl Translator<'_> {
    /// Emit a function or procedure defined in `parent`.
    pub(crate) fn function(&mut self, def: FunctionDef<'_>, parent: ScopeId, out: &mut Vec<String>) {
        let params = def
            .params
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, pascal_type(p.ty.base_name())))
            .collect::<Vec<_>>()
            .join("; ");
        let params = if params.is_empty() {
            String::new()
        } else {
            format!("({})", params)
        };

        out.push(if def.return_type == VOID {
            format!("procedure {}{};", def.name, params)
        } else {
            format!(
                "function {}{}: {};",
                def.name,
                params,
                pascal_type(def.return_type)
            )
        });

        let scope = self.forest.scope(parent).child(def.name);
        if let Some(scope) = scope {
            out.extend(self.var_section(scope).into_iter().map(|(_, line)| line));
        }

        let nested = nested_functions(&def.body.statements);
        if let Some(scope) = scope {
            for inner in &nested {
                let mut lines = Vec::new();
                self.function(*inner, scope, &mut lines);
                out.push(String::new());
                out.extend(indent(lines));
            }
        }
        if !nested.is_empty() {
            out.push(String::new());
        }

        let body: Vec<&AstNode> = def.body.statements.iter().collect();
        self.block(&body, format!("end; {{END OF {}}}", def.name), out);
    }

    /// `begin`, the indented statements, then the closing line.
    pub(crate) fn block(&self, statements: &[&AstNode], closing: String, out: &mut Vec<String>) {
        out.push("begin".to_string());
        let mut inner = Vec::new();
        self.statements(statements, &mut inner);
        out.extend(indent(inner));
        out.push(closing);
    }

    pub(crate) fn statements(&self, statements: &[&AstNode], out: &mut Vec<String>) {
        for (i, statement) in statements.iter().enumerate() {
            let before_else = statements[i + 1..]
                .iter()
                .find(|next| !is_silent(next))
                .is_some_and(|next| matches!(next, AstNode::ElseBlock { .. }));
            let terminator = if before_else { "" } else { ";" };
            self.statement(statement, terminator, out);
        }
    }

    fn statement(&self, node: &AstNode, terminator: &str, out: &mut Vec<String>) {
        match node {
            AstNode::Declaration(_) | AstNode::Function { .. } => {}
            AstNode::MultipleDeclarations { items, .. } => {
                let assignments: Vec<&AstNode> = items
                    .iter()
                    .filter(|item| matches!(item, AstNode::Assignment { .. }))
                    .collect();
                for (i, assignment) in assignments.iter().enumerate() {
                    let last = i + 1 == assignments.len();
                    self.statement(assignment, if last { terminator } else { ";" }, out);
                }
            }
            AstNode::Assignment { target, value, .. } => out.push(format!(
                "{} := {}{}",
                self.expression(target),
                self.expression(value),
                terminator
            )),
            AstNode::Return { value, .. } => {
                out.push(format!("Exit({}){}", self.expression(value), terminator))
            }
            AstNode::Cin { targets, .. } => {
                out.push(format!("readln({}){}", self.list(targets), terminator))
            }
            AstNode::Cout { items, .. } => {
                out.push(format!("writeln({}){}", self.list(items), terminator))
            }
            AstNode::Comment { text, .. } => out.push(comment(text.trim())),
            AstNode::If {
                condition, body, ..
            } => {
                out.push(format!("if {} then", self.expression(condition)));
                self.control_body(body, terminator, out);
            }
            AstNode::While {
                condition, body, ..
            } => {
                out.push(format!("while {} do", self.expression(condition)));
                self.control_body(body, terminator, out);
            }
            AstNode::ElseBlock { body, .. } => {
                out.push("else".to_string());
                self.control_body(body, terminator, out);
            }
            // calls and anything else usable as an expression statement
            other => out.push(format!("{}{}", self.expression(other), terminator)),
        }
    }

    fn control_body(&self, body: &Block, terminator: &str, out: &mut Vec<String>) {
        let statements: Vec<&AstNode> = body.statements.iter().collect();
        self.block(&statements, format!("end{}", terminator), out);
    }
}
