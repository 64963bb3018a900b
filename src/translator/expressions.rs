//! Expression rendering
//!
//! Relational and boolean operations are always wrapped in parentheses.
//! Arithmetic is written bare and only grouped where the target's precedence
//! would otherwise regroup it: a looser child, a right child of equal
//! precedence, or any arithmetic under `and`/`or` (which bind like `*` and
//! `+` in the target).

use crate::parser::ast::*;
use crate::translator::tables::pascal_operator;
use crate::translator::Translator;

impl Translator<'_> {
    pub(crate) fn expression(&self, node: &AstNode) -> String {
        match node {
            AstNode::BinaryOp {
                op, left, right, ..
            } => {
                let text = format!(
                    "{} {} {}",
                    self.operand(*op, left, false),
                    pascal_operator(*op),
                    self.operand(*op, right, true)
                );
                if op.is_arithmetic() {
                    text
                } else {
                    format!("({})", text)
                }
            }
            AstNode::UnaryMinus { operand, .. } => format!("-{}", self.unary_operand(operand)),
            AstNode::Not { operand, .. } => format!("not {}", self.unary_operand(operand)),
            AstNode::Var { name, .. } | AstNode::IdRef { name, .. } => name.clone(),
            AstNode::FunctionCall { name, args, .. } => {
                format!("{}({})", name, self.list(&args.args))
            }
            AstNode::IndexAccess { target, index, .. } => {
                format!("{}[{}]", self.expression(target), self.expression(index))
            }
            AstNode::Sequence { items, .. } => format!("[{}]", self.list(items)),
            AstNode::StringLiteral(text, _) => quote(text),
            AstNode::IntLiteral(text, _) => text.clone(),
            AstNode::FloatLiteral(text, _) => {
                if text.ends_with('.') {
                    format!("{}0", text)
                } else {
                    text.clone()
                }
            }
            // never in expression position
            AstNode::Declaration(_)
            | AstNode::MultipleDeclarations { .. }
            | AstNode::Function { .. }
            | AstNode::Assignment { .. }
            | AstNode::If { .. }
            | AstNode::While { .. }
            | AstNode::ElseBlock { .. }
            | AstNode::Return { .. }
            | AstNode::Cin { .. }
            | AstNode::Cout { .. }
            | AstNode::Comment { .. } => String::new(),
        }
    }

    /// Comma-separated expressions
    pub(crate) fn list(&self, items: &[AstNode]) -> String {
        items
            .iter()
            .map(|item| self.expression(item))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn operand(&self, parent: BinOp, child: &AstNode, is_right: bool) -> String {
        let text = self.expression(child);
        let grouped = match child {
            AstNode::BinaryOp { op, .. } if op.is_arithmetic() => match parent {
                BinOp::And | BinOp::Or => true,
                _ if parent.is_arithmetic() => {
                    op.precedence() < parent.precedence()
                        || (is_right && op.precedence() == parent.precedence())
                }
                _ => false,
            },
            _ => false,
        };
        if grouped {
            format!("({})", text)
        } else {
            text
        }
    }

    fn unary_operand(&self, operand: &AstNode) -> String {
        let text = self.expression(operand);
        match operand {
            AstNode::BinaryOp { op, .. } if op.is_arithmetic() => format!("({})", text),
            AstNode::UnaryMinus { .. } => format!("({})", text),
            _ => text,
        }
    }
}

/// Single-quoted string literal with embedded quotes doubled
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
