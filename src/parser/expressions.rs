//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for everything else.
//!
//! # Precedence
//!
//! From loosest to tightest:
//!
//! | Level          | Operators                   |
//! |----------------|-----------------------------|
//! | logical or     | `\|\|`                      |
//! | logical and    | `&&`                        |
//! | relational     | `<` `>` `<=` `>=` `==` `!=` |
//! | additive       | `+` `-`                     |
//! | multiplicative | `*` `/` `%`                 |
//! | unary          | `-` `not`                   |
//!
//! Primary expressions are literals, identifiers, `( expr )`, `id[expr]`
//! and `id(args)`. All binary levels are left-associative.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

/// Binary operator recognised at the current token, if any.
fn binary_op(kind: TokenKind) -> Option<BinOp> {
    Some(match kind {
        TokenKind::OrOr => BinOp::Or,
        TokenKind::AndAnd => BinOp::And,
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::Le => BinOp::Le,
        TokenKind::Ge => BinOp::Ge,
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::NotEq => BinOp::Ne,
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        TokenKind::Percent => BinOp::Mod,
        _ => return None,
    })
}

/// Loosest binding level.
const MIN_PRECEDENCE: u8 = 1;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary(MIN_PRECEDENCE)
    }

    /// Precedence climbing over the binary operator levels
    fn parse_binary(&mut self, min_precedence: u8) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = binary_op(self.current.kind) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            let location = self.advance()?.location;
            let right = self.parse_binary(precedence + 1)?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        Ok(left)
    }

    /// Parse unary operators: -x, not x
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        match self.current.kind {
            TokenKind::Minus => {
                let location = self.advance()?.location;
                let operand = Box::new(self.parse_unary()?);
                Ok(AstNode::UnaryMinus { operand, location })
            }
            TokenKind::Not => {
                let location = self.advance()?.location;
                let operand = Box::new(self.parse_unary()?);
                Ok(AstNode::Not { operand, location })
            }
            _ => self.parse_primary(),
        }
    }

    /// Parse primary expressions
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        match self.current.kind {
            TokenKind::StringLiteral | TokenKind::IntLiteral | TokenKind::FloatLiteral => {
                let token = self.advance()?;
                Self::literal(token)
            }
            TokenKind::Ident => {
                let name = self.advance()?;
                match self.current.kind {
                    TokenKind::LParen => self.parse_call(name),
                    TokenKind::LBracket => {
                        let location = self.advance()?.location;
                        let index = Box::new(self.parse_expression()?);
                        self.expect_token(TokenKind::RBracket, "after index")?;
                        Ok(AstNode::IndexAccess {
                            target: Box::new(AstNode::Var {
                                name: name.text,
                                location: name.location,
                            }),
                            index,
                            location,
                        })
                    }
                    _ => Ok(AstNode::Var {
                        name: name.text,
                        location: name.location,
                    }),
                }
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::RParen, "after expression")?;
                Ok(expr)
            }
            _ => Err(self.error("Expected expression")),
        }
    }

    /// Build a literal node from a literal token
    pub(crate) fn literal(token: Token) -> Result<AstNode, ParseError> {
        match token.kind {
            TokenKind::StringLiteral => Ok(AstNode::StringLiteral(token.text, token.location)),
            TokenKind::FloatLiteral => Ok(AstNode::FloatLiteral(token.text, token.location)),
            TokenKind::IntLiteral => Ok(AstNode::IntLiteral(token.text, token.location)),
            _ => Err(ParseError::Syntax {
                message: format!("Expected literal, found {}", token),
                location: token.location,
            }),
        }
    }
}
