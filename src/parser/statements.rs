//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Declarations, assignments and calls (see `declarations`)
//! - Control flow: `if`, `else`, `while`
//! - Stream I/O: `cin >> a >> b`, `cout << "text" << x`
//! - `return expr`
//! - Comments: `// ...` and `/* ... */`
//!
//! # Grammar
//!
//! ```text
//! block      ::= statement*
//! statement  ::= decl_stmt | control | cin_stmt | cout_stmt | return_stmt | comment
//! control    ::= ("if" expr | "while" expr | "else") "{" block "}"
//! cin_stmt   ::= "cin" ">>" ident (">>" ident)*
//! cout_stmt  ::= "cout" "<<" item ("<<" item)*
//! ```
//!
//! Every statement except comments, functions and control blocks must be
//! followed by `;`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_terminated_statement()?);
        }

        Ok(Block { statements })
    }

    /// Parse a statement and, unless it is block-like, the `;` after it
    pub(crate) fn parse_terminated_statement(&mut self) -> Result<AstNode, ParseError> {
        let statement = self.parse_statement()?;
        if !statement.is_block_like() {
            self.expect_token(TokenKind::Semicolon, "after statement")?;
        }
        Ok(statement)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        match self.current.kind {
            TokenKind::Ident | TokenKind::Const => self.parse_identifier_statement(),
            TokenKind::While | TokenKind::If | TokenKind::Else => self.parse_control_block(),
            TokenKind::Return => {
                let location = self.advance()?.location;
                let value = Box::new(self.parse_expression()?);
                Ok(AstNode::Return { value, location })
            }
            TokenKind::Cin => self.parse_cin(),
            TokenKind::Cout => self.parse_cout(),
            TokenKind::LineComment => {
                let token = self.advance()?;
                Ok(AstNode::Comment {
                    text: token.text,
                    location: token.location,
                })
            }
            TokenKind::CommentStart => self.parse_block_comment(),
            _ => Err(self.error("Expected statement")),
        }
    }

    /// Parse `if`, `while` and `else`, which share one production:
    /// keyword, optional condition, braced block
    fn parse_control_block(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.advance()?;
        let location = keyword.location;

        let condition = if keyword.is(TokenKind::Else) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        self.expect_token(TokenKind::LBrace, &format!("after {}", keyword.kind))?;
        let body = self.parse_block()?;
        self.expect_token(TokenKind::RBrace, &format!("to close {} block", keyword.kind))?;

        Ok(match (keyword.kind, condition) {
            (TokenKind::If, Some(condition)) => AstNode::If {
                condition,
                body,
                location,
            },
            (TokenKind::While, Some(condition)) => AstNode::While {
                condition,
                body,
                location,
            },
            _ => AstNode::ElseBlock { body, location },
        })
    }

    /// Parse `cin >> a >> b`
    fn parse_cin(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance()?.location;
        self.expect_token(TokenKind::Shr, "after 'cin'")?;

        let mut targets = Vec::new();
        loop {
            let name = self.expect_identifier("as input target")?;
            targets.push(AstNode::IdRef {
                name: name.text,
                location: name.location,
            });
            if !self.match_token(TokenKind::Shr)? {
                break;
            }
        }

        Ok(AstNode::Cin { targets, location })
    }

    /// Parse `cout << "text" << x`
    fn parse_cout(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance()?.location;
        self.expect_token(TokenKind::Shl, "after 'cout'")?;

        let mut items = Vec::new();
        loop {
            let token = self.advance()?;
            let item = match token.kind {
                TokenKind::Ident => AstNode::IdRef {
                    name: token.text,
                    location: token.location,
                },
                TokenKind::StringLiteral | TokenKind::IntLiteral | TokenKind::FloatLiteral => {
                    Self::literal(token)?
                }
                _ => {
                    return Err(ParseError::Syntax {
                        message: format!(
                            "Expected identifier or literal as output item, found {}",
                            token
                        ),
                        location: token.location,
                    });
                }
            };
            items.push(item);
            if !self.match_token(TokenKind::Shl)? {
                break;
            }
        }

        Ok(AstNode::Cout { items, location })
    }

    /// Parse `/* ... */`; the text is the enclosed tokens joined by spaces
    fn parse_block_comment(&mut self) -> Result<AstNode, ParseError> {
        let location = self.advance()?.location;
        let mut words = Vec::new();

        while !self.check(TokenKind::CommentEnd) {
            if self.is_at_end() {
                return Err(self.error("Expected '*/' to close block comment"));
            }
            let token = self.advance()?;
            words.push(match token.kind {
                TokenKind::StringLiteral => format!("\"{}\"", token.text),
                TokenKind::LineComment => format!("//{}", token.text),
                _ => token.text,
            });
        }
        self.advance()?;

        Ok(AstNode::Comment {
            text: words.join(" "),
            location,
        })
    }
}
