//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing declarations and function definitions
//! - `statements`: Parsing statements (if, while, cin, cout, etc.)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Implementation
//!
//! Tokens are pulled from the [`Lexer`] one at a time; the parser only ever
//! looks at the current token. `Newline` tokens are skipped while looking for
//! the next meaningful token. Parser methods are split across multiple files
//! using `impl Parser` blocks.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The lexer rejected the input
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A required token was not found
    #[error("Syntax error at line {}, column {}: {}", .location.line, .location.column, .message)]
    Syntax {
        message: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location,
            ParseError::Syntax { location, .. } => *location,
        }
    }
}

/// Recursive descent parser for the source language
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = Self::next_significant(&mut lexer)?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire program (top-level statement list)
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        if self.is_at_end() {
            return Err(self.error("Empty source, expected at least one statement"));
        }

        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_terminated_statement()?);
        }

        let mut program = Program::new(self.current_location());
        program.statements = statements;
        Ok(program)
    }

    // ===== Helper methods =====

    fn next_significant(lexer: &mut Lexer) -> Result<Token, ParseError> {
        loop {
            let token = lexer.next_token()?;
            if !token.is(TokenKind::Newline) {
                return Ok(token);
            }
        }
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = if self.is_at_end() {
            self.current.clone()
        } else {
            Self::next_significant(&mut self.lexer)?
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    pub(crate) fn error(&self, message: &str) -> ParseError {
        ParseError::Syntax {
            message: format!("{}, found {}", message, self.current),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind, ctx: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.error(&format!("Expected {} {}", kind, ctx)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Ident, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse().unwrap()
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse("int main() { return 0; }");

        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            AstNode::Function {
                name,
                params,
                return_type,
                body,
                ..
            } => {
                assert_eq!(name, "main");
                assert_eq!(params.params.len(), 0);
                assert_eq!(return_type, "int");
                assert_eq!(body.statements.len(), 1);
                assert!(matches!(body.statements[0], AstNode::Return { .. }));
            }
            _ => panic!("Expected function definition"),
        }
    }

    #[test]
    fn test_newlines_between_statements() {
        let program = parse("\n\nint x;\n\n\nx = 1;\n");
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.end_location.line, 7);
    }

    #[test]
    fn test_missing_semicolon() {
        let err = Parser::new("int x\nint y;").unwrap().parse().unwrap_err();
        match err {
            ParseError::Syntax { message, location } => {
                assert!(message.contains("Expected ';'"), "{}", message);
                assert!(message.contains("identifier 'int'"), "{}", message);
                assert_eq!(location, SourceLocation::new(2, 1));
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let err = Parser::new("\n \n").unwrap().parse().unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_lex_error_surfaces() {
        let err = match Parser::new("int x = 1abc;") {
            Ok(mut parser) => parser.parse().unwrap_err(),
            Err(err) => err,
        };
        assert!(matches!(err, ParseError::Lex(_)));
        assert!(err.to_string().starts_with("Lexical error at line 1"));
    }
}
