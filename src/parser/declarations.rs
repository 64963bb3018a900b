//! Declaration parsing implementation
//!
//! Statements that start with an identifier (or `const`) are resolved here.
//! The first identifier is consumed and the token after it decides what the
//! statement is:
//!
//! ```text
//! decl_stmt   ::= ["const"] ident ident ( func_def | multi_decl | ε )
//!               | ident "[" int "]" ident
//!               | ident "=" ( expr | "[" sequence "]" )
//!               | ident "(" args ")"
//! func_def    ::= "(" formal_params ")" "{" block "}"
//! multi_decl  ::= ( "," ident | "=" expr )*
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement led by an identifier or `const`
    pub(crate) fn parse_identifier_statement(&mut self) -> Result<AstNode, ParseError> {
        let is_const = self.match_token(TokenKind::Const)?;
        let first = self.expect_identifier("at start of declaration")?;

        match self.current.kind {
            // int abc ...
            TokenKind::Ident => {
                let name = self.advance()?;
                let ty = TypeSpec::Named {
                    name: first.text,
                    location: first.location,
                };

                if self.check(TokenKind::LParen) {
                    return self.parse_function_definition(ty, name);
                }

                let decl = Declaration {
                    ty,
                    name: name.text,
                    is_const,
                    location: name.location,
                };

                if self.check(TokenKind::Comma) || self.check(TokenKind::Assign) {
                    return self.parse_multiple_declarations(decl);
                }

                Ok(AstNode::Declaration(decl))
            }
            // int[10] abc
            TokenKind::LBracket => {
                let ty = self.parse_array_suffix(first)?;
                let name = self.expect_identifier("after array type")?;
                Ok(AstNode::Declaration(Declaration {
                    ty,
                    name: name.text,
                    is_const,
                    location: name.location,
                }))
            }
            _ if is_const => Err(self.error(&format!(
                "Expected name after type '{}' in constant declaration",
                first.text
            ))),
            // abc = 123 or abc = [1, 2, 3]
            TokenKind::Assign => {
                let loc = self.advance()?.location;
                let target = Box::new(AstNode::Var {
                    name: first.text,
                    location: first.location,
                });
                let value = if self.check(TokenKind::LBracket) {
                    self.parse_sequence()?
                } else {
                    self.parse_expression()?
                };
                Ok(AstNode::Assignment {
                    target,
                    value: Box::new(value),
                    location: loc,
                })
            }
            // abc(1, 2, 3)
            TokenKind::LParen => self.parse_call(first),
            _ => Err(self.error(&format!(
                "Expected declaration, assignment or function call after '{}'",
                first.text
            ))),
        }
    }

    /// Parse `[N]` following an element type name
    fn parse_array_suffix(&mut self, element: Token) -> Result<TypeSpec, ParseError> {
        self.expect_token(TokenKind::LBracket, "in array type")?;
        let size_token = self.expect_token(TokenKind::IntLiteral, "as array size")?;
        let size = size_token.text.parse::<usize>().map_err(|_| ParseError::Syntax {
            message: format!("Invalid array size: {}", size_token.text),
            location: size_token.location,
        })?;
        self.expect_token(TokenKind::RBracket, "after array size")?;
        Ok(TypeSpec::Complex {
            name: element.text,
            size,
            location: element.location,
        })
    }

    /// Parse a type: a name optionally followed by `[N]`
    fn parse_type(&mut self) -> Result<TypeSpec, ParseError> {
        let name = self.expect_identifier("as type name")?;
        if self.check(TokenKind::LBracket) {
            return self.parse_array_suffix(name);
        }
        Ok(TypeSpec::Named {
            name: name.text,
            location: name.location,
        })
    }

    /// Parse function definition after `type name`: (params) { body }
    fn parse_function_definition(
        &mut self,
        return_type: TypeSpec,
        name: Token,
    ) -> Result<AstNode, ParseError> {
        self.expect_token(TokenKind::LParen, "after function name")?;
        let params = self.parse_formal_params()?;
        self.expect_token(TokenKind::RParen, "after parameters")?;
        self.expect_token(TokenKind::LBrace, "before function body")?;
        let body = self.parse_block()?;
        self.expect_token(TokenKind::RBrace, "after function body")?;

        Ok(AstNode::Function {
            return_type: return_type.base_name().to_string(),
            name: name.text,
            params,
            body,
            location: name.location,
        })
    }

    /// Parse parameter list: type name, type name, ...
    fn parse_formal_params(&mut self) -> Result<FormalParams, ParseError> {
        let mut params = Vec::new();
        if self.check(TokenKind::RParen) {
            return Ok(FormalParams { params });
        }

        loop {
            let ty = self.parse_type()?;
            let name = self.expect_identifier("as parameter name")?;
            params.push(Declaration {
                ty,
                name: name.text,
                is_const: false,
                location: name.location,
            });

            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }

        Ok(FormalParams { params })
    }

    /// Parse `, b, c = expr` after the first declaration of a shared type.
    ///
    /// Each initializer becomes an assignment placed right after the
    /// declaration it belongs to.
    fn parse_multiple_declarations(&mut self, first: Declaration) -> Result<AstNode, ParseError> {
        let location = first.location;
        let ty = first.ty.clone();
        let is_const = first.is_const;
        let mut current = (first.name.clone(), first.location);
        let mut items = vec![AstNode::Declaration(first)];

        while !self.check(TokenKind::Semicolon) {
            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    let name = self.expect_identifier("after ',' in declaration")?;
                    current = (name.text.clone(), name.location);
                    items.push(AstNode::Declaration(Declaration {
                        ty: ty.clone(),
                        name: name.text,
                        is_const,
                        location: name.location,
                    }));
                }
                TokenKind::Assign => {
                    let loc = self.advance()?.location;
                    let value = self.parse_expression()?;
                    items.push(AstNode::Assignment {
                        target: Box::new(AstNode::Var {
                            name: current.0.clone(),
                            location: current.1,
                        }),
                        value: Box::new(value),
                        location: loc,
                    });
                }
                _ => return Err(self.error("Expected ',', '=' or ';' in declaration")),
            }
        }

        Ok(AstNode::MultipleDeclarations { items, location })
    }

    /// Parse `[e1, e2, ...]`
    fn parse_sequence(&mut self) -> Result<AstNode, ParseError> {
        let location = self.expect_token(TokenKind::LBracket, "to open sequence")?.location;
        let mut items = Vec::new();
        while !self.check(TokenKind::RBracket) {
            items.push(self.parse_expression()?);
            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }
        self.expect_token(TokenKind::RBracket, "to close sequence")?;
        Ok(AstNode::Sequence { items, location })
    }

    /// Parse `(args)` after a function name
    pub(crate) fn parse_call(&mut self, name: Token) -> Result<AstNode, ParseError> {
        self.expect_token(TokenKind::LParen, "after function name")?;
        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) {
            args.push(self.parse_expression()?);
            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }
        self.expect_token(TokenKind::RParen, "after arguments")?;

        Ok(AstNode::FunctionCall {
            name: name.text,
            args: ActualParams { args },
            location: name.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse().unwrap()
    }

    #[test]
    fn test_plain_and_const_declarations() {
        let program = parse("int x;\nconst float pi;");
        match &program.statements[0] {
            AstNode::Declaration(decl) => {
                assert_eq!(decl.name, "x");
                assert_eq!(decl.ty.base_name(), "int");
                assert!(!decl.is_const);
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
        assert!(matches!(&program.statements[1], AstNode::Declaration(d) if d.is_const));
    }

    #[test]
    fn test_array_declaration() {
        let program = parse("int[10] values;");
        match &program.statements[0] {
            AstNode::Declaration(Declaration {
                ty: TypeSpec::Complex { name, size, .. },
                name: var,
                ..
            }) => {
                assert_eq!(name, "int");
                assert_eq!(*size, 10);
                assert_eq!(var, "values");
            }
            other => panic!("Expected array declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_declarations_with_initializers() {
        let program = parse("int a = 1, b, c = a + 2;");
        let AstNode::MultipleDeclarations { items, .. } = &program.statements[0] else {
            panic!("Expected multiple declarations");
        };
        assert_eq!(items.len(), 5);
        assert!(matches!(&items[0], AstNode::Declaration(d) if d.name == "a"));
        assert!(matches!(&items[1], AstNode::Assignment { target, .. }
            if matches!(target.as_ref(), AstNode::Var { name, .. } if name == "a")));
        assert!(matches!(&items[2], AstNode::Declaration(d) if d.name == "b"));
        assert!(matches!(&items[3], AstNode::Declaration(d) if d.name == "c"));
        assert!(matches!(&items[4], AstNode::Assignment { target, .. }
            if matches!(target.as_ref(), AstNode::Var { name, .. } if name == "c")));
    }

    #[test]
    fn test_bad_multiple_declaration() {
        let err = Parser::new("int a, b c;").unwrap().parse().unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_function_with_params() {
        let program = parse("float avg(int a, float[3] b) { return a; }");
        let AstNode::Function { params, return_type, .. } = &program.statements[0] else {
            panic!("Expected function");
        };
        assert_eq!(return_type, "float");
        assert_eq!(params.params.len(), 2);
        assert!(matches!(params.params[1].ty, TypeSpec::Complex { size: 3, .. }));
    }

    #[test]
    fn test_assignment_of_sequence() {
        let program = parse("a = [1, 2, 3];");
        let AstNode::Assignment { value, .. } = &program.statements[0] else {
            panic!("Expected assignment");
        };
        assert!(matches!(value.as_ref(), AstNode::Sequence { items, .. } if items.len() == 3));
    }

    #[test]
    fn test_call_statement() {
        let program = parse("print(x, 2 * y);");
        let AstNode::FunctionCall { name, args, .. } = &program.statements[0] else {
            panic!("Expected call");
        };
        assert_eq!(name, "print");
        assert_eq!(args.args.len(), 2);
    }

    #[test]
    fn test_identifier_alone_is_rejected() {
        let err = Parser::new("x;").unwrap().parse().unwrap_err();
        assert!(err.to_string().contains("Expected declaration, assignment or function call"));
    }
}
