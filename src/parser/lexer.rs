//! Lexer (tokenizer) for the C-like source language
//!
//! Converts raw source text into a lazy [`Token`] stream consumed by the
//! parser. The lexer is a small state machine: the start state dispatches on
//! the current character and hands multi-character tokens to a dedicated
//! state that either completes the token or falls back to a one-character
//! token after a single character of lookahead.
//!
//! Newlines are significant and emitted as [`TokenKind::Newline`]. Line
//! comments become a single [`TokenKind::LineComment`] token carrying the
//! rest of the line. Block comment delimiters are tokenized on their own;
//! what lies between them is left to the parser.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    StringLiteral,
    IntLiteral,
    FloatLiteral,

    // Identifiers (type names included)
    Ident,

    // Keywords
    For,
    While,
    Return,
    Function,
    If,
    Else,
    Not,
    Cout,
    Cin,
    Const,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Amp,    // &

    // Stream operators
    Shl, // <<
    Shr, // >>

    // Assignment
    Assign, // =

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,

    // Comments
    LineComment,  // // ...
    CommentStart, // /*
    CommentEnd,   // */

    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::StringLiteral => "string literal",
            TokenKind::IntLiteral => "int literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::Ident => "identifier",
            TokenKind::For => "'for'",
            TokenKind::While => "'while'",
            TokenKind::Return => "'return'",
            TokenKind::Function => "'function'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Not => "'not'",
            TokenKind::Cout => "'cout'",
            TokenKind::Cin => "'cin'",
            TokenKind::Const => "'const'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Amp => "'&'",
            TokenKind::Shl => "'<<'",
            TokenKind::Shr => "'>>'",
            TokenKind::Assign => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::LineComment => "line comment",
            TokenKind::CommentStart => "'/*'",
            TokenKind::CommentEnd => "'*/'",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
        };
        f.write_str(name)
    }
}

/// A lexical unit with its category, literal text and start position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::StringLiteral => write!(f, "string literal \"{}\"", self.text),
            TokenKind::IntLiteral | TokenKind::FloatLiteral => {
                write!(f, "{} {}", self.kind, self.text)
            }
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::LineComment => write!(f, "comment \"{}\"", self.text),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, Error)]
#[error("Lexical error at line {}, column {}: {}", .location.line, .location.column, .message)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Token currently being assembled by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Slash,
    Assign,
    Less,
    Greater,
    Bang,
    Amp,
    Pipe,
    Star,
    Str(char),
    Number,
    Float,
    Ident,
    LineComment,
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("for", TokenKind::For),
    ("while", TokenKind::While),
    ("return", TokenKind::Return),
    ("function", TokenKind::Function),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("not", TokenKind::Not),
    ("cout", TokenKind::Cout),
    ("cin", TokenKind::Cin),
    ("const", TokenKind::Const),
];

/// Lexer for the source language
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Tokenize the entire input, `Eof` included.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Produce the next token. Once the input is exhausted every call
    /// returns an `Eof` token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let mut state = State::Start;
        let mut start = self.current_location();
        let mut text = String::new();

        loop {
            let ch = self.peek();
            match state {
                State::Start => {
                    start = self.current_location();
                    let Some(c) = ch else {
                        return Ok(Token::new(TokenKind::Eof, "", start));
                    };
                    self.advance();
                    let single = match c {
                        ' ' | '\t' | '\r' => continue,
                        '\n' => Some(TokenKind::Newline),
                        '+' => Some(TokenKind::Plus),
                        '-' => Some(TokenKind::Minus),
                        '%' => Some(TokenKind::Percent),
                        '(' => Some(TokenKind::LParen),
                        ')' => Some(TokenKind::RParen),
                        '{' => Some(TokenKind::LBrace),
                        '}' => Some(TokenKind::RBrace),
                        '[' => Some(TokenKind::LBracket),
                        ']' => Some(TokenKind::RBracket),
                        ';' => Some(TokenKind::Semicolon),
                        ',' => Some(TokenKind::Comma),
                        _ => None,
                    };
                    if let Some(kind) = single {
                        let text = if kind == TokenKind::Newline {
                            "\\n".to_string()
                        } else {
                            c.to_string()
                        };
                        return Ok(Token::new(kind, text, start));
                    }
                    state = match c {
                        '/' => State::Slash,
                        '=' => State::Assign,
                        '<' => State::Less,
                        '>' => State::Greater,
                        '!' => State::Bang,
                        '&' => State::Amp,
                        '|' => State::Pipe,
                        '*' => State::Star,
                        '"' | '\'' => State::Str(c),
                        '0'..='9' => {
                            text.push(c);
                            State::Number
                        }
                        'a'..='z' | 'A'..='Z' | '_' => {
                            text.push(c);
                            State::Ident
                        }
                        _ => {
                            return Err(LexError {
                                message: format!("Unexpected character: '{}'", c),
                                location: start,
                            });
                        }
                    };
                }
                State::Slash => match ch {
                    Some('/') => {
                        self.advance();
                        state = State::LineComment;
                    }
                    Some('*') => {
                        self.advance();
                        return Ok(Token::new(TokenKind::CommentStart, "/*", start));
                    }
                    _ => return Ok(Token::new(TokenKind::Slash, "/", start)),
                },
                State::Star => {
                    return Ok(if ch == Some('/') {
                        self.advance();
                        Token::new(TokenKind::CommentEnd, "*/", start)
                    } else {
                        Token::new(TokenKind::Star, "*", start)
                    });
                }
                State::Assign => {
                    return Ok(self.pair(ch, '=', TokenKind::EqEq, "==", TokenKind::Assign, "=", start));
                }
                State::Less => {
                    return Ok(match ch {
                        Some('=') => {
                            self.advance();
                            Token::new(TokenKind::Le, "<=", start)
                        }
                        Some('<') => {
                            self.advance();
                            Token::new(TokenKind::Shl, "<<", start)
                        }
                        _ => Token::new(TokenKind::Lt, "<", start),
                    });
                }
                State::Greater => {
                    return Ok(match ch {
                        Some('=') => {
                            self.advance();
                            Token::new(TokenKind::Ge, ">=", start)
                        }
                        Some('>') => {
                            self.advance();
                            Token::new(TokenKind::Shr, ">>", start)
                        }
                        _ => Token::new(TokenKind::Gt, ">", start),
                    });
                }
                State::Amp => {
                    return Ok(self.pair(ch, '&', TokenKind::AndAnd, "&&", TokenKind::Amp, "&", start));
                }
                State::Bang | State::Pipe => {
                    let (second, kind, spelled) = if state == State::Bang {
                        ('=', TokenKind::NotEq, "!=")
                    } else {
                        ('|', TokenKind::OrOr, "||")
                    };
                    if ch == Some(second) {
                        self.advance();
                        return Ok(Token::new(kind, spelled, start));
                    }
                    return Err(LexError {
                        message: format!(
                            "Unexpected character: '{}', expected operator {}",
                            &spelled[..1],
                            spelled
                        ),
                        location: start,
                    });
                }
                State::Str(delimiter) => match ch {
                    Some(c) if c == delimiter => {
                        self.advance();
                        return Ok(Token::new(TokenKind::StringLiteral, text, start));
                    }
                    Some(c) => {
                        self.advance();
                        text.push(c);
                    }
                    None => {
                        return Err(LexError {
                            message: format!("Unterminated string literal: {}{}", delimiter, text),
                            location: start,
                        });
                    }
                },
                State::Number | State::Float => match ch {
                    Some(c) if c.is_ascii_digit() => {
                        self.advance();
                        text.push(c);
                    }
                    Some('.') if state == State::Number => {
                        self.advance();
                        text.push('.');
                        state = State::Float;
                    }
                    Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                        text.push(c);
                        return Err(LexError {
                            message: format!("Malformed numeric literal: '{}'", text),
                            location: start,
                        });
                    }
                    _ => {
                        let kind = if state == State::Float {
                            TokenKind::FloatLiteral
                        } else {
                            TokenKind::IntLiteral
                        };
                        return Ok(Token::new(kind, text, start));
                    }
                },
                State::Ident => match ch {
                    Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                        self.advance();
                        text.push(c);
                    }
                    _ => {
                        let kind = KEYWORDS
                            .iter()
                            .find(|(word, _)| *word == text)
                            .map(|(_, kind)| *kind)
                            .unwrap_or(TokenKind::Ident);
                        return Ok(Token::new(kind, text, start));
                    }
                },
                State::LineComment => match ch {
                    Some(c) if c != '\n' => {
                        self.advance();
                        text.push(c);
                    }
                    _ => return Ok(Token::new(TokenKind::LineComment, text, start)),
                },
            }
        }
    }

    /// Two-character operator if `ch` is `second`, else the one-character fallback.
    #[allow(clippy::too_many_arguments)]
    fn pair(
        &mut self,
        ch: Option<char>,
        second: char,
        long: TokenKind,
        long_text: &str,
        short: TokenKind,
        short_text: &str,
        start: SourceLocation,
    ) -> Token {
        if ch == Some(second) {
            self.advance();
            Token::new(long, long_text, start)
        } else {
            Token::new(short, short_text, start)
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Yields every token up to and including `Eof`, then stops. Stops after
/// the first error as well.
impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.is(TokenKind::Eof) => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("int main() { return 0; }").tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "int");
        assert_eq!(tokens[1].text, "main");
        assert_eq!(tokens[2].kind, TokenKind::LParen);
        assert_eq!(tokens[3].kind, TokenKind::RParen);
        assert_eq!(tokens[4].kind, TokenKind::LBrace);
        assert_eq!(tokens[5].kind, TokenKind::Return);
        assert_eq!(tokens[6].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[6].text, "0");
        assert_eq!(tokens[7].kind, TokenKind::Semicolon);
        assert_eq!(tokens[8].kind, TokenKind::RBrace);
        assert_eq!(tokens[9].kind, TokenKind::Eof);
    }

    #[test]
    fn test_two_character_operators() {
        assert_eq!(
            kinds("== && || <= >= << >> != = < > &"),
            vec![
                TokenKind::EqEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::NotEq,
                TokenKind::Assign,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Amp,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_newlines_are_tokens() {
        let tokens = Lexer::new("x\ny").tokenize().unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[2].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_line_comment_keeps_rest_of_line() {
        let tokens = Lexer::new("x; // hello there\ny").tokenize().unwrap();
        assert_eq!(tokens[2].kind, TokenKind::LineComment);
        assert_eq!(tokens[2].text, " hello there");
        assert_eq!(tokens[3].kind, TokenKind::Newline);
    }

    #[test]
    fn test_block_comment_delimiters() {
        assert_eq!(
            kinds("/* a */ * /"),
            vec![
                TokenKind::CommentStart,
                TokenKind::Ident,
                TokenKind::CommentEnd,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literals_both_quotes() {
        let tokens = Lexer::new(r#""say 'hi'" 'a "b"'"#).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "say 'hi'");
        assert_eq!(tokens[1].text, "a \"b\"");
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("cout << \"oops").tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated string"));
        assert_eq!(err.location, SourceLocation::new(1, 9));
    }

    #[test]
    fn test_numbers() {
        let tokens = Lexer::new("42 3.14 7.").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[1].text, "3.14");
        assert_eq!(tokens[2].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[2].text, "7.");
    }

    #[test]
    fn test_digit_followed_by_letter() {
        let err = Lexer::new("int 1abc;").tokenize().unwrap_err();
        assert!(err.message.contains("Malformed numeric literal"));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("while if else not cout cin const return for function"),
            vec![
                TokenKind::While,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Not,
                TokenKind::Cout,
                TokenKind::Cin,
                TokenKind::Const,
                TokenKind::Return,
                TokenKind::For,
                TokenKind::Function,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("x = 1 @ 2;").tokenize().unwrap_err();
        assert!(err.message.contains("'@'"));
        assert_eq!(err.location.column, 7);
        assert!(Lexer::new("a ! b").tokenize().is_err());
        assert!(Lexer::new("a | b").tokenize().is_err());
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let collected: Vec<_> = Lexer::new("a b").collect();
        assert_eq!(collected.len(), 3);
        assert!(collected.iter().all(|t| t.is_ok()));
    }
}
