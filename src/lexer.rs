use std::{fmt, io::Read};

use thiserror::Error;

use crate::ast::{Token, TokenKind};

/// Column of a token, counted in characters from the start of the input.
///
/// Expressions are single-line, so there is no line counter. Columns are
/// 1-based; the end-of-input token reports the number of characters consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub column: usize,
}

impl Position {
    pub fn new(column: usize) -> Self {
        Position { column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col {}", self.column)
    }
}

/// Errors raised while reading the expression source.
///
/// Malformed characters never fail the lexer; they become
/// [`TokenKind::Illegal`] tokens.
#[derive(Debug, Error)]
pub enum LexError {
    #[error("failed to read expression: {0}")]
    Read(#[from] std::io::Error),
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Reads the whole expression from `reader`.
    ///
    /// This is the only fallible step of lexing: I/O errors and invalid UTF-8
    /// surface here as [`LexError::Read`].
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LexError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Ok(Lexer::new(&input))
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    // Columns are 1-based, so the character at `position` sits at `position + 1`.
    fn column(&self) -> Position {
        Position::new(self.position + 1)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads up to the closing quote. Hitting the end of input first returns
    /// what was read so far instead of failing.
    fn read_string(&mut self) -> String {
        self.advance(); // opening quote

        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '"' {
                return result;
            }
            result.push(ch);
        }
        result
    }

    fn punct(&mut self, kind: TokenKind, width: usize) -> Token {
        let token = Token::punct(self.column(), kind);
        self.position += width;
        token
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.current_char() {
            None => Token::punct(Position::new(self.position), TokenKind::Eof),
            Some('.') => self.punct(TokenKind::PathDot, 1),
            Some('|') => self.punct(TokenKind::Pipe, 1),
            Some('+') => self.punct(TokenKind::Merge, 1),
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.punct(TokenKind::Equal, 2)
                } else {
                    self.punct(TokenKind::Assign, 1)
                }
            }
            Some('"') => {
                let start = self.column();
                let literal = self.read_string();
                Token::new(start, TokenKind::String, literal)
            }
            Some(ch) if ch.is_ascii_digit() => {
                let start = self.column();
                let literal = self.read_while(|c| c.is_ascii_digit());
                Token::new(start, TokenKind::Integer, literal)
            }
            Some(ch) if is_identifier_char(ch) => {
                let start = self.column();
                let literal = self.read_while(is_identifier_char);
                Token::new(start, TokenKind::Identifier, literal)
            }
            Some(ch) => {
                let start = self.column();
                self.advance();
                Token::new(start, TokenKind::Illegal, ch.to_string())
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields tokens up to, but not including, the end of input.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphabetic() || ch == '-'
}

#[test]
fn test_kebab_case_identifier() {
    let mut lexer = Lexer::new("next-hop-interface");
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.literal, "next-hop-interface");
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_equal_pushback() {
    let mut lexer = Lexer::new("a=b==c");
    let kinds: Vec<TokenKind> = lexer.by_ref().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Identifier,
        ]
    );
}
