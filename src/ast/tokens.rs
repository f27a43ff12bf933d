use std::fmt;

use crate::lexer::Position;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Returned repeatedly once the input is exhausted.
    Eof,

    /// Any character the language does not know about.
    ///
    /// The offending character is kept as the token literal.
    Illegal,

    /// Letters and hyphens
    ///
    /// # Examples
    /// ```text
    /// routes
    /// next-hop-interface
    /// ```
    Identifier,

    /// Run of decimal digits, no sign and no decimal point
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 42
    /// ```
    Integer,

    /// Double quoted string literal, taken verbatim (no escapes)
    ///
    /// # Examples
    /// ```text
    /// "eth1"
    /// "0.0.0.0/0"
    /// ```
    String,

    /// Path separator (`.`)
    PathDot,

    /// Pipe operator (`|`)
    ///
    /// The output of the left stage becomes the input document of the right one.
    Pipe,

    /// Replace operator (`=`)
    Assign,

    /// Filter operator (`==`)
    Equal,

    /// Merge operator (`+`)
    Merge,
}

impl TokenKind {
    /// Whether the token separates the two arguments of an expression.
    pub fn is_operator(self) -> bool {
        matches!(self, TokenKind::Assign | TokenKind::Equal | TokenKind::Merge)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Identifier => "IDENT",
            TokenKind::Integer => "INT",
            TokenKind::String => "STRING",
            TokenKind::PathDot => ".",
            TokenKind::Pipe => "|",
            TokenKind::Assign => "=",
            TokenKind::Equal => "==",
            TokenKind::Merge => "+",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token produced by the [`Lexer`](crate::Lexer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Column of the first character of the token.
    pub position: Position,
    pub kind: TokenKind,
    /// Source text of the token. For string literals this excludes the quotes.
    pub literal: String,
}

impl Token {
    pub fn new(position: Position, kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            position,
            kind,
            literal: literal.into(),
        }
    }

    /// Token carrying the canonical text of its kind, e.g. `|` or `==`.
    pub fn punct(position: Position, kind: TokenKind) -> Self {
        let literal = match kind {
            TokenKind::Eof => "",
            kind => kind.as_str(),
        };
        Token::new(position, kind, literal)
    }
}
