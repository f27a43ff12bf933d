// tests/lexer_tests.rs

use std::io::{self, Read};

use matchers_lang::ast::{Token, TokenKind};
use matchers_lang::lexer::{LexError, Lexer, Position};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        out.push(token);
        if done {
            return out;
        }
    }
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokens(input).into_iter().map(|t| t.kind).collect()
}

// ============================================================================
// Punctuation and Operators
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        (".", TokenKind::PathDot),
        ("|", TokenKind::Pipe),
        ("=", TokenKind::Assign),
        ("+", TokenKind::Merge),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token();
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.literal, input);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}

#[test]
fn test_double_equal() {
    let mut lexer = Lexer::new("==");
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Equal);
    assert_eq!(token.literal, "==");
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_equal_followed_by_other_char_is_assign() {
    assert_eq!(
        kinds("=a"),
        vec![TokenKind::Assign, TokenKind::Identifier, TokenKind::Eof]
    );
    assert_eq!(
        kinds("==="),
        vec![TokenKind::Equal, TokenKind::Assign, TokenKind::Eof]
    );
}

#[test]
fn test_operators_are_flagged() {
    assert!(TokenKind::Assign.is_operator());
    assert!(TokenKind::Equal.is_operator());
    assert!(TokenKind::Merge.is_operator());
    assert!(!TokenKind::Pipe.is_operator());
    assert!(!TokenKind::PathDot.is_operator());
}

// ============================================================================
// Identifiers and Integers
// ============================================================================

#[test]
fn test_identifier_with_hyphens() {
    let toks = tokens("next-hop-interface");
    assert_eq!(toks[0].kind, TokenKind::Identifier);
    assert_eq!(toks[0].literal, "next-hop-interface");
}

#[test]
fn test_integer() {
    let toks = tokens("42");
    assert_eq!(toks[0].kind, TokenKind::Integer);
    assert_eq!(toks[0].literal, "42");
}

#[test]
fn test_digits_end_identifier() {
    // identifiers are letters and hyphens only
    let toks = tokens("ipv4");
    assert_eq!(toks[0].kind, TokenKind::Identifier);
    assert_eq!(toks[0].literal, "ipv");
    assert_eq!(toks[1].kind, TokenKind::Integer);
    assert_eq!(toks[1].literal, "4");
}

#[test]
fn test_integer_has_no_sign_or_decimal_point() {
    assert_eq!(
        kinds("1.5"),
        vec![
            TokenKind::Integer,
            TokenKind::PathDot,
            TokenKind::Integer,
            TokenKind::Eof
        ]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_literal_is_verbatim() {
    let toks = tokens(r#""0.0.0.0/0""#);
    assert_eq!(toks[0].kind, TokenKind::String);
    assert_eq!(toks[0].literal, "0.0.0.0/0");
    assert_eq!(toks[1].kind, TokenKind::Eof);
}

#[test]
fn test_string_keeps_spaces_and_symbols() {
    let toks = tokens(r#""a b | c == d""#);
    assert_eq!(toks[0].literal, "a b | c == d");
}

#[test]
fn test_unterminated_string_returns_what_was_read() {
    let toks = tokens(r#""eth1"#);
    assert_eq!(toks[0].kind, TokenKind::String);
    assert_eq!(toks[0].literal, "eth1");
    assert_eq!(toks[1].kind, TokenKind::Eof);
}

#[test]
fn test_empty_string() {
    let toks = tokens(r#""""#);
    assert_eq!(toks[0].kind, TokenKind::String);
    assert_eq!(toks[0].literal, "");
}

// ============================================================================
// Illegal Characters and Whitespace
// ============================================================================

#[test]
fn test_illegal_character_becomes_token() {
    let toks = tokens("a$b");
    assert_eq!(toks[1].kind, TokenKind::Illegal);
    assert_eq!(toks[1].literal, "$");
    assert_eq!(toks[2].kind, TokenKind::Identifier);
}

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(
        kinds("  a \t|\n b "),
        vec![
            TokenKind::Identifier,
            TokenKind::Pipe,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_eof_is_repeatable() {
    let mut lexer = Lexer::new("a");
    lexer.next_token();
    for _ in 0..3 {
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}

#[test]
fn test_empty_input() {
    let mut lexer = Lexer::new("");
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Eof);
    assert_eq!(token.position, Position::new(0));
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_positions_are_columns_of_first_char() {
    let toks = tokens(r#"interfaces.name=="eth1""#);
    let positions: Vec<usize> = toks.iter().map(|t| t.position.column).collect();
    // interfaces . name == "eth1" EOF
    assert_eq!(positions, vec![1, 11, 12, 16, 18, 23]);
}

#[test]
fn test_positions_count_whitespace() {
    let toks = tokens(" a | b ");
    let positions: Vec<usize> = toks.iter().map(|t| t.position.column).collect();
    assert_eq!(positions, vec![2, 4, 6, 7]);
}

#[test]
fn test_full_expression() {
    let toks = tokens(r#"routes.running.0 | routes.running.next-hop-interface="br1""#);
    let expected = vec![
        (TokenKind::Identifier, "routes"),
        (TokenKind::PathDot, "."),
        (TokenKind::Identifier, "running"),
        (TokenKind::PathDot, "."),
        (TokenKind::Integer, "0"),
        (TokenKind::Pipe, "|"),
        (TokenKind::Identifier, "routes"),
        (TokenKind::PathDot, "."),
        (TokenKind::Identifier, "running"),
        (TokenKind::PathDot, "."),
        (TokenKind::Identifier, "next-hop-interface"),
        (TokenKind::Assign, "="),
        (TokenKind::String, "br1"),
        (TokenKind::Eof, ""),
    ];
    let actual: Vec<(TokenKind, &str)> = toks.iter().map(|t| (t.kind, t.literal.as_str())).collect();
    assert_eq!(actual, expected);
}

// ============================================================================
// Readers
// ============================================================================

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
    }
}

#[test]
fn test_from_reader() {
    let mut lexer = Lexer::from_reader("a.b".as_bytes()).unwrap();
    assert_eq!(lexer.next_token().literal, "a");
    assert_eq!(lexer.next_token().kind, TokenKind::PathDot);
    assert_eq!(lexer.next_token().literal, "b");
}

#[test]
fn test_reader_failure_is_lex_error() {
    let result = Lexer::from_reader(FailingReader);
    assert!(matches!(result, Err(LexError::Read(_))));
}

#[test]
fn test_invalid_utf8_is_lex_error() {
    let bytes: &[u8] = &[b'a', 0xff, 0xfe];
    assert!(matches!(Lexer::from_reader(bytes), Err(LexError::Read(_))));
}
