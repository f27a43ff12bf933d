use std::io::Read;

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    ast::{Argument, Ast, Expression, Literal, Node, Operator, Step, Token, TokenKind},
    lexer::{LexError, Lexer, Position},
};

/// Errors raised while parsing an expression.
///
/// Parsing stops at the first malformed token; every variant carries that
/// token's column and literal text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("bad expression ({position}, lit {literal}): cannot start with dot")]
    LeadingDot { position: Position, literal: String },

    #[error("bad expression ({position}, lit {literal}): just one dot can be used")]
    DoubleDot { position: Position, literal: String },

    #[error(
        "bad expression ({position}, lit {literal}): only dot with identifiers or integer can be used on path expression"
    )]
    DotAfterString { position: Position, literal: String },

    #[error("bad expression ({position}, lit {literal}): path cannot end with dot")]
    TrailingDot { position: Position, literal: String },

    #[error("bad expression ({position}, lit {literal}): path segments must be separated by dot")]
    MissingDot { position: Position, literal: String },

    #[error("bad expression ({position}, lit {literal}): path expressions and strings cannot be mixed")]
    MixedStringAndPath { position: Position, literal: String },

    #[error("bad expression ({position}, lit {literal}): illegal character")]
    IllegalCharacter { position: Position, literal: String },

    #[error("bad expression ({position}, lit {literal}): invalid index")]
    InvalidIndex { position: Position, literal: String },

    #[error("bad expression ({position}, lit {literal}): missing argument")]
    EmptyArgument { position: Position, literal: String },

    #[error("bad expression ({position}, lit {literal}): one operator per pipe stage")]
    ChainedOperator { position: Position, literal: String },
}

impl ParseError {
    /// Column of the offending token, if the error came from a token.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Lex(_) => None,
            ParseError::LeadingDot { position, .. }
            | ParseError::DoubleDot { position, .. }
            | ParseError::DotAfterString { position, .. }
            | ParseError::TrailingDot { position, .. }
            | ParseError::MissingDot { position, .. }
            | ParseError::MixedStringAndPath { position, .. }
            | ParseError::IllegalCharacter { position, .. }
            | ParseError::InvalidIndex { position, .. }
            | ParseError::EmptyArgument { position, .. }
            | ParseError::ChainedOperator { position, .. } => Some(*position),
        }
    }
}

/// A parse failure attributed to the matcher whose expression failed.
#[derive(Debug, Error)]
#[error("matcher {name}: {source}")]
pub struct MatcherParseError {
    pub name: String,
    #[source]
    pub source: ParseError,
}

pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser { lexer }
    }

    /// Scans one argument, returning it along with the token that ended it:
    /// an operator, a pipe or the end of input.
    fn parse_argument(&mut self) -> Result<(Argument, Token), ParseError> {
        let mut path: Vec<Step> = Vec::new();
        let mut string: Option<String> = None;
        let mut last: Option<TokenKind> = None;

        let terminator = loop {
            let token = self.lexer.next_token();
            let Token {
                position,
                kind,
                literal,
            } = token.clone();

            match kind {
                TokenKind::Assign
                | TokenKind::Equal
                | TokenKind::Merge
                | TokenKind::Pipe
                | TokenKind::Eof => break token,

                TokenKind::Identifier | TokenKind::Integer => {
                    match last {
                        Some(TokenKind::String) => {
                            return Err(ParseError::MixedStringAndPath { position, literal });
                        }
                        Some(TokenKind::Identifier) | Some(TokenKind::Integer) => {
                            return Err(ParseError::MissingDot { position, literal });
                        }
                        _ => {}
                    }

                    if kind == TokenKind::Identifier {
                        path.push(Step::Identifier(literal));
                    } else {
                        match literal.parse::<usize>() {
                            Ok(idx) => path.push(Step::Index(idx)),
                            Err(_) => return Err(ParseError::InvalidIndex { position, literal }),
                        }
                    }
                }

                TokenKind::PathDot => match last {
                    Some(TokenKind::Identifier) | Some(TokenKind::Integer) => {}
                    None => return Err(ParseError::LeadingDot { position, literal }),
                    Some(TokenKind::PathDot) => {
                        return Err(ParseError::DoubleDot { position, literal });
                    }
                    Some(_) => return Err(ParseError::DotAfterString { position, literal }),
                },

                TokenKind::String => {
                    if last.is_some() {
                        return Err(ParseError::MixedStringAndPath { position, literal });
                    }
                    string = Some(literal);
                }

                TokenKind::Illegal => {
                    return Err(ParseError::IllegalCharacter { position, literal });
                }
            }
            last = Some(kind);
        };

        let Token {
            position, literal, ..
        } = terminator.clone();
        match (last, string) {
            (None, _) => Err(ParseError::EmptyArgument { position, literal }),
            (Some(TokenKind::PathDot), _) => Err(ParseError::TrailingDot { position, literal }),
            (_, Some(s)) => Ok((Argument::Literal(Literal::String(s)), terminator)),
            (_, None) => Ok((Argument::Path(path), terminator)),
        }
    }

    fn parse_node(&mut self) -> Result<(Expression, Token), ParseError> {
        let (lhs, terminator) = self.parse_argument()?;

        let operator = match terminator.kind {
            TokenKind::Assign => Operator::Replace,
            TokenKind::Equal => Operator::Filter,
            TokenKind::Merge => Operator::Merge,
            _ => return Ok((Expression::new(Operator::Filter, lhs, None), terminator)),
        };

        let (rhs, terminator) = self.parse_argument()?;
        if terminator.kind.is_operator() {
            return Err(ParseError::ChainedOperator {
                position: terminator.position,
                literal: terminator.literal,
            });
        }
        Ok((Expression::new(operator, lhs, Some(rhs)), terminator))
    }

    /// Parses a complete pipeline.
    ///
    /// # Examples
    ///
    /// ```
    /// use matchers_lang::{Lexer, Parser};
    ///
    /// let mut parser = Parser::new(Lexer::new(r#"interfaces.name=="eth1" | interfaces"#));
    /// let node = parser.parse().unwrap();
    /// assert_eq!(node.stages().count(), 2);
    /// ```
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let (first, mut terminator) = self.parse_node()?;

        let mut rest = Vec::new();
        while terminator.kind == TokenKind::Pipe {
            let (expression, next) = self.parse_node()?;
            rest.push(expression);
            terminator = next;
        }

        tracing::trace!(stages = rest.len() + 1, "parsed pipeline");
        Ok(Node::pipeline(first, rest))
    }
}

/// Parses a single expression.
pub fn parse(expression: &str) -> Result<Node, ParseError> {
    Parser::new(Lexer::new(expression)).parse()
}

/// Parses a single expression read from `reader`.
pub fn parse_reader<R: Read>(reader: R) -> Result<Node, ParseError> {
    let lexer = Lexer::from_reader(reader)?;
    Parser::new(lexer).parse()
}

/// Parses named expressions into an [`Ast`], keeping their order.
///
/// # Examples
///
/// ```
/// use matchers_lang::parser::parse_matchers;
///
/// let ast = parse_matchers([
///     ("default-gw", r#"routes.running.destination=="0.0.0.0/0""#),
///     ("gw-iface", "matchers.default-gw.routes.running.0.next-hop-interface"),
/// ])
/// .unwrap();
/// assert_eq!(ast.len(), 2);
/// ```
pub fn parse_matchers<I, K, V>(expressions: I) -> Result<Ast, MatcherParseError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let mut ast = IndexMap::new();
    for (name, expression) in expressions {
        let name = name.into();
        match parse(expression.as_ref()) {
            Ok(node) => {
                ast.insert(name, node);
            }
            Err(source) => return Err(MatcherParseError { name, source }),
        }
    }
    Ok(ast)
}
