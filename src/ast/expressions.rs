use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ast::EncodingError;

/// A single path segment.
///
/// # Examples
/// ```text
/// interfaces.0.name   // [Identifier("interfaces"), Index(0), Identifier("name")]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StepRepr", into = "StepRepr")]
pub enum Step {
    /// Positional lookup into a sequence
    Index(usize),

    /// Key lookup into a mapping
    Identifier(String),
}

impl Step {
    pub fn identifier(name: impl Into<String>) -> Self {
        Step::Identifier(name.into())
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Step::Identifier(name) => Some(name),
            Step::Index(_) => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Index(idx) => write!(f, "{}", idx),
            Step::Identifier(name) => f.write_str(name),
        }
    }
}

/// Renders a path the way it is written, e.g. `routes.running.0`.
pub fn display_path(path: &[Step]) -> String {
    path.iter()
        .map(Step::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// A resolved scalar used for equality tests and field replacement.
///
/// Quoted strings in an expression produce [`Literal::String`]; numbers only
/// arise from resolving a path down to a number in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// One side of an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArgumentRepr", into = "ArgumentRepr")]
pub enum Argument {
    /// Standalone quoted string
    Literal(Literal),

    /// Dotted path of identifiers and indexes
    Path(Vec<Step>),
}

impl Argument {
    pub fn as_path(&self) -> Option<&[Step]> {
        match self {
            Argument::Path(path) => Some(path),
            Argument::Literal(_) => None,
        }
    }
}

/// Expression operators.
///
/// Encoded as small integers in the interchange format, where `0` (or an absent
/// code) still means [`Operator::Filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Select (`==`), also used when an expression has a single argument
    #[default]
    Filter,
    /// Replace (`=`)
    Replace,
    /// Merge (`+`); parsed but has no evaluation semantics yet
    Merge,
}

impl Operator {
    pub fn code(self) -> u8 {
        match self {
            Operator::Filter => 1,
            Operator::Replace => 2,
            Operator::Merge => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, EncodingError> {
        match code {
            0 | 1 => Ok(Operator::Filter),
            2 => Ok(Operator::Replace),
            3 => Ok(Operator::Merge),
            other => Err(EncodingError::UnknownOperator(other)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Filter => "==",
            Operator::Replace => "=",
            Operator::Merge => "+",
        };
        f.write_str(symbol)
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Operator::from_code(code).map_err(serde::de::Error::custom)
    }
}

/// An operator applied to a left-hand path and an optional right-hand side.
///
/// # Examples
/// ```text
/// interfaces                      // Filter, no rhs
/// interfaces.name=="eth1"         // Filter, rhs literal
/// routes.running.table-id=main.id // Replace, rhs path
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExpressionRepr", into = "ExpressionRepr")]
pub struct Expression {
    pub operator: Operator,
    pub lhs: Argument,
    pub rhs: Option<Argument>,
}

impl Expression {
    pub fn new(operator: Operator, lhs: Argument, rhs: Option<Argument>) -> Self {
        Expression { operator, lhs, rhs }
    }

    /// Arguments in source order, one or two of them.
    pub fn arguments(&self) -> impl Iterator<Item = &Argument> {
        std::iter::once(&self.lhs).chain(self.rhs.as_ref())
    }
}

// Wire shapes. Every optional field is omitted when empty, so a node encodes as
// `{"expression":{"op":1,"args":[{"path":[{"ident":"a"}]}]}}`.

#[derive(Serialize, Deserialize)]
struct StepRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    idx: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ident: Option<String>,
}

impl TryFrom<StepRepr> for Step {
    type Error = EncodingError;

    fn try_from(repr: StepRepr) -> Result<Self, Self::Error> {
        match (repr.idx, repr.ident) {
            (Some(idx), None) => Ok(Step::Index(idx)),
            (None, Some(ident)) => Ok(Step::Identifier(ident)),
            (Some(_), Some(_)) => Err(EncodingError::AmbiguousStep),
            (None, None) => Err(EncodingError::EmptyStep),
        }
    }
}

impl From<Step> for StepRepr {
    fn from(step: Step) -> Self {
        match step {
            Step::Index(idx) => StepRepr {
                idx: Some(idx),
                ident: None,
            },
            Step::Identifier(ident) => StepRepr {
                idx: None,
                ident: Some(ident),
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Integer(i64),
    Float(f64),
}

#[derive(Serialize, Deserialize)]
struct ArgumentRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num: Option<NumberRepr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<Vec<Step>>,
}

impl TryFrom<ArgumentRepr> for Argument {
    type Error = EncodingError;

    fn try_from(repr: ArgumentRepr) -> Result<Self, Self::Error> {
        match (repr.num, repr.string, repr.path) {
            (Some(NumberRepr::Integer(n)), None, None) => Ok(Argument::Literal(Literal::Integer(n))),
            (Some(NumberRepr::Float(n)), None, None) => Ok(Argument::Literal(Literal::Float(n))),
            (None, Some(s), None) => Ok(Argument::Literal(Literal::String(s))),
            (None, None, Some(path)) if !path.is_empty() => Ok(Argument::Path(path)),
            (None, None, Some(_)) => Err(EncodingError::EmptyPath),
            (None, None, None) => Err(EncodingError::EmptyArgument),
            _ => Err(EncodingError::AmbiguousArgument),
        }
    }
}

impl From<Argument> for ArgumentRepr {
    fn from(argument: Argument) -> Self {
        let mut repr = ArgumentRepr {
            num: None,
            string: None,
            path: None,
        };
        match argument {
            Argument::Literal(Literal::Integer(n)) => repr.num = Some(NumberRepr::Integer(n)),
            Argument::Literal(Literal::Float(n)) => repr.num = Some(NumberRepr::Float(n)),
            Argument::Literal(Literal::String(s)) => repr.string = Some(s),
            Argument::Path(path) => repr.path = Some(path),
        }
        repr
    }
}

#[derive(Serialize, Deserialize)]
struct ExpressionRepr {
    #[serde(default)]
    op: Operator,
    args: Vec<Argument>,
}

impl TryFrom<ExpressionRepr> for Expression {
    type Error = EncodingError;

    fn try_from(repr: ExpressionRepr) -> Result<Self, Self::Error> {
        let count = repr.args.len();
        let mut args = repr.args.into_iter();
        match (args.next(), args.next(), args.next()) {
            (Some(lhs), rhs, None) => Ok(Expression::new(repr.op, lhs, rhs)),
            _ => Err(EncodingError::ArgumentCount(count)),
        }
    }
}

impl From<Expression> for ExpressionRepr {
    fn from(expression: Expression) -> Self {
        let mut args = vec![expression.lhs];
        args.extend(expression.rhs);
        ExpressionRepr {
            op: expression.operator,
            args,
        }
    }
}
