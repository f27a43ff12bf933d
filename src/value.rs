use indexmap::IndexMap;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{Serialize, Serializer, ser::SerializeMap, ser::SerializeSeq};

use crate::ast::Literal;

/// A document value: the tree matchers navigate and rewrite.
///
/// This is a closed set of shapes; navigation matches on it exhaustively and
/// reports a type mismatch instead of guessing.
///
/// Mappings keep insertion order, so a pruned result lists its keys in the
/// same order as the source document.
///
/// # Examples
///
/// ```
/// use matchers_lang::Value;
/// use indexmap::IndexMap;
///
/// let mut iface = IndexMap::new();
/// iface.insert("name".to_string(), Value::from("eth1"));
/// iface.insert("mtu".to_string(), Value::Integer(1500));
///
/// let interfaces = Value::Array(vec![Value::Object(iface)]);
/// assert_eq!(interfaces.type_name(), "sequence");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,

    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number, kept apart from floats
    Integer(i64),

    String(String),

    /// Sequence of values
    Array(Vec<Value>),

    /// Mapping with string keys
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Human-readable shape name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "sequence",
            Value::Object(_) => "mapping",
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Converts a string or number into a [`Literal`]; other shapes yield `None`.
    pub fn to_literal(&self) -> Option<Literal> {
        match self {
            Value::String(s) => Some(Literal::String(s.clone())),
            Value::Integer(n) => Some(Literal::Integer(*n)),
            Value::Float(n) => Some(Literal::Float(*n)),
            _ => None,
        }
    }

    /// Same-type equality against a literal.
    ///
    /// Strings only equal strings and numbers only equal numbers. Integers and
    /// floats compare by exact decimal value, so `1` equals `1.0`.
    pub fn matches_literal(&self, literal: &Literal) -> bool {
        match (self, literal) {
            (Value::String(a), Literal::String(b)) => a == b,
            (Value::Integer(a), Literal::Integer(b)) => a == b,
            (Value::Float(a), Literal::Float(b)) => a == b,
            (Value::Integer(a), Literal::Float(b)) | (Value::Float(b), Literal::Integer(a)) => {
                match (Decimal::from_i64(*a), Decimal::from_f64(*b)) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Integer(n) => Value::Integer(n),
            Literal::Float(n) => Value::Float(n),
            Literal::String(s) => Value::String(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}
