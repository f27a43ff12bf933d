//! Rendering of resolved values and parsed matchers.
//!
//! Anything serde can serialize goes through here: [`Value`](crate::Value)s,
//! the resolved name to value mapping, a single [`Node`](crate::Node) or a
//! whole [`Ast`](crate::Ast) in its interchange encoding.
//!
//! Mapping keys keep the order they had in the source document.
//!
//! # Examples
//!
//! ```
//! use matchers_lang::Value;
//! use matchers_lang::output::{to_json, to_json_pretty};
//!
//! let value = Value::Integer(42);
//!
//! assert_eq!(to_json(&value).unwrap(), "42");
//! assert_eq!(to_json_pretty(&value).unwrap(), "42");
//! ```

use serde::Serialize;

/// Compact JSON, no whitespace.
///
/// # Examples
///
/// ```
/// use matchers_lang::{output::to_json, parse};
///
/// let node = parse("interfaces").unwrap();
/// assert_eq!(
///     to_json(&node).unwrap(),
///     r#"{"expression":{"op":1,"args":[{"path":[{"ident":"interfaces"}]}]}}"#
/// );
/// ```
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// JSON with 2-space indentation.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// YAML document, the format the matched documents usually come in.
pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}
