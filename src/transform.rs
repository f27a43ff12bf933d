//! Path walks over document values.
//!
//! Both walks descend through every step but the last and rebuild only the
//! branch they walked through, dropping sibling keys and elements:
//!
//! ```text
//! routes.running.destination=="0.0.0.0/0"
//!
//! {routes: {running: [...], config: [...]}, interfaces: [...]}
//!   => {routes: {running: [<matching routes>]}}
//! ```
//!
//! The last step names a field of every element of the sequence reached by the
//! walk. [`filter`] keeps the elements whose field equals the literal,
//! [`replace`] sets the field on all of them.

use indexmap::IndexMap;

use crate::{
    ast::{Literal, Step},
    evaluator::EvalError,
    value::Value,
};

/// Looks up a single step.
///
/// # Examples
/// - `Identifier("routes")` on a mapping → the `routes` entry
/// - `Index(0)` on a sequence → the first element
pub fn descend<'v>(value: &'v Value, step: &Step) -> Result<&'v Value, EvalError> {
    match (value, step) {
        (Value::Object(map), Step::Identifier(key)) => map
            .get(key)
            .ok_or_else(|| EvalError::PathNotFound { step: key.clone() }),
        (Value::Array(items), Step::Index(idx)) => {
            items.get(*idx).ok_or(EvalError::IndexOutOfRange {
                index: *idx,
                len: items.len(),
            })
        }
        (v, Step::Identifier(key)) => Err(EvalError::TypeMismatch {
            step: key.clone(),
            expected: "mapping",
            found: v.type_name(),
        }),
        (v, Step::Index(idx)) => Err(EvalError::TypeMismatch {
            step: idx.to_string(),
            expected: "sequence",
            found: v.type_name(),
        }),
    }
}

/// Follows every step of `path`, without pruning.
pub fn navigate<'v>(value: &'v Value, path: &[Step]) -> Result<&'v Value, EvalError> {
    path.iter().try_fold(value, |current, step| descend(current, step))
}

/// Wraps a walked result back into the shape of the step that reached it.
fn rewrap(step: &Step, value: Value) -> Value {
    match step {
        Step::Identifier(key) => {
            let mut map = IndexMap::with_capacity(1);
            map.insert(key.clone(), value);
            Value::Object(map)
        }
        Step::Index(_) => Value::Array(vec![value]),
    }
}

fn terminal_field(step: &Step) -> Result<&str, EvalError> {
    match step {
        Step::Identifier(key) => Ok(key),
        Step::Index(idx) => Err(EvalError::TerminalIndex { index: *idx }),
    }
}

fn elements<'v>(value: &'v Value, field: &str) -> Result<&'v [Value], EvalError> {
    value.as_array().ok_or_else(|| EvalError::TypeMismatch {
        step: field.to_string(),
        expected: "sequence",
        found: value.type_name(),
    })
}

fn element_fields<'v>(
    item: &'v Value,
    field: &str,
) -> Result<&'v IndexMap<String, Value>, EvalError> {
    item.as_object().ok_or_else(|| EvalError::TypeMismatch {
        step: field.to_string(),
        expected: "mapping",
        found: item.type_name(),
    })
}

/// Selects the elements whose terminal field equals `literal`.
///
/// Without a literal the value reached by the walk is returned as is: the whole
/// collection is selected. Every element must carry the field; a missing
/// field fails instead of being skipped.
pub fn filter(value: &Value, path: &[Step], literal: Option<&Literal>) -> Result<Value, EvalError> {
    match path {
        [] => Err(EvalError::EmptyPath),
        [step] => {
            let Some(literal) = literal else {
                return Ok(value.clone());
            };
            let field = terminal_field(step)?;

            let mut kept = Vec::new();
            for item in elements(value, field)? {
                let found = element_fields(item, field)?
                    .get(field)
                    .ok_or_else(|| EvalError::PathNotFound {
                        step: field.to_string(),
                    })?;
                if found.matches_literal(literal) {
                    kept.push(item.clone());
                }
            }
            Ok(Value::Array(kept))
        }
        [step, rest @ ..] => {
            let child = descend(value, step)?;
            Ok(rewrap(step, filter(child, rest, literal)?))
        }
    }
}

/// Sets the terminal field of every element to `literal`.
///
/// There is no condition: narrow the sequence with a filter stage first to
/// rewrite only some elements. The input is left untouched; the result is a
/// pruned, rewritten copy.
pub fn replace(value: &Value, path: &[Step], literal: Option<&Literal>) -> Result<Value, EvalError> {
    match path {
        [] => Err(EvalError::EmptyPath),
        [step] => {
            let Some(literal) = literal else {
                return Ok(value.clone());
            };
            let field = terminal_field(step)?;

            let mut items = elements(value, field)?.to_vec();
            for item in items.iter_mut() {
                match item {
                    Value::Object(map) => {
                        map.insert(field.to_string(), Value::from(literal.clone()));
                    }
                    other => {
                        return Err(EvalError::TypeMismatch {
                            step: field.to_string(),
                            expected: "mapping",
                            found: other.type_name(),
                        });
                    }
                }
            }
            Ok(Value::Array(items))
        }
        [step, rest @ ..] => {
            let child = descend(value, step)?;
            Ok(rewrap(step, replace(child, rest, literal)?))
        }
    }
}
