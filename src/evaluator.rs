use std::borrow::Cow;

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    ast::{Argument, Ast, Expression, Literal, Node, Operator, Step, display_path},
    transform::{filter, navigate, replace},
    value::Value,
};

/// First path segment that refers to another matcher: `matchers.<name>...`.
pub const MATCHERS_KEYWORD: &str = "matchers";

/// Resolved matcher values by name.
pub type Resolved = IndexMap<String, Value>;

/// Errors that can occur while resolving matchers.
///
/// A failure propagates unchanged through pipe stages and through every
/// matcher that references the failing one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("bad filter expression: left argument must be a path")]
    LeftArgumentNotPath,

    #[error("bad path expression: path cannot be empty")]
    EmptyPath,

    /// A mapping lookup, or an element field during filter, found nothing
    #[error("bad path expression: {step} does not exist")]
    PathNotFound { step: String },

    #[error("bad path expression: index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Navigation reached a value of the wrong shape
    #[error("bad path expression: cannot walk {step} through a {found}, expected a {expected}")]
    TypeMismatch {
        step: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A right-hand path resolved to something other than a string or number
    #[error("path {path} resolved to a {found}, only strings and numbers can be compared or assigned")]
    UnsupportedLiteral { path: String, found: &'static str },

    #[error("bad path expression: terminal step only accepts identifier, got index {index}")]
    TerminalIndex { index: usize },

    #[error("bad path expression: matchers must be followed by a matcher name")]
    ReservedWord,

    #[error("unknown matcher {0}")]
    UnknownMatcher(String),

    /// A matcher depends on itself, directly or transitively
    #[error("matcher cycle detected: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("{0} operator is not implemented")]
    NotImplemented(&'static str),
}

/// One resolution session over a document.
///
/// The emitter resolves named matchers from an [`Ast`] against a document and
/// caches every result, so a matcher referenced several times, or resolved
/// before or after the matchers that reference it, yields the same value. The
/// cache only grows during a session.
///
/// # Examples
///
/// ```
/// use matchers_lang::{Emitter, Value, parser::parse_matchers};
/// use indexmap::IndexMap;
///
/// let ast = parse_matchers([("eth1", r#"interfaces.name=="eth1""#)]).unwrap();
///
/// let mut iface = IndexMap::new();
/// iface.insert("name".to_string(), Value::from("eth1"));
/// let mut doc = IndexMap::new();
/// doc.insert("interfaces".to_string(), Value::Array(vec![Value::Object(iface)]));
/// let doc = Value::Object(doc);
///
/// let mut emitter = Emitter::new(&ast, &doc);
/// let eth1 = emitter.resolve("eth1").unwrap();
/// assert_eq!(eth1.as_object().unwrap()["interfaces"].as_array().unwrap().len(), 1);
/// ```
pub struct Emitter<'a> {
    ast: &'a Ast,
    document: &'a Value,
    resolved: Resolved,
    /// Matchers currently being resolved, outermost first.
    in_progress: Vec<String>,
}

impl<'a> Emitter<'a> {
    pub fn new(ast: &'a Ast, document: &'a Value) -> Self {
        Emitter {
            ast,
            document,
            resolved: IndexMap::new(),
            in_progress: Vec::new(),
        }
    }

    /// Resolves one matcher, resolving the matchers it references first.
    pub fn resolve(&mut self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.resolved.get(name) {
            tracing::debug!(matcher = name, "matcher served from cache");
            return Ok(value.clone());
        }

        if self.in_progress.iter().any(|n| n == name) {
            let mut chain = self.in_progress.clone();
            chain.push(name.to_string());
            return Err(EvalError::Cycle { chain });
        }

        let ast = self.ast;
        let node = ast
            .get(name)
            .ok_or_else(|| EvalError::UnknownMatcher(name.to_string()))?;

        tracing::debug!(matcher = name, "resolving matcher");
        self.in_progress.push(name.to_string());
        let result = self.eval_pipeline(node);
        self.in_progress.pop();

        let value = result?;
        self.resolved.insert(name.to_string(), value.clone());
        tracing::debug!(matcher = name, "matcher resolved");
        Ok(value)
    }

    /// Resolves every matcher of the AST, failing on the first error.
    ///
    /// The result lists matchers in declaration order.
    pub fn emit_all(mut self) -> Result<Resolved, EvalError> {
        let ast = self.ast;
        for name in ast.keys() {
            self.resolve(name)?;
        }

        let mut resolved = self.resolved;
        resolved.sort_by(|a, _, b, _| ast.get_index_of(a).cmp(&ast.get_index_of(b)));
        Ok(resolved)
    }

    /// Resolves every matcher of the AST independently.
    ///
    /// A failing matcher only fails itself and the matchers depending on it;
    /// the others still resolve.
    pub fn emit_each(&mut self) -> IndexMap<String, Result<Value, EvalError>> {
        let ast = self.ast;
        ast.keys()
            .map(|name| {
                let result = self.resolve(name);
                if let Err(e) = &result {
                    tracing::debug!(matcher = name.as_str(), error = %e, "matcher failed");
                }
                (name.clone(), result)
            })
            .collect()
    }

    /// Values resolved so far in this session.
    pub fn resolved(&self) -> &Resolved {
        &self.resolved
    }

    pub fn into_resolved(self) -> Resolved {
        self.resolved
    }

    /// Runs the stages of a pipeline, feeding each stage the previous output.
    fn eval_pipeline(&mut self, node: &Node) -> Result<Value, EvalError> {
        let mut current = self.eval_expression(&node.expression, self.document)?;

        let mut next = node.pipe.as_deref();
        while let Some(stage) = next {
            current = self.eval_expression(&stage.expression, &current)?;
            next = stage.pipe.as_deref();
        }
        Ok(current)
    }

    fn eval_expression(&mut self, expression: &Expression, input: &Value) -> Result<Value, EvalError> {
        tracing::trace!(operator = %expression.operator, "evaluating stage");

        if expression.operator == Operator::Merge {
            return Err(EvalError::NotImplemented("merge"));
        }

        let lhs = expression
            .lhs
            .as_path()
            .ok_or(EvalError::LeftArgumentNotPath)?;

        let literal = match &expression.rhs {
            Some(rhs) => Some(self.resolve_literal(rhs, input)?),
            None => None,
        };

        let (source, path) = self.substitute_matchers(input, lhs)?;
        if path.is_empty() {
            return Ok(source.into_owned());
        }

        match expression.operator {
            Operator::Filter => {
                // A bare path that lands on a scalar selects that scalar.
                if literal.is_none() {
                    if let Ok(found) = navigate(&source, path) {
                        if found.is_scalar() {
                            return Ok(found.clone());
                        }
                    }
                }
                filter(&source, path, literal.as_ref())
            }
            Operator::Replace => replace(&source, path, literal.as_ref()),
            Operator::Merge => Err(EvalError::NotImplemented("merge")),
        }
    }

    /// Turns a right-hand argument into the literal to compare or assign.
    fn resolve_literal(&mut self, argument: &Argument, input: &Value) -> Result<Literal, EvalError> {
        match argument {
            Argument::Literal(literal) => Ok(literal.clone()),
            Argument::Path(path) => {
                let (source, rest) = self.substitute_matchers(input, path)?;
                let found = navigate(&source, rest)?;
                found.to_literal().ok_or_else(|| EvalError::UnsupportedLiteral {
                    path: display_path(path),
                    found: found.type_name(),
                })
            }
        }
    }

    /// Swaps `matchers.<name>` for the resolved value of that matcher.
    ///
    /// Returns the value the rest of the path applies to, and that rest.
    fn substitute_matchers<'v, 'p>(
        &mut self,
        input: &'v Value,
        path: &'p [Step],
    ) -> Result<(Cow<'v, Value>, &'p [Step]), EvalError> {
        match path {
            [Step::Identifier(keyword), rest @ ..] if keyword == MATCHERS_KEYWORD => match rest {
                [Step::Identifier(name), rest @ ..] => {
                    let value = self.resolve(name)?;
                    Ok((Cow::Owned(value), rest))
                }
                _ => Err(EvalError::ReservedWord),
            },
            _ => Ok((Cow::Borrowed(input), path)),
        }
    }
}

/// Resolves every matcher of `ast` against `document` in one session.
pub fn emit(ast: &Ast, document: &Value) -> Result<Resolved, EvalError> {
    Emitter::new(ast, document).emit_all()
}
