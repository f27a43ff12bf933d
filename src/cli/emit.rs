//! Resolve a matchers file against a document

use indexmap::IndexMap;

use super::{CliError, DocumentFormat, parse_document};
use crate::{Ast, Emitter, EvalError, Resolved, parse_matchers};

/// Options for the emit command
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Matchers file content: a mapping of matcher name to expression
    pub matchers: String,
    /// Format of the matchers file
    pub matchers_format: DocumentFormat,
    /// Document content
    pub input: Option<String>,
    /// Format of the document
    pub input_format: DocumentFormat,
    /// Only resolve these matchers (and what they reference); all when empty
    pub names: Vec<String>,
    /// Report failing matchers instead of aborting on the first one
    pub keep_going: bool,
}

/// Result of an emit operation
#[derive(Debug, Default)]
pub struct EmitOutput {
    /// Values of the requested matchers, in request order
    pub resolved: Resolved,
    /// Matchers that failed, only filled with `keep_going`
    pub failures: IndexMap<String, EvalError>,
}

/// Reads a matchers file into an AST, keeping the file's order.
pub fn load_matchers(text: &str, format: DocumentFormat) -> Result<Ast, CliError> {
    let expressions: IndexMap<String, String> = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };
    if expressions.is_empty() {
        return Err(CliError::NoMatchers);
    }
    Ok(parse_matchers(expressions)?)
}

/// Execute an emit operation
pub fn execute_emit(options: &EmitOptions) -> Result<EmitOutput, CliError> {
    let ast = load_matchers(&options.matchers, options.matchers_format)?;

    let text = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document = parse_document(text, options.input_format)?;

    let names: Vec<String> = if options.names.is_empty() {
        ast.keys().cloned().collect()
    } else {
        options.names.clone()
    };
    tracing::debug!(matchers = ast.len(), requested = names.len(), "emitting matchers");

    let mut emitter = Emitter::new(&ast, &document);
    let mut output = EmitOutput::default();
    for name in names {
        match emitter.resolve(&name) {
            Ok(value) => {
                output.resolved.insert(name, value);
            }
            Err(e) if options.keep_going => {
                tracing::warn!(matcher = name.as_str(), error = %e, "matcher failed");
                output.failures.insert(name, e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(output)
}
