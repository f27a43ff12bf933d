//! Validate a single expression

use super::CliError;
use crate::{Node, parse};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to parse
    pub expression: String,
}

/// Parses the expression, returning its AST.
pub fn execute_check(options: &CheckOptions) -> Result<Node, CliError> {
    let node = parse(&options.expression)?;
    tracing::debug!(stages = node.stages().count(), "expression is valid");
    Ok(node)
}
