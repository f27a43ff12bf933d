//! CLI support for matchers-lang
//!
//! Provides programmatic access to the `matchers` CLI operations so other
//! tools can embed them without going through the binary.

mod check;
mod convert;
mod emit;

pub use check::{CheckOptions, execute_check};
pub use convert::{DocumentFormat, json_to_value, parse_document, yaml_to_value};
pub use emit::{EmitOptions, EmitOutput, execute_emit, load_matchers};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("parse error: {0}")]
    MatcherParse(#[from] crate::MatcherParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no input provided, use --input or pipe a document to stdin")]
    NoInput,

    #[error("matchers file defines no matchers")]
    NoMatchers,

    #[error("unsupported mapping key {0}, only scalar keys are allowed")]
    UnsupportedKey(String),

    #[error("unknown format '{0}', expected json or yaml")]
    UnknownFormat(String),

    #[error("{0} matcher(s) failed")]
    Failed(usize),
}
