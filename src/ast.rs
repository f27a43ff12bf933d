//! # Matchers Language - Abstract Syntax Tree
//!
//! The AST is the contract between the [`Parser`](crate::Parser) and the
//! [`Emitter`](crate::Emitter). It has no behavior of its own beyond
//! construction helpers and the interchange encoding.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Steps, arguments, operators and expressions
//! - **[node]** - Pipelines of expressions and the name to pipeline mapping
//!
//! ## Quick Start
//!
//! ```text
//! interfaces.name=="eth1"
//! ```
//!
//! selects the interfaces named `eth1`.
//!
//! ## Core Concepts
//!
//! ### Paths
//!
//! A path is a dotted list of identifiers (mapping keys) and integers
//! (sequence positions). Identifiers may contain hyphens: `next-hop-interface`.
//!
//! ### Operators
//!
//! - **Filter** `==` - keep the elements whose field equals the right-hand side
//! - **Replace** `=` - set the field on every element
//! - **Merge** `+` - reserved, fails at evaluation
//!
//! ### Pipes
//!
//! ```text
//! stage | stage | ...
//! ```
//!
//! Each stage reads the document produced by the stage before it.
//!
//! ### Matcher References
//!
//! A path starting with `matchers.<name>` reads the result of another matcher:
//!
//! ```text
//! interfaces.name==matchers.default-gw.routes.running.0.next-hop-interface
//! ```
//!
//! ## Interchange Encoding
//!
//! Nodes serialize with serde as
//! `{expression: {op, args: [{num?|string?|path?: [{idx?|ident?}]}]}, pipe?}`,
//! with `op` 1 = Filter, 2 = Replace, 3 = Merge.
pub mod expressions;
pub mod node;
pub mod tokens;

pub use expressions::{Argument, Expression, Literal, Operator, Step, display_path};
pub use node::{Ast, Node, Stages};
pub use tokens::{Token, TokenKind};

use thiserror::Error;

/// Errors raised while decoding an AST from its interchange encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("step cannot contain both index and identifier")]
    AmbiguousStep,

    #[error("step must contain an index or an identifier")]
    EmptyStep,

    #[error("argument must contain exactly one of num, string or path")]
    AmbiguousArgument,

    #[error("argument must contain a num, a string or a path")]
    EmptyArgument,

    #[error("argument path cannot be empty")]
    EmptyPath,

    #[error("expression takes one or two arguments, got {0}")]
    ArgumentCount(usize),

    #[error("unknown operator code {0}")]
    UnknownOperator(u8),
}
