pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod transform;
pub mod value;

pub use ast::{Argument, Ast, EncodingError, Expression, Literal, Node, Operator, Step, Token, TokenKind};
pub use evaluator::{EvalError, Emitter, Resolved, emit};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_json, to_json_pretty, to_yaml};
pub use parser::{MatcherParseError, ParseError, Parser, parse, parse_matchers};
pub use value::Value;
