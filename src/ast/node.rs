use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ast::Expression;

/// One pipe stage plus the stage that consumes its output.
///
/// A matcher is a singly linked pipeline of nodes:
///
/// ```text
/// matchers.base | routes.running.next-hop-interface="br1"
/// ```
///
/// parses into a node for `matchers.base` whose `pipe` holds the replace stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub expression: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe: Option<Box<Node>>,
}

impl Node {
    pub fn new(expression: Expression) -> Self {
        Node {
            expression,
            pipe: None,
        }
    }

    /// Links stages left to right: `first` becomes the root node and each
    /// following stage is appended at the current tail.
    pub fn pipeline(first: Expression, rest: Vec<Expression>) -> Node {
        let pipe = rest.into_iter().rev().fold(None, |next, expression| {
            Some(Box::new(Node {
                expression,
                pipe: next,
            }))
        });
        Node {
            expression: first,
            pipe,
        }
    }

    /// Iterates over the stages of the pipeline starting at this node.
    pub fn stages(&self) -> Stages<'_> {
        Stages { next: Some(self) }
    }
}

pub struct Stages<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Stages<'a> {
    type Item = &'a Expression;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.pipe.as_deref();
        Some(&node.expression)
    }
}

/// Parsed matchers by name, in declaration order.
pub type Ast = IndexMap<String, Node>;
