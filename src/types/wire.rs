//! JSON-facing shape of a rule tree.
//!
//! Each node is an object with a `kind` (`"operand"` or `"operator"`), a
//! `value` (the condition text, or `"AND"`/`"OR"`) and, for operators, `left`
//! and `right` children. Documents written with the older `type` key are
//! accepted on input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ast::{LogicalOp, Node};
use crate::parse::{split_condition, ConditionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireKind {
    Operand,
    Operator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireNode {
    #[serde(alias = "type")]
    kind: WireKind,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    left: Option<Box<WireNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    right: Option<Box<WireNode>>,
}

/// Reasons a wire document is not a valid rule tree.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("operator node must have value AND or OR, got \"{0}\"")]
    UnknownOperator(String),

    #[error("operator node {op} is missing its {side} child")]
    MissingChild { op: LogicalOp, side: &'static str },

    #[error("operand node \"{0}\" must not have children")]
    UnexpectedChild(String),

    #[error(transparent)]
    Condition(#[from] ConditionError),
}

impl From<Node> for WireNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Operand(text) => WireNode {
                kind: WireKind::Operand,
                value: text,
                left: None,
                right: None,
            },
            Node::Operator { op, left, right } => WireNode {
                kind: WireKind::Operator,
                value: op.keyword().to_owned(),
                left: Some(Box::new(WireNode::from(*left))),
                right: Some(Box::new(WireNode::from(*right))),
            },
        }
    }
}

impl TryFrom<WireNode> for Node {
    type Error = WireError;

    fn try_from(wire: WireNode) -> Result<Self, Self::Error> {
        match wire.kind {
            WireKind::Operand => {
                if wire.left.is_some() || wire.right.is_some() {
                    return Err(WireError::UnexpectedChild(wire.value));
                }
                split_condition(&wire.value)?;
                Ok(Node::operand(&wire.value))
            }
            WireKind::Operator => {
                let op = LogicalOp::from_keyword(wire.value.trim())
                    .ok_or(WireError::UnknownOperator(wire.value))?;
                let left = wire
                    .left
                    .ok_or(WireError::MissingChild { op, side: "left" })?;
                let right = wire
                    .right
                    .ok_or(WireError::MissingChild { op, side: "right" })?;
                Ok(Node::join(
                    op,
                    Node::try_from(*left)?,
                    Node::try_from(*right)?,
                ))
            }
        }
    }
}
