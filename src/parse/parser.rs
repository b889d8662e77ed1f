use tracing::{trace, warn};

use crate::{Ast, EmptyExpressionPolicy, LogicalOp, Node, RuleEngine};

use super::error::ParseError;
use super::grammar::{split_condition, tokenize, Token};

/// Entries of the pending-operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Open,
    Op(LogicalOp),
}

/// Operator-precedence (shunting-yard) construction of a rule tree.
///
/// Both stacks are local to the call; nodes are moved into their parents and
/// never touched again once built. Each node on the stack carries its depth
/// so the engine's depth limit is enforced while the tree grows.
pub(crate) fn build_ast(rule: &str, engine: &RuleEngine) -> Result<Ast, ParseError> {
    let tokens = tokenize(rule);
    trace!(rule, ?tokens, "tokenized rule");

    let limit = engine.max_depth();
    let mut pending: Vec<Pending> = Vec::new();
    let mut nodes: Vec<(Node, usize)> = Vec::new();

    for token in tokens {
        match token {
            Token::Operand(text) => {
                split_condition(text)?;
                nodes.push((Node::operand(text), 1));
            }
            Token::Open => pending.push(Pending::Open),
            Token::Close => loop {
                match pending.pop() {
                    Some(Pending::Op(op)) => reduce(op, &mut nodes, limit)?,
                    Some(Pending::Open) => break,
                    None => return Err(unbalanced(rule)),
                }
            },
            Token::Op(incoming) => {
                // Equal precedence pops first: both operators are left-associative.
                while let Some(&Pending::Op(top)) = pending.last() {
                    if top.precedence() < incoming.precedence() {
                        break;
                    }
                    pending.pop();
                    reduce(top, &mut nodes, limit)?;
                }
                pending.push(Pending::Op(incoming));
            }
        }
    }

    while let Some(entry) = pending.pop() {
        match entry {
            Pending::Op(op) => reduce(op, &mut nodes, limit)?,
            Pending::Open => return Err(unbalanced(rule)),
        }
    }

    let mut nodes = nodes.into_iter();
    match nodes.next() {
        Some((root, _)) => {
            if nodes.len() > 0 {
                warn!(
                    rule,
                    dropped = nodes.len(),
                    "conditions not joined by AND/OR were ignored"
                );
            }
            Ok(Ast::new(root))
        }
        None => match engine.empty_expressions() {
            EmptyExpressionPolicy::Lenient => Ok(Ast::empty()),
            EmptyExpressionPolicy::Reject => Err(ParseError::EmptyExpression {
                rule: rule.to_owned(),
            }),
        },
    }
}

/// Pop two nodes and push them joined under `op`. An operator without two
/// operands to join is dropped.
fn reduce(op: LogicalOp, nodes: &mut Vec<(Node, usize)>, limit: usize) -> Result<(), ParseError> {
    if nodes.len() < 2 {
        trace!(%op, "operator without two operands discarded");
        return Ok(());
    }
    if let (Some((right, right_depth)), Some((left, left_depth))) = (nodes.pop(), nodes.pop()) {
        let depth = 1 + left_depth.max(right_depth);
        if depth > limit {
            return Err(ParseError::TooDeep { limit });
        }
        nodes.push((Node::join(op, left, right), depth));
    }
    Ok(())
}

fn unbalanced(rule: &str) -> ParseError {
    ParseError::UnbalancedParentheses {
        rule: rule.to_owned(),
    }
}
