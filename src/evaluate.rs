use std::time::Instant;

use tracing::{debug, warn};

use crate::{Ast, Comparator, Condition, Context, EvaluationReport, Node};

pub(crate) fn evaluate(ast: &Ast, ctx: &Context) -> bool {
    ast.root()
        .is_some_and(|root| eval_node(root, ctx, &mut |_, _| {}))
}

pub(crate) fn evaluate_detailed(ast: &Ast, ctx: &Context) -> EvaluationReport {
    let start = Instant::now();
    let mut conditions = Vec::new();
    let result = ast.root().is_some_and(|root| {
        eval_node(root, ctx, &mut |text, held| {
            conditions.push((text.to_owned(), held));
        })
    });
    let duration = start.elapsed();
    debug!(result, leaves = conditions.len(), ?duration, "evaluated rule");
    EvaluationReport::new(result, conditions, duration)
}

/// Post-order walk. Both children are always evaluated so `visit` sees every
/// leaf, left to right.
fn eval_node(node: &Node, ctx: &Context, visit: &mut dyn FnMut(&str, bool)) -> bool {
    match node {
        Node::Operand(text) => {
            let held = eval_condition(text, ctx);
            visit(text, held);
            held
        }
        Node::Operator { op, left, right } => {
            let left = eval_node(left, ctx, visit);
            let right = eval_node(right, ctx, visit);
            op.apply(left, right)
        }
    }
}

/// A missing attribute only satisfies `!=`.
fn eval_condition(text: &str, ctx: &Context) -> bool {
    let condition = match Condition::parse(text) {
        Ok(condition) => condition,
        Err(err) => {
            warn!(condition = text, error = %err, "unparsable condition evaluates to false");
            return false;
        }
    };
    match ctx.get(&condition.attribute) {
        Some(actual) => actual.compare(condition.comparator, &condition.value),
        None => condition.comparator == Comparator::Neq,
    }
}
