use tracing::{debug, trace};

use crate::{Ast, LogicalOp, Node, OperatorCounting, ParseError, RuleEngine};

/// Tally of `AND`/`OR` occurrences across a batch of rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct OperatorTally {
    and: usize,
    or: usize,
}

impl OperatorTally {
    fn textual(rule: &str) -> Self {
        Self {
            and: rule.matches("AND").count(),
            or: rule.matches("OR").count(),
        }
    }

    fn parsed(ast: &Ast) -> Self {
        Self {
            and: ast.operator_count(LogicalOp::And),
            or: ast.operator_count(LogicalOp::Or),
        }
    }

    fn add(&mut self, other: Self) {
        self.and += other.and;
        self.or += other.or;
    }

    /// `AND` wins ties.
    fn dominant(self) -> LogicalOp {
        if self.and >= self.or {
            LogicalOp::And
        } else {
            LogicalOp::Or
        }
    }
}

pub(crate) fn combine<I, S>(engine: &RuleEngine, rules: I) -> Result<Ast, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tally = OperatorTally::default();
    let mut trees = Vec::new();

    for rule in rules {
        let rule = rule.as_ref();
        let ast = engine.parse(rule)?;
        tally.add(match engine.operator_counting() {
            OperatorCounting::Textual => OperatorTally::textual(rule),
            OperatorCounting::Parsed => OperatorTally::parsed(&ast),
        });
        trees.push(ast);
    }

    let dominant = tally.dominant();
    debug!(
        rules = trees.len(),
        and = tally.and,
        or = tally.or,
        %dominant,
        "combining rules"
    );

    // An empty tree is false, which absorbs an AND fold and is neutral
    // under OR.
    if dominant == LogicalOp::And && trees.iter().any(Ast::is_empty) {
        debug!("empty rule under AND, combined rule is empty");
        return Ok(Ast::empty());
    }

    let limit = engine.max_depth();
    let mut combined: Option<(Node, usize)> = None;
    for ast in trees {
        let depth = ast.depth();
        let Some(node) = ast.into_root() else {
            continue;
        };
        combined = Some(match combined {
            None => (node, depth),
            Some((acc, acc_depth)) => {
                let joined = 1 + acc_depth.max(depth);
                if joined > limit {
                    return Err(ParseError::TooDeep { limit });
                }
                (Node::join(dominant, acc, node), joined)
            }
        });
    }
    let combined = Ast::from(combined.map(|(node, _)| node));

    trace!(outline = %combined.outline(), "combined rule tree");
    Ok(combined)
}
