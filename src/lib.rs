//! A boolean-condition rule engine.
//!
//! Rules are infix expressions of `attribute comparator value` conditions
//! joined with `AND`/`OR` and grouped with parentheses:
//!
//! ```
//! use condrule::{combine, evaluate, parse, Context};
//!
//! let ast = parse("age > 30 AND department = 'Sales'").unwrap();
//! let ctx = Context::new().set("age", 35_i64).set("department", "Sales");
//! assert!(evaluate(&ast, &ctx));
//!
//! let combined = combine(["age > 30 AND department = 'Sales'", "salary > 50000"]).unwrap();
//! assert_eq!(
//!     combined.to_string(),
//!     "((age > 30 AND department = 'Sales') AND salary > 50000)"
//! );
//! ```
//!
//! The free functions use [`RuleEngine::default()`]; build a [`RuleEngine`]
//! to change how empty rules are treated or how `combine` picks its operator.

mod combine;
mod engine;
mod evaluate;
mod parse;
#[cfg(feature = "binary-cache")]
mod serial;
mod types;

pub use engine::{EmptyExpressionPolicy, OperatorCounting, RuleEngine, RuleEngineBuilder};
pub use parse::{ConditionError, ParseError};
#[cfg(feature = "binary-cache")]
pub use serial::{DeserializeError, SerializeError};
pub use types::{
    Ast, Comparator, Condition, Context, EvaluationReport, LogicalOp, Node, Value,
};

/// Parse one rule string into an [`Ast`].
///
/// # Errors
///
/// Returns [`ParseError`] if a condition is malformed, parentheses do not
/// balance, or the tree would be deeper than
/// [`RuleEngine::DEFAULT_MAX_DEPTH`]. A rule without any condition yields the
/// empty [`Ast`].
pub fn parse(rule: &str) -> Result<Ast, ParseError> {
    RuleEngine::default().parse(rule)
}

/// Parse several rules and join them under their most frequent operator.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first rule that fails to parse, or
/// [`ParseError::TooDeep`] if the joined tree exceeds the depth limit.
pub fn combine<I, S>(rules: I) -> Result<Ast, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RuleEngine::default().combine(rules)
}

/// Evaluate an [`Ast`] against a context.
#[must_use]
pub fn evaluate(ast: &Ast, ctx: &Context) -> bool {
    RuleEngine::default().evaluate(ast, ctx)
}

/// Evaluate an [`Ast`], reporting the outcome of every condition.
pub fn evaluate_detailed(ast: &Ast, ctx: &Context) -> EvaluationReport {
    RuleEngine::default().evaluate_detailed(ast, ctx)
}
