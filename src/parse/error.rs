use thiserror::Error;

use crate::Comparator;

/// Errors produced when parsing a rule string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    MalformedCondition(#[from] ConditionError),

    #[error("unbalanced parentheses in rule \"{rule}\"")]
    UnbalancedParentheses { rule: String },

    #[error("rule \"{rule}\" contains no conditions")]
    EmptyExpression { rule: String },

    #[error("rule tree is deeper than the limit of {limit} levels")]
    TooDeep { limit: usize },
}

/// A single condition that does not follow `<attribute> <comparator> <value>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error(
        "invalid condition format: \"{condition}\". Expected format: <attribute> <comparator> <value>, e.g. age > 30"
    )]
    InvalidFormat { condition: String },

    #[error(
        "unsupported comparator \"{comparator}\" in \"{condition}\". Expected one of {}",
        Comparator::supported_list()
    )]
    UnsupportedComparator {
        condition: String,
        comparator: String,
    },
}
