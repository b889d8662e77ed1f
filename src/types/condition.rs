use std::fmt;
use std::str::FromStr;

use super::value::Value;
use crate::parse::ConditionError;

/// Comparison operators allowed inside a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
    Neq,
}

impl Comparator {
    /// Every supported comparator, in the order they are listed in error messages.
    pub const ALL: [Comparator; 6] = [
        Comparator::Gt,
        Comparator::Lt,
        Comparator::Gte,
        Comparator::Lte,
        Comparator::Eq,
        Comparator::Neq,
    ];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Gte => ">=",
            Comparator::Lte => "<=",
            Comparator::Eq => "=",
            Comparator::Neq => "!=",
        }
    }

    /// Look up a comparator by its exact symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }

    /// Comma-separated list of supported symbols.
    #[must_use]
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.symbol())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A condition decoded from an operand's text: `attribute comparator value`.
///
/// Operands store the raw text; a [`Condition`] is derived on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub attribute: String,
    pub comparator: Comparator,
    pub value: Value,
}

impl Condition {
    /// Parse condition text such as `age > 30` or `department = 'Sales'`.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError`] if the text does not match
    /// `<attribute> <comparator> <value>` or uses an unsupported comparator.
    pub fn parse(text: &str) -> Result<Self, ConditionError> {
        let parts = crate::parse::split_condition(text)?;
        Ok(Self {
            attribute: parts.attribute.to_owned(),
            comparator: parts.comparator,
            value: Value::from_literal(parts.literal),
        })
    }
}

impl FromStr for Condition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.comparator, self.value)
    }
}
