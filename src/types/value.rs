use std::cmp::Ordering;
use std::fmt;

use super::condition::Comparator;

/// Scalar values that conditions compare against.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A 64-bit floating-point number. Integers are widened on conversion.
    Number(f64),
    /// A UTF-8 string.
    String(String),
}

impl Value {
    /// Coerce the raw right-hand side of a condition into a [`Value`].
    ///
    /// Text that reads as a finite number becomes [`Value::Number`]; anything
    /// else has its surrounding single quotes stripped and becomes
    /// [`Value::String`].
    #[must_use]
    pub fn from_literal(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::String(raw.trim_matches('\'').trim().to_owned()),
        }
    }

    /// Compare this value (the attribute) to `other` (the literal).
    ///
    /// Ordering comparators only hold between values of the same kind.
    /// Equality compares kind and value together, so values of different
    /// kinds are never equal.
    #[must_use]
    pub fn compare(&self, op: Comparator, other: &Value) -> bool {
        match op {
            Comparator::Eq => self.same_as(other),
            Comparator::Neq => !self.same_as(other),
            Comparator::Gt => self.order(other) == Some(Ordering::Greater),
            Comparator::Gte => matches!(
                self.order(other),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Comparator::Lt => self.order(other) == Some(Ordering::Less),
            Comparator::Lte => matches!(self.order(other), Some(Ordering::Less | Ordering::Equal)),
        }
    }

    /// Short name of the value's kind, used in log output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    fn order(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{v}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_integers_widen_to_number() {
        assert_eq!(Value::from(42_i32), Value::Number(42.0));
        assert_eq!(Value::from(42_i64), Value::Number(42.0));
        assert_eq!(Value::from(42_u32), Value::Number(42.0));
    }

    #[test]
    fn from_str_and_string() {
        assert_eq!(Value::from("hello"), Value::String("hello".to_owned()));
        assert_eq!(
            Value::from("owned".to_owned()),
            Value::String("owned".to_owned())
        );
    }

    #[test]
    fn display() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(3.5).to_string(), "3.5");
        assert_eq!(Value::String("Sales".into()).to_string(), "'Sales'");
    }

    #[test]
    fn literal_numbers() {
        assert_eq!(Value::from_literal("30"), Value::Number(30.0));
        assert_eq!(Value::from_literal("-2.5"), Value::Number(-2.5));
        assert_eq!(Value::from_literal(" 1e3 "), Value::Number(1000.0));
    }

    #[test]
    fn literal_strings_lose_surrounding_quotes() {
        assert_eq!(Value::from_literal("'Sales'"), Value::String("Sales".into()));
        assert_eq!(Value::from_literal("Sales"), Value::String("Sales".into()));
        assert_eq!(
            Value::from_literal("'O'Brien'"),
            Value::String("O'Brien".into())
        );
    }

    #[test]
    fn literal_quoted_number_is_still_a_string() {
        assert_eq!(Value::from_literal("'30'"), Value::String("30".into()));
    }

    #[test]
    fn literal_non_finite_is_a_string() {
        assert_eq!(Value::from_literal("NaN"), Value::String("NaN".into()));
        assert_eq!(Value::from_literal("inf"), Value::String("inf".into()));
    }

    #[test]
    fn compare_numbers() {
        let a = Value::Number(10.0);
        let b = Value::Number(20.0);
        assert!(!a.compare(Comparator::Eq, &b));
        assert!(a.compare(Comparator::Neq, &b));
        assert!(a.compare(Comparator::Lt, &b));
        assert!(a.compare(Comparator::Lte, &b));
        assert!(!a.compare(Comparator::Gt, &b));
        assert!(!a.compare(Comparator::Gte, &b));
        assert!(a.compare(Comparator::Eq, &a));
        assert!(a.compare(Comparator::Gte, &a));
        assert!(a.compare(Comparator::Lte, &a));
    }

    #[test]
    fn compare_strings_lexicographically() {
        let a = Value::String("apple".into());
        let b = Value::String("banana".into());
        assert!(a.compare(Comparator::Lt, &b));
        assert!(b.compare(Comparator::Gt, &a));
        assert!(!a.compare(Comparator::Eq, &b));
        assert!(a.compare(Comparator::Eq, &a));
    }

    #[test]
    fn compare_mismatched_kinds() {
        let n = Value::Number(30.0);
        let s = Value::String("30".into());
        assert!(!n.compare(Comparator::Eq, &s));
        assert!(n.compare(Comparator::Neq, &s));
        assert!(!n.compare(Comparator::Gt, &s));
        assert!(!n.compare(Comparator::Gte, &s));
        assert!(!n.compare(Comparator::Lt, &s));
        assert!(!n.compare(Comparator::Lte, &s));
    }

    #[test]
    fn nan_is_unequal_and_unordered() {
        let nan = Value::Number(f64::NAN);
        assert!(!nan.compare(Comparator::Eq, &nan));
        assert!(nan.compare(Comparator::Neq, &nan));
        assert!(!nan.compare(Comparator::Gte, &Value::Number(0.0)));
        assert!(!nan.compare(Comparator::Lte, &Value::Number(0.0)));
    }
}
