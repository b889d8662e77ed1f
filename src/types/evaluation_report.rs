use std::fmt;
use std::time::Duration;

/// Detailed evaluation report returned by
/// [`evaluate_detailed()`](crate::evaluate_detailed).
///
/// Contains the overall result, the outcome of every leaf condition in the
/// order it was evaluated (left to right), and the wall-clock duration.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    result: bool,
    conditions: Vec<(String, bool)>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(result: bool, conditions: Vec<(String, bool)>, duration: Duration) -> Self {
        Self {
            result,
            conditions,
            duration,
        }
    }

    /// The evaluation result, same as [`evaluate()`](crate::evaluate).
    #[must_use]
    pub fn result(&self) -> bool {
        self.result
    }

    /// Every leaf condition paired with its outcome, in evaluation order.
    #[must_use]
    pub fn conditions(&self) -> &[(String, bool)] {
        &self.conditions
    }

    /// Leaf conditions that held.
    #[must_use]
    pub fn satisfied(&self) -> Vec<&str> {
        self.conditions
            .iter()
            .filter(|(_, held)| *held)
            .map(|(text, _)| text.as_str())
            .collect()
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result: {}", self.result)?;
        write!(f, ", satisfied: [{}]", self.satisfied().join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
