//! Soft violations and the result type that carries them.
//!
//! A warning never blocks construction. It rides next to the validated
//! value in [`Validated`] so callers can surface it without touching the
//! error path.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FieldPath;

/// Advisory raised when a privacy parameter is legal but unusually weak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrivacyBudgetWarning {
    EpsilonAboveThreshold {
        path: FieldPath,
        value: f64,
        threshold: f64,
    },
    DeltaAboveThreshold {
        path: FieldPath,
        value: f64,
        threshold: f64,
    },
}

impl PrivacyBudgetWarning {
    pub fn path(&self) -> &FieldPath {
        match self {
            PrivacyBudgetWarning::EpsilonAboveThreshold { path, .. }
            | PrivacyBudgetWarning::DeltaAboveThreshold { path, .. } => path,
        }
    }

    /// Returns the message without the path.
    pub fn message(&self) -> String {
        match self {
            PrivacyBudgetWarning::EpsilonAboveThreshold { threshold, .. } => format!(
                "{} {:.1}",
                super::constants::MSG_EPSILON_WARNING,
                threshold
            ),
            PrivacyBudgetWarning::DeltaAboveThreshold { threshold, .. } => {
                format!("{} {:e}", super::constants::MSG_DELTA_WARNING, threshold)
            }
        }
    }

    /// Re-roots the warning under the path of an enclosing record.
    pub fn nested(mut self, prefix: &FieldPath) -> Self {
        let path = match &mut self {
            PrivacyBudgetWarning::EpsilonAboveThreshold { path, .. }
            | PrivacyBudgetWarning::DeltaAboveThreshold { path, .. } => path,
        };
        *path = path.prefixed(prefix);
        self
    }
}

impl fmt::Display for PrivacyBudgetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path(), self.message())
    }
}

/// A successfully validated value plus any warnings raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    value: T,
    warnings: Vec<PrivacyBudgetWarning>,
}

impl<T> Validated<T> {
    /// Wraps a value that raised no warnings.
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<PrivacyBudgetWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn warnings(&self) -> &[PrivacyBudgetWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<PrivacyBudgetWarning>) {
        (self.value, self.warnings)
    }

    /// Moves the warnings into `sink` (re-rooted under `prefix`) and returns the value.
    pub fn drain_into(self, sink: &mut Vec<PrivacyBudgetWarning>, prefix: &FieldPath) -> T {
        sink.extend(self.warnings.into_iter().map(|w| w.nested(prefix)));
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        Validated {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epsilon_warning(path: &str) -> PrivacyBudgetWarning {
        PrivacyBudgetWarning::EpsilonAboveThreshold {
            path: FieldPath::new(path),
            value: 6.0,
            threshold: 5.0,
        }
    }

    #[test]
    fn epsilon_warning_message_matches_threshold() {
        assert_eq!(
            epsilon_warning("value").message(),
            "Epsilon shouldn't be greater than 5.0"
        );
    }

    #[test]
    fn delta_warning_message_uses_scientific_notation() {
        let warning = PrivacyBudgetWarning::DeltaAboveThreshold {
            path: FieldPath::new("value"),
            value: 5e-6,
            threshold: 1e-6,
        };
        assert_eq!(warning.message(), "Delta shouldn't be greater than 1e-6");
    }

    #[test]
    fn drain_into_prefixes_and_moves_warnings() {
        let validated = Validated::with_warnings(3, vec![epsilon_warning("value")]);
        let mut sink = Vec::new();

        let value = validated.drain_into(&mut sink, &FieldPath::new("total_epsilon"));

        assert_eq!(value, 3);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].path().as_str(), "total_epsilon.value");
    }

    #[test]
    fn map_keeps_warnings() {
        let validated = Validated::with_warnings(2, vec![epsilon_warning("value")]).map(|v| v * 2);
        assert_eq!(*validated.value(), 4);
        assert!(validated.has_warnings());
    }

    #[test]
    fn new_has_no_warnings() {
        assert!(!Validated::new("x").has_warnings());
    }

    #[test]
    fn warning_serializes_with_type_tag() {
        let json = serde_json::to_value(epsilon_warning("value")).unwrap();
        assert_eq!(json["type"], "epsilon_above_threshold");
        assert_eq!(json["path"], "value");
    }
}
