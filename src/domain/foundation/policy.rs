//! Tunable thresholds and switches that the validators consult.

use serde::{Deserialize, Serialize};

use super::constants::{EPSILON_WARNING_THRESHOLD, MAX_DELTA};

/// How per-statistic epsilon is checked against the dataset total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPolicy {
    /// Explicit per-statistic epsilons must sum to at most `total_epsilon`.
    #[default]
    SimpleSum,
    /// No plan-level budget check.
    Unenforced,
}

/// Knobs for one validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationPolicy {
    /// Epsilon above this raises a warning.
    pub epsilon_warning_threshold: f64,
    /// Hard upper limit for any delta.
    pub max_delta: f64,
    /// Delta above this raises a warning; `None` disables the warning.
    pub delta_warning_threshold: Option<f64>,
    pub budget_policy: BudgetPolicy,
    pub require_unique_variable_names: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            epsilon_warning_threshold: EPSILON_WARNING_THRESHOLD,
            max_delta: MAX_DELTA,
            delta_warning_threshold: None,
            budget_policy: BudgetPolicy::SimpleSum,
            require_unique_variable_names: true,
        }
    }
}

impl ValidationPolicy {
    pub fn with_budget_policy(mut self, budget_policy: BudgetPolicy) -> Self {
        self.budget_policy = budget_policy;
        self
    }

    pub fn with_delta_warning_threshold(mut self, threshold: f64) -> Self {
        self.delta_warning_threshold = Some(threshold);
        self
    }

    pub fn with_epsilon_warning_threshold(mut self, threshold: f64) -> Self {
        self.epsilon_warning_threshold = threshold;
        self
    }

    pub fn allow_duplicate_variable_names(mut self) -> Self {
        self.require_unique_variable_names = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_constants() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.epsilon_warning_threshold, 5.0);
        assert_eq!(policy.max_delta, 1e-5);
        assert_eq!(policy.delta_warning_threshold, None);
        assert_eq!(policy.budget_policy, BudgetPolicy::SimpleSum);
        assert!(policy.require_unique_variable_names);
    }

    #[test]
    fn builders_override_fields() {
        let policy = ValidationPolicy::default()
            .with_budget_policy(BudgetPolicy::Unenforced)
            .with_delta_warning_threshold(1e-6)
            .allow_duplicate_variable_names();
        assert_eq!(policy.budget_policy, BudgetPolicy::Unenforced);
        assert_eq!(policy.delta_warning_threshold, Some(1e-6));
        assert!(!policy.require_unique_variable_names);
    }

    #[test]
    fn budget_policy_deserializes_snake_case() {
        let policy: BudgetPolicy = serde_json::from_str("\"unenforced\"").unwrap();
        assert_eq!(policy, BudgetPolicy::Unenforced);
    }
}
