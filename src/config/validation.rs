//! Validation policy configuration

use serde::Deserialize;

use crate::domain::foundation::constants::{EPSILON_WARNING_THRESHOLD, MAX_DELTA};
use crate::domain::foundation::{BudgetPolicy, ValidationPolicy};

use super::error::ValidationError;

/// Thresholds and switches for plan validation
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Epsilon above this raises a warning
    #[serde(default = "default_epsilon_warning_threshold")]
    pub epsilon_warning_threshold: f64,

    /// Hard upper limit for any delta
    #[serde(default = "default_max_delta")]
    pub max_delta: f64,

    /// Delta above this raises a warning (unset = no delta warning)
    #[serde(default)]
    pub delta_warning_threshold: Option<f64>,

    /// `simple_sum` or `unenforced`
    #[serde(default)]
    pub budget_policy: BudgetPolicy,

    #[serde(default = "default_require_unique_variable_names")]
    pub require_unique_variable_names: bool,
}

fn default_epsilon_warning_threshold() -> f64 {
    EPSILON_WARNING_THRESHOLD
}

fn default_max_delta() -> f64 {
    MAX_DELTA
}

fn default_require_unique_variable_names() -> bool {
    true
}

impl ValidationConfig {
    /// Builds the domain policy these settings describe
    pub fn to_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            epsilon_warning_threshold: self.epsilon_warning_threshold,
            max_delta: self.max_delta,
            delta_warning_threshold: self.delta_warning_threshold,
            budget_policy: self.budget_policy,
            require_unique_variable_names: self.require_unique_variable_names,
        }
    }

    /// Validate validation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let eps = self.epsilon_warning_threshold;
        if !eps.is_finite() || eps <= 0.0 {
            return Err(ValidationError::InvalidEpsilonWarningThreshold(eps));
        }
        if !self.max_delta.is_finite() || self.max_delta <= 0.0 || self.max_delta > 1.0 {
            return Err(ValidationError::InvalidMaxDelta(self.max_delta));
        }
        if let Some(threshold) = self.delta_warning_threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(ValidationError::InvalidDeltaWarningThreshold(threshold));
            }
            if threshold > self.max_delta {
                return Err(ValidationError::DeltaWarningAboveMax {
                    threshold,
                    max_delta: self.max_delta,
                });
            }
        }
        Ok(())
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            epsilon_warning_threshold: default_epsilon_warning_threshold(),
            max_delta: default_max_delta(),
            delta_warning_threshold: None,
            budget_policy: BudgetPolicy::default(),
            require_unique_variable_names: default_require_unique_variable_names(),
        }
    }
}
