//! Delta value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    FieldPath, PrivacyBudgetWarning, Validated, ValidationError, ValidationPolicy,
};

use super::ParameterInput;

/// Probability that the epsilon guarantee fails; `0 <= delta <= 1e-5`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "ParameterInput", into = "ParameterInput")]
pub struct Delta(f64);

impl Delta {
    /// Pure epsilon-DP.
    pub const ZERO: Self = Self(0.0);

    pub fn validate(value: f64) -> Result<Validated<Self>, ValidationError> {
        Self::validate_with(value, &ValidationPolicy::default())
    }

    /// Validates `value` against `policy.max_delta` and the optional soft threshold.
    pub fn validate_with(
        value: f64,
        policy: &ValidationPolicy,
    ) -> Result<Validated<Self>, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::range(
                FieldPath::root(),
                format!("delta must be a finite number, got {}", value),
            ));
        }
        if value < 0.0 {
            return Err(ValidationError::range(
                FieldPath::root(),
                format!("delta must be greater than or equal to 0, got {}", value),
            ));
        }
        if value > policy.max_delta {
            return Err(ValidationError::range(
                FieldPath::root(),
                format!(
                    "delta must be less than or equal to {}, got {}",
                    policy.max_delta, value
                ),
            ));
        }

        match policy.delta_warning_threshold {
            Some(threshold) if value > threshold => {
                tracing::warn!(delta = value, threshold, "delta above recommended ceiling");
                Ok(Validated::with_warnings(
                    Self(value),
                    vec![PrivacyBudgetWarning::DeltaAboveThreshold {
                        path: FieldPath::root(),
                        value,
                        threshold,
                    }],
                ))
            }
            _ => Ok(Validated::new(Self(value))),
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Drops any delta warning. [`Delta::validate`] keeps it.
impl TryFrom<ParameterInput> for Delta {
    type Error = ValidationError;

    fn try_from(input: ParameterInput) -> Result<Self, Self::Error> {
        Self::validate(input.value()).map(Validated::into_inner)
    }
}

impl From<Delta> for ParameterInput {
    fn from(delta: Delta) -> Self {
        ParameterInput::Wrapped { value: delta.0 }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
