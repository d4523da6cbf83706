//! Epsilon value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    FieldPath, PrivacyBudgetWarning, Validated, ValidationError, ValidationPolicy,
};

use super::ParameterInput;

/// A non-negative privacy-loss parameter.
///
/// Values above the policy's warning threshold (5.0 by default) are
/// accepted but come back with a [`PrivacyBudgetWarning`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "ParameterInput", into = "ParameterInput")]
pub struct Epsilon(f64);

impl Epsilon {
    /// Validates `value` against the default policy.
    pub fn validate(value: f64) -> Result<Validated<Self>, ValidationError> {
        Self::validate_with(value, &ValidationPolicy::default())
    }

    /// Validates `value`, warning above `policy.epsilon_warning_threshold`.
    ///
    /// Errors and warnings are reported at the root path; callers re-root them.
    pub fn validate_with(
        value: f64,
        policy: &ValidationPolicy,
    ) -> Result<Validated<Self>, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::range(
                FieldPath::root(),
                format!("epsilon must be a finite number, got {}", value),
            ));
        }
        if value < 0.0 {
            return Err(ValidationError::range(
                FieldPath::root(),
                format!("epsilon must be greater than or equal to 0, got {}", value),
            ));
        }

        let threshold = policy.epsilon_warning_threshold;
        if value > threshold {
            tracing::warn!(epsilon = value, threshold, "epsilon above recommended ceiling");
            return Ok(Validated::with_warnings(
                Self(value),
                vec![PrivacyBudgetWarning::EpsilonAboveThreshold {
                    path: FieldPath::root(),
                    value,
                    threshold,
                }],
            ));
        }

        Ok(Validated::new(Self(value)))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Drops the large-epsilon warning. [`Epsilon::validate`] keeps it.
impl TryFrom<ParameterInput> for Epsilon {
    type Error = ValidationError;

    fn try_from(input: ParameterInput) -> Result<Self, Self::Error> {
        Self::validate(input.value()).map(Validated::into_inner)
    }
}

impl From<Epsilon> for ParameterInput {
    fn from(epsilon: Epsilon) -> Self {
        ParameterInput::Wrapped { value: epsilon.0 }
    }
}

impl fmt::Display for Epsilon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
