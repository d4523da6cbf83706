//! ConfidenceLevel - the fixed set of interval confidence levels.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{FieldPath, ValidationError};

/// Confidence level attached to a released statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ConfidenceLevel {
    Cl68,
    Cl80,
    Cl90,
    Cl95,
    Cl99,
    Cl999,
}

static ALLOWED_VALUES: Lazy<String> = Lazy::new(|| {
    ConfidenceLevel::all()
        .iter()
        .map(|cl| cl.value().to_string())
        .collect::<Vec<_>>()
        .join(", ")
});

impl ConfidenceLevel {
    pub fn all() -> &'static [ConfidenceLevel] {
        &[
            ConfidenceLevel::Cl68,
            ConfidenceLevel::Cl80,
            ConfidenceLevel::Cl90,
            ConfidenceLevel::Cl95,
            ConfidenceLevel::Cl99,
            ConfidenceLevel::Cl999,
        ]
    }

    /// Matches `value` exactly against the allowed set.
    pub fn validate(value: f64) -> Result<Self, ValidationError> {
        Self::all()
            .iter()
            .copied()
            .find(|cl| cl.value() == value)
            .ok_or_else(|| {
                ValidationError::range(
                    FieldPath::root(),
                    format!(
                        "confidence level must be one of {}, got {}",
                        ALLOWED_VALUES.as_str(),
                        value
                    ),
                )
            })
    }

    pub fn value(&self) -> f64 {
        match self {
            ConfidenceLevel::Cl68 => 0.68,
            ConfidenceLevel::Cl80 => 0.80,
            ConfidenceLevel::Cl90 => 0.90,
            ConfidenceLevel::Cl95 => 0.95,
            ConfidenceLevel::Cl99 => 0.99,
            ConfidenceLevel::Cl999 => 0.999,
        }
    }

    /// Significance level, `1 - value`.
    pub fn alpha(&self) -> f64 {
        match self {
            ConfidenceLevel::Cl68 => 0.32,
            ConfidenceLevel::Cl80 => 0.20,
            ConfidenceLevel::Cl90 => 0.10,
            ConfidenceLevel::Cl95 => 0.05,
            ConfidenceLevel::Cl99 => 0.01,
            ConfidenceLevel::Cl999 => 0.001,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::Cl68 => "68% CL",
            ConfidenceLevel::Cl80 => "80% CL",
            ConfidenceLevel::Cl90 => "90% CL",
            ConfidenceLevel::Cl95 => "95% CL",
            ConfidenceLevel::Cl99 => "99% CL",
            ConfidenceLevel::Cl999 => "99.9% CL",
        }
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::validate(value)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(cl: ConfidenceLevel) -> Self {
        cl.value()
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
