//! Bounds value object - the clamping range of a numeric variable.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::constants::MSG_MAX_NOT_GREATER_THAN_MIN;
use crate::domain::foundation::{FieldPath, ValidationError};

/// Wire form of a bounds pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsInput {
    pub min: f64,
    pub max: f64,
}

/// A `(min, max)` pair with `max > min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundsInput", into = "BoundsInput")]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// Validates a candidate pair. Equal bounds are invalid.
    pub fn validate(min: f64, max: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() {
            return Err(ValidationError::range(
                FieldPath::new("min"),
                format!("min must be a finite number, got {}", min),
            ));
        }
        if !max.is_finite() {
            return Err(ValidationError::range(
                FieldPath::new("max"),
                format!("max must be a finite number, got {}", max),
            ));
        }
        if max <= min {
            return Err(ValidationError::range(
                FieldPath::new("max"),
                format!("{} (min: {}, max: {})", MSG_MAX_NOT_GREATER_THAN_MIN, min, max),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns true if both ends are whole numbers.
    pub fn is_integral(&self) -> bool {
        self.min.fract() == 0.0 && self.max.fract() == 0.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Number of whole values in the range, for integral bounds.
    pub fn integer_count(&self) -> Option<f64> {
        self.is_integral().then(|| self.max - self.min + 1.0)
    }
}

impl TryFrom<BoundsInput> for Bounds {
    type Error = ValidationError;

    fn try_from(input: BoundsInput) -> Result<Self, Self::Error> {
        Self::validate(input.min, input.max)
    }
}

impl From<Bounds> for BoundsInput {
    fn from(bounds: Bounds) -> Self {
        BoundsInput {
            min: bounds.min,
            max: bounds.max,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
