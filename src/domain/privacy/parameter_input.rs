//! Wire form of a privacy parameter: a bare number or `{ "value": n }`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::FieldPath;

/// Raw epsilon/delta as read from a plan.
///
/// Dataset totals are written `{ "value": 2.5 }`; per-statistic overrides
/// are usually bare numbers. Both shapes are accepted everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterInput {
    Plain(f64),
    Wrapped { value: f64 },
}

impl ParameterInput {
    pub fn value(&self) -> f64 {
        match self {
            ParameterInput::Plain(v) | ParameterInput::Wrapped { value: v } => *v,
        }
    }

    /// Path of the number itself when the parameter sits at `field`.
    pub fn value_path(&self, field: &FieldPath) -> FieldPath {
        match self {
            ParameterInput::Plain(_) => field.clone(),
            ParameterInput::Wrapped { .. } => field.field("value"),
        }
    }
}

impl From<f64> for ParameterInput {
    fn from(value: f64) -> Self {
        ParameterInput::Wrapped { value }
    }
}
