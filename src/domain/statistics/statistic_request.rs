//! StatisticRequest - one differentially private statistic asked of a variable.
//!
//! Validation here is local to the request. Whether `variable` names a real
//! column, and whether the statistic suits that column, is decided by the
//! analysis plan, which can see the dataset.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    FieldPath, StatisticType, Validated, ValidationError, ValidationErrors, ValidationPolicy,
};
use crate::domain::privacy::{Bounds, BoundsInput, ConfidenceLevel, Delta, Epsilon, ParameterInput};

use super::{HistogramBins, MissingValueHandling, MissingValueHandlingInput};

/// Wire form of a statistic request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatisticRequestInput {
    #[serde(default, alias = "var_name")]
    pub variable: String,
    #[serde(default, alias = "stat_type")]
    pub statistic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<ParameterInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<ParameterInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_value_handling: Option<MissingValueHandlingInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram_bin_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram_number_of_bins: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram_bin_edges: Option<Vec<f64>>,
}

impl StatisticRequestInput {
    pub fn new(variable: impl Into<String>, statistic: StatisticType) -> Self {
        Self {
            variable: variable.into(),
            statistic: statistic.name().to_string(),
            ..Self::default()
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(ParameterInput::Plain(epsilon));
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(ParameterInput::Plain(delta));
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = Some(confidence_level);
        self
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some(BoundsInput { min, max });
        self
    }

    pub fn with_missing_value_handling(mut self, handling: MissingValueHandlingInput) -> Self {
        self.missing_value_handling = Some(handling);
        self
    }
}

/// A validated statistic request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StatisticRequestInput", into = "StatisticRequestInput")]
pub struct StatisticRequest {
    variable: String,
    statistic: StatisticType,
    epsilon: Option<Epsilon>,
    delta: Option<Delta>,
    confidence_level: Option<ConfidenceLevel>,
    bounds: Option<Bounds>,
    missing_value_handling: Option<MissingValueHandling>,
    histogram_bins: Option<HistogramBins>,
}

impl StatisticRequest {
    /// Validates every local field and reports all failures together.
    ///
    /// Paths are relative to the request record.
    pub fn validate(
        input: &StatisticRequestInput,
        policy: &ValidationPolicy,
    ) -> Result<Validated<Self>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut warnings = Vec::new();

        if input.variable.trim().is_empty() {
            errors.push(ValidationError::invalid_input(
                "variable",
                "a statistic must name the variable it is computed on",
            ));
        }

        let statistic = StatisticType::from_name(&input.statistic);
        if statistic.is_none() {
            errors.push(ValidationError::invalid_input(
                "statistic",
                format!(
                    "unknown statistic \"{}\"; expected one of {}",
                    input.statistic,
                    StatisticType::allowed_names()
                ),
            ));
        }

        let epsilon = input.epsilon.and_then(|raw| {
            let path = raw.value_path(&FieldPath::new("epsilon"));
            match Epsilon::validate_with(raw.value(), policy) {
                Ok(validated) => Some(validated.drain_into(&mut warnings, &path)),
                Err(e) => {
                    errors.push(e.nested(&path));
                    None
                }
            }
        });

        let delta = input.delta.and_then(|raw| {
            let path = raw.value_path(&FieldPath::new("delta"));
            match Delta::validate_with(raw.value(), policy) {
                Ok(validated) => Some(validated.drain_into(&mut warnings, &path)),
                Err(e) => {
                    errors.push(e.nested(&path));
                    None
                }
            }
        });

        let confidence_level = input.confidence_level.and_then(|raw| {
            errors.collect(
                ConfidenceLevel::validate(raw)
                    .map_err(|e| e.nested(&FieldPath::new("confidence_level"))),
            )
        });

        let bounds = input.bounds.and_then(|raw| {
            errors.collect(
                Bounds::validate(raw.min, raw.max).map_err(|e| e.nested(&FieldPath::new("bounds"))),
            )
        });

        let missing_value_handling =
            input
                .missing_value_handling
                .as_ref()
                .and_then(|raw| match MissingValueHandling::validate(raw) {
                    Ok(handling) => Some(handling),
                    Err(child) => {
                        errors.absorb(child, &FieldPath::new("missing_value_handling"));
                        None
                    }
                });

        let histogram_bins = match statistic {
            Some(stat) if stat != StatisticType::Histogram => {
                let present = [
                    ("histogram_bin_type", input.histogram_bin_type.is_some()),
                    ("histogram_number_of_bins", input.histogram_number_of_bins.is_some()),
                    ("histogram_bin_edges", input.histogram_bin_edges.is_some()),
                ];
                for (field, _) in present.iter().filter(|(_, set)| *set) {
                    errors.push(ValidationError::structural(
                        *field,
                        format!(
                            "{} is only allowed for \"histogram\", not \"{}\"",
                            field, stat
                        ),
                    ));
                }
                None
            }
            _ => match HistogramBins::from_fields(
                input.histogram_bin_type.as_deref(),
                input.histogram_number_of_bins,
                input.histogram_bin_edges.as_deref(),
            ) {
                Ok(bins) => bins,
                Err(child) => {
                    errors.absorb(child, &FieldPath::root());
                    None
                }
            },
        };

        match statistic {
            Some(statistic) if errors.is_empty() => Ok(Validated::with_warnings(
                Self {
                    variable: input.variable.clone(),
                    statistic,
                    epsilon,
                    delta,
                    confidence_level,
                    bounds,
                    missing_value_handling,
                    histogram_bins,
                },
                warnings,
            )),
            _ => {
                tracing::debug!(
                    variable = %input.variable,
                    statistic = %input.statistic,
                    errors = errors.len(),
                    "statistic request rejected"
                );
                Err(errors)
            }
        }
    }

    /// Name of the variable the statistic is computed on.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn statistic(&self) -> StatisticType {
        self.statistic
    }

    pub fn epsilon(&self) -> Option<Epsilon> {
        self.epsilon
    }

    pub fn delta(&self) -> Option<Delta> {
        self.delta
    }

    pub fn confidence_level(&self) -> Option<ConfidenceLevel> {
        self.confidence_level
    }

    /// Per-statistic clamping range overriding the variable's bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn missing_value_handling(&self) -> Option<&MissingValueHandling> {
        self.missing_value_handling.as_ref()
    }

    pub fn histogram_bins(&self) -> Option<&HistogramBins> {
        self.histogram_bins.as_ref()
    }
}

/// Backs `Deserialize`. Warnings are discarded; use
/// [`StatisticRequest::validate`] to see them.
impl TryFrom<StatisticRequestInput> for StatisticRequest {
    type Error = ValidationErrors;

    fn try_from(input: StatisticRequestInput) -> Result<Self, Self::Error> {
        Self::validate(&input, &ValidationPolicy::default()).map(Validated::into_inner)
    }
}

impl From<StatisticRequest> for StatisticRequestInput {
    fn from(request: StatisticRequest) -> Self {
        let (histogram_bin_type, histogram_number_of_bins, histogram_bin_edges) =
            match request.histogram_bins {
                None => (None, None, None),
                Some(bins) => (
                    Some(bins.bin_type().name().to_string()),
                    bins.number_of_bins().and_then(|n| i64::try_from(n).ok()),
                    bins.edges().map(<[f64]>::to_vec),
                ),
            };

        StatisticRequestInput {
            variable: request.variable,
            statistic: request.statistic.name().to_string(),
            epsilon: request.epsilon.map(|e| ParameterInput::Plain(e.value())),
            delta: request.delta.map(|d| ParameterInput::Plain(d.value())),
            confidence_level: request.confidence_level.map(f64::from),
            bounds: request.bounds.map(Into::into),
            missing_value_handling: request.missing_value_handling.map(Into::into),
            histogram_bin_type,
            histogram_number_of_bins,
            histogram_bin_edges,
        }
    }
}
