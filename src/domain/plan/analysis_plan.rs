//! AnalysisPlan aggregate - dataset, budget, and requested statistics.
//!
//! The plan validates its parts bottom-up, then enforces the rules that need
//! more than one part: every statistic must name a declared variable, must
//! suit that variable, and together the statistics must fit the budget.

use serde::{Deserialize, Serialize};

use crate::domain::dataset::{Dataset, DatasetInput, Variable};
use crate::domain::foundation::constants::MAX_EPSILON_OFFSET;
use crate::domain::foundation::{
    BudgetPolicy, FieldPath, Validated, ValidationError, ValidationErrors, ValidationPolicy,
};
use crate::domain::privacy::{PrivacyParameters, PrivacyParametersInput};
use crate::domain::statistics::{StatisticRequest, StatisticRequestInput};

use super::rules;
use super::LibraryDescriptor;

/// Wire form of a whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPlanInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub differentially_private_library: LibraryDescriptor,
    pub dataset: DatasetInput,
    pub privacy_parameters: PrivacyParametersInput,
    #[serde(default)]
    pub statistics: Vec<StatisticRequestInput>,
}

/// A fully validated, immutable analysis plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnalysisPlanInput", into = "AnalysisPlanInput")]
pub struct AnalysisPlan {
    name: String,
    library: LibraryDescriptor,
    dataset: Dataset,
    privacy_parameters: PrivacyParameters,
    statistics: Vec<StatisticRequest>,
}

impl AnalysisPlan {
    /// Validates the plan, collecting every error from every part.
    ///
    /// Warnings from nested parameters come back re-rooted at their full
    /// path, e.g. `statistics[1].epsilon`.
    pub fn validate(
        input: &AnalysisPlanInput,
        policy: &ValidationPolicy,
    ) -> Result<Validated<Self>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut warnings = Vec::new();

        if input.name.trim().is_empty() {
            errors.push(ValidationError::invalid_input(
                "name",
                "plan name cannot be empty",
            ));
        }

        let dataset = match Dataset::validate(&input.dataset, policy) {
            Ok(dataset) => Some(dataset),
            Err(child) => {
                errors.absorb(child, &FieldPath::new("dataset"));
                None
            }
        };

        let privacy_path = FieldPath::new("privacy_parameters");
        let privacy_parameters = match PrivacyParameters::validate(&input.privacy_parameters, policy)
        {
            Ok(validated) => Some(validated.drain_into(&mut warnings, &privacy_path)),
            Err(child) => {
                errors.absorb(child, &privacy_path);
                None
            }
        };

        let statistics_path = FieldPath::new("statistics");
        let mut statistics = Vec::with_capacity(input.statistics.len());
        for (i, raw) in input.statistics.iter().enumerate() {
            let path = statistics_path.index(i);
            let statistic = match StatisticRequest::validate(raw, policy) {
                Ok(validated) => Some(validated.drain_into(&mut warnings, &path)),
                Err(child) => {
                    errors.absorb(child, &path);
                    None
                }
            };

            if !raw.variable.trim().is_empty() && !variable_declared(input, dataset.as_ref(), raw) {
                errors.push(ValidationError::reference(
                    path.field("variable"),
                    raw.variable.as_str(),
                ));
            }

            if let (Some(statistic), Some(dataset)) = (&statistic, &dataset) {
                if let Some(variable) = dataset.variable(statistic.variable()) {
                    rules::check_statistic_against_variable(statistic, variable, &path, &mut errors);
                }
            }

            if let Some(statistic) = statistic {
                statistics.push(statistic);
            }
        }

        if let Some(params) = &privacy_parameters {
            check_budget(input, params, policy, &mut errors);
        }

        match (dataset, privacy_parameters) {
            (Some(dataset), Some(privacy_parameters)) if errors.is_empty() => {
                tracing::debug!(
                    plan = %input.name,
                    variables = dataset.variables().len(),
                    statistics = statistics.len(),
                    warnings = warnings.len(),
                    "analysis plan validated"
                );
                Ok(Validated::with_warnings(
                    Self {
                        name: input.name.clone(),
                        library: input.differentially_private_library.clone(),
                        dataset,
                        privacy_parameters,
                        statistics,
                    },
                    warnings,
                ))
            }
            _ => {
                tracing::debug!(
                    plan = %input.name,
                    errors = errors.len(),
                    "analysis plan rejected"
                );
                Err(errors)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn library(&self) -> &LibraryDescriptor {
        &self.library
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn privacy_parameters(&self) -> &PrivacyParameters {
        &self.privacy_parameters
    }

    pub fn statistics(&self) -> &[StatisticRequest] {
        &self.statistics
    }

    /// The variable a statistic is computed on.
    pub fn variable_for(&self, statistic: &StatisticRequest) -> Option<&Variable> {
        self.dataset.variable(statistic.variable())
    }

    /// Sum of the explicit per-statistic epsilons.
    pub fn epsilon_requested(&self) -> f64 {
        self.statistics
            .iter()
            .filter_map(|s| s.epsilon())
            .map(|e| e.value())
            .sum()
    }

    /// Budget left after the explicit per-statistic epsilons, never negative.
    pub fn epsilon_remaining(&self) -> f64 {
        (self.privacy_parameters.total_epsilon().value() - self.epsilon_requested()).max(0.0)
    }

    /// True when the script generator must spend budget on a private row
    /// count before computing the requested statistics.
    pub fn requires_auto_count(&self) -> bool {
        !self.privacy_parameters.number_of_rows_public()
            && self
                .statistics
                .iter()
                .any(|s| s.statistic().requires_count())
    }
}

/// Resolves a statistic's variable against the validated dataset, or against
/// the raw declarations when the dataset itself failed validation.
fn variable_declared(
    input: &AnalysisPlanInput,
    dataset: Option<&Dataset>,
    raw: &StatisticRequestInput,
) -> bool {
    match dataset {
        Some(dataset) => dataset.contains_variable(&raw.variable),
        None => input.dataset.variables.iter().any(|v| v.name == raw.variable),
    }
}

fn check_budget(
    input: &AnalysisPlanInput,
    params: &PrivacyParameters,
    policy: &ValidationPolicy,
    errors: &mut ValidationErrors,
) {
    if policy.budget_policy == BudgetPolicy::Unenforced {
        return;
    }

    // Invalid epsilons are already reported; leave them out of the sum.
    let requested: f64 = input
        .statistics
        .iter()
        .filter_map(|s| s.epsilon.map(|e| e.value()))
        .filter(|e| e.is_finite() && *e >= 0.0)
        .sum();
    let available = params.total_epsilon().value();

    if requested > available + MAX_EPSILON_OFFSET {
        tracing::debug!(available, requested, "epsilon budget exceeded");
        errors.push(ValidationError::budget_exceeded(
            "statistics",
            available,
            requested,
        ));
    }
}

/// Backs `Deserialize`. Validates under the default policy and discards
/// warnings; use [`AnalysisPlan::validate`] when warnings matter.
impl TryFrom<AnalysisPlanInput> for AnalysisPlan {
    type Error = ValidationErrors;

    fn try_from(input: AnalysisPlanInput) -> Result<Self, Self::Error> {
        Self::validate(&input, &ValidationPolicy::default()).map(Validated::into_inner)
    }
}

impl From<AnalysisPlan> for AnalysisPlanInput {
    fn from(plan: AnalysisPlan) -> Self {
        AnalysisPlanInput {
            name: plan.name,
            differentially_private_library: plan.library,
            dataset: plan.dataset.into(),
            privacy_parameters: plan.privacy_parameters.into(),
            statistics: plan.statistics.into_iter().map(Into::into).collect(),
        }
    }
}
