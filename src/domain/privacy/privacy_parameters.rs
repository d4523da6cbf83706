//! PrivacyParameters - the dataset-level privacy budget and disclosure flags.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    FieldPath, Validated, ValidationError, ValidationErrors, ValidationPolicy,
};

use super::{Delta, Epsilon, ParameterInput};

/// Wire form of [`PrivacyParameters`].
///
/// Every field is optional on the wire so that a missing or malformed value
/// is reported by validation at its own path. Only `total_delta` may stay
/// absent in a valid plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivacyParametersInput {
    #[serde(default)]
    pub total_epsilon: Option<ParameterInput>,
    #[serde(default)]
    pub total_delta: Option<ParameterInput>,
    #[serde(default)]
    pub number_of_rows_public: Option<bool>,
    #[serde(default)]
    pub individual_in_at_most_one_row: Option<bool>,
}

/// Validated privacy budget for one dataset.
///
/// `total_delta` may be absent, in which case the dataset is epsilon-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PrivacyParametersInput", into = "PrivacyParametersInput")]
pub struct PrivacyParameters {
    total_epsilon: Epsilon,
    total_delta: Option<Delta>,
    number_of_rows_public: bool,
    individual_in_at_most_one_row: bool,
}

impl PrivacyParameters {
    /// Assembles parameters from already-validated parts.
    pub fn new(
        total_epsilon: Epsilon,
        total_delta: Option<Delta>,
        number_of_rows_public: bool,
        individual_in_at_most_one_row: bool,
    ) -> Self {
        Self {
            total_epsilon,
            total_delta,
            number_of_rows_public,
            individual_in_at_most_one_row,
        }
    }

    /// Validates epsilon and delta together, reporting both if both fail.
    pub fn validate(
        input: &PrivacyParametersInput,
        policy: &ValidationPolicy,
    ) -> Result<Validated<Self>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut warnings = Vec::new();

        let total_epsilon = match &input.total_epsilon {
            None => {
                errors.push(ValidationError::structural(
                    "total_epsilon",
                    "total_epsilon is required",
                ));
                None
            }
            Some(raw) => {
                let epsilon_path = raw.value_path(&FieldPath::new("total_epsilon"));
                match Epsilon::validate_with(raw.value(), policy) {
                    Ok(validated) => Some(validated.drain_into(&mut warnings, &epsilon_path)),
                    Err(e) => {
                        errors.push(e.nested(&epsilon_path));
                        None
                    }
                }
            }
        };

        let total_delta = match &input.total_delta {
            None => Some(None),
            Some(raw) => {
                let delta_path = raw.value_path(&FieldPath::new("total_delta"));
                match Delta::validate_with(raw.value(), policy) {
                    Ok(validated) => Some(Some(validated.drain_into(&mut warnings, &delta_path))),
                    Err(e) => {
                        errors.push(e.nested(&delta_path));
                        None
                    }
                }
            }
        };

        let number_of_rows_public =
            required_flag(input.number_of_rows_public, "number_of_rows_public", &mut errors);
        let individual_in_at_most_one_row = required_flag(
            input.individual_in_at_most_one_row,
            "individual_in_at_most_one_row",
            &mut errors,
        );

        match (
            total_epsilon,
            total_delta,
            number_of_rows_public,
            individual_in_at_most_one_row,
        ) {
            (Some(total_epsilon), Some(total_delta), Some(rows_public), Some(one_row)) => Ok(
                Validated::with_warnings(
                    Self::new(total_epsilon, total_delta, rows_public, one_row),
                    warnings,
                ),
            ),
            _ => Err(errors),
        }
    }

    pub fn total_epsilon(&self) -> Epsilon {
        self.total_epsilon
    }

    pub fn total_delta(&self) -> Option<Delta> {
        self.total_delta
    }

    pub fn number_of_rows_public(&self) -> bool {
        self.number_of_rows_public
    }

    pub fn individual_in_at_most_one_row(&self) -> bool {
        self.individual_in_at_most_one_row
    }

    /// True when no delta budget was declared.
    pub fn is_epsilon_only(&self) -> bool {
        self.total_delta.is_none()
    }
}

fn required_flag(value: Option<bool>, field: &str, errors: &mut ValidationErrors) -> Option<bool> {
    if value.is_none() {
        errors.push(ValidationError::structural(
            field,
            format!("{} is required", field),
        ));
    }
    value
}

/// Deserializing validates under the default policy and discards warnings;
/// call [`PrivacyParameters::validate`] to see them.
impl TryFrom<PrivacyParametersInput> for PrivacyParameters {
    type Error = ValidationErrors;

    fn try_from(input: PrivacyParametersInput) -> Result<Self, Self::Error> {
        Self::validate(&input, &ValidationPolicy::default()).map(Validated::into_inner)
    }
}

impl From<PrivacyParameters> for PrivacyParametersInput {
    fn from(params: PrivacyParameters) -> Self {
        PrivacyParametersInput {
            total_epsilon: Some(params.total_epsilon.into()),
            total_delta: params.total_delta.map(Into::into),
            number_of_rows_public: Some(params.number_of_rows_public),
            individual_in_at_most_one_row: Some(params.individual_in_at_most_one_row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorKind;
    use serde_json::json;

    fn input(value: serde_json::Value) -> PrivacyParametersInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn full_parameters_validate() {
        let params = PrivacyParameters::validate(
            &input(json!({
                "total_epsilon": {"value": 2.5},
                "total_delta": {"value": 0.000005},
                "number_of_rows_public": true,
                "individual_in_at_most_one_row": false
            })),
            &ValidationPolicy::default(),
        )
        .unwrap()
        .into_inner();

        assert_eq!(params.total_epsilon().value(), 2.5);
        assert_eq!(params.total_delta().map(|d| d.value()), Some(0.000005));
        assert!(params.number_of_rows_public());
        assert!(!params.individual_in_at_most_one_row());
    }

    #[test]
    fn missing_delta_stays_absent() {
        let params = PrivacyParameters::validate(
            &input(json!({
                "total_epsilon": {"value": 2.5},
                "number_of_rows_public": true,
                "individual_in_at_most_one_row": false
            })),
            &ValidationPolicy::default(),
        )
        .unwrap()
        .into_inner();

        assert!(params.is_epsilon_only());
        let dumped = serde_json::to_value(params).unwrap();
        assert_eq!(dumped["total_delta"], serde_json::Value::Null);
    }

    #[test]
    fn reports_epsilon_and_delta_errors_together() {
        let errors = PrivacyParameters::validate(
            &input(json!({
                "total_epsilon": {"value": -1.0},
                "total_delta": {"value": 0.5},
                "number_of_rows_public": true,
                "individual_in_at_most_one_row": true
            })),
            &ValidationPolicy::default(),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.at_path("total_epsilon.value")[0].kind(), ErrorKind::Range);
        assert_eq!(errors.at_path("total_delta.value")[0].kind(), ErrorKind::Range);
    }

    #[test]
    fn missing_fields_are_each_reported() {
        let errors = PrivacyParameters::validate(
            &input(json!({"total_delta": {"value": 0.5}})),
            &ValidationPolicy::default(),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.at_path("total_epsilon")[0].kind(),
            ErrorKind::StructuralMismatch
        );
        assert_eq!(errors.at_path("total_delta.value")[0].kind(), ErrorKind::Range);
        assert_eq!(
            errors.at_path("number_of_rows_public")[0].message(),
            "number_of_rows_public is required"
        );
        assert_eq!(errors.at_path("individual_in_at_most_one_row").len(), 1);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result: Result<PrivacyParametersInput, _> = serde_json::from_value(json!({
            "total_epsilon": 1.0,
            "total_epsilom": 1.0,
            "number_of_rows_public": true,
            "individual_in_at_most_one_row": true
        }));
        assert!(result.unwrap_err().to_string().contains("total_epsilom"));
    }

    #[test]
    fn large_epsilon_warns_under_total_epsilon_path() {
        let validated = PrivacyParameters::validate(
            &input(json!({
                "total_epsilon": {"value": 8.0},
                "number_of_rows_public": false,
                "individual_in_at_most_one_row": true
            })),
            &ValidationPolicy::default(),
        )
        .unwrap();

        assert_eq!(validated.warnings().len(), 1);
        assert_eq!(validated.warnings()[0].path().as_str(), "total_epsilon.value");
    }

    #[test]
    fn bare_number_epsilon_is_accepted() {
        let validated = PrivacyParameters::validate(
            &input(json!({
                "total_epsilon": 1.0,
                "total_delta": 1e-05,
                "number_of_rows_public": true,
                "individual_in_at_most_one_row": true
            })),
            &ValidationPolicy::default(),
        );
        assert!(validated.is_ok());
    }

    #[test]
    fn serialization_round_trips() {
        let original = json!({
            "total_epsilon": {"value": 2.5},
            "total_delta": {"value": 0.000005},
            "number_of_rows_public": false,
            "individual_in_at_most_one_row": true
        });
        let params: PrivacyParameters = serde_json::from_value(original.clone()).unwrap();
        let dumped = serde_json::to_value(params).unwrap();
        assert_eq!(dumped, original);

        let rebuilt: PrivacyParameters = serde_json::from_value(dumped).unwrap();
        assert_eq!(rebuilt, params);
    }
}
