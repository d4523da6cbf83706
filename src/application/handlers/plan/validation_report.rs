//! ValidationReport - serializable summary of a validation run for a UI or CLI.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ErrorKind, PrivacyBudgetWarning, ValidationError, ValidationErrors};

use super::ValidatePlanResult;

/// One error line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedError {
    pub kind: ErrorKind,
    pub path: String,
    pub message: String,
}

/// One warning line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedWarning {
    pub path: String,
    pub message: String,
}

/// `{valid, errors: [{kind, path, message}], warnings: [{path, message}]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ReportedError>,
    pub warnings: Vec<ReportedWarning>,
}

impl ValidationReport {
    pub fn from_outcome(outcome: &Result<ValidatePlanResult, ValidationErrors>) -> Self {
        match outcome {
            Ok(result) => Self {
                valid: true,
                errors: Vec::new(),
                warnings: result.warnings.iter().map(ReportedWarning::from).collect(),
            },
            Err(errors) => Self {
                valid: false,
                errors: errors.iter().map(ReportedError::from).collect(),
                warnings: Vec::new(),
            },
        }
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&ValidationError> for ReportedError {
    fn from(error: &ValidationError) -> Self {
        Self {
            kind: error.kind(),
            path: error.path().to_string(),
            message: error.message(),
        }
    }
}

impl From<&PrivacyBudgetWarning> for ReportedWarning {
    fn from(warning: &PrivacyBudgetWarning) -> Self {
        Self {
            path: warning.path().to_string(),
            message: warning.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::FieldPath;
    use serde_json::json;

    #[test]
    fn failed_outcome_lists_errors() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::range(
            "privacy_parameters.total_epsilon.value",
            "epsilon must be greater than or equal to 0, got -1",
        ));
        errors.push(ValidationError::reference("statistics[0].variable", "TypingSpeed"));

        let report = ValidationReport::from_outcome(&Err(errors));

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "valid": false,
                "errors": [
                    {
                        "kind": "RANGE_ERROR",
                        "path": "privacy_parameters.total_epsilon.value",
                        "message": "epsilon must be greater than or equal to 0, got -1"
                    },
                    {
                        "kind": "REFERENCE_ERROR",
                        "path": "statistics[0].variable",
                        "message": "variable \"TypingSpeed\" was not found in the dataset"
                    }
                ],
                "warnings": []
            })
        );
    }

    #[test]
    fn root_path_renders_readably() {
        let errors: ValidationErrors =
            ValidationError::invalid_input(FieldPath::root(), "JSON syntax error").into();
        let report = ValidationReport::from_outcome(&Err(errors));
        assert_eq!(report.errors[0].path, "(root)");
    }

    #[test]
    fn json_rendering_is_pretty() {
        let report = ValidationReport {
            valid: true,
            errors: vec![],
            warnings: vec![ReportedWarning {
                path: "statistics[0].epsilon".to_string(),
                message: "Epsilon shouldn't be greater than 5.0".to_string(),
            }],
        };
        let rendered = report.to_json().unwrap();
        assert!(rendered.contains("\n  \"valid\": true"));
    }
}
