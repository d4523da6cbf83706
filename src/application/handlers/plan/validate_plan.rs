//! ValidatePlanHandler - Command handler that turns raw plan text into a
//! validated analysis plan.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{
    FieldPath, PrivacyBudgetWarning, ValidationErrors, ValidationPolicy,
};
use crate::domain::plan::AnalysisPlan;
use crate::ports::{PlanDocument, PlanReader};

use super::ValidationReport;

/// Command to validate one plan document.
#[derive(Debug, Clone)]
pub struct ValidatePlanCommand {
    /// The plan text in the reader's format.
    pub raw: String,
}

impl ValidatePlanCommand {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

/// Result of a successful validation.
#[derive(Debug, Clone)]
pub struct ValidatePlanResult {
    pub plan: AnalysisPlan,
    pub warnings: Vec<PrivacyBudgetWarning>,
}

/// Handler for validating plans.
pub struct ValidatePlanHandler {
    reader: Arc<dyn PlanReader>,
    policy: ValidationPolicy,
}

impl ValidatePlanHandler {
    pub fn new(reader: Arc<dyn PlanReader>, policy: ValidationPolicy) -> Self {
        Self { reader, policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Parses and validates the plan.
    ///
    /// A syntax failure comes back as a single `InvalidInput` error at the
    /// root path, so callers see one error type either way. Fields the
    /// reader had to drop are reported at their own paths together with
    /// every domain error found in the rest of the plan.
    pub fn handle(&self, cmd: ValidatePlanCommand) -> Result<ValidatePlanResult, ValidationErrors> {
        // 1. Parse
        let document = self.reader.read_plan(&cmd.raw).map_err(|e| {
            warn!(format = self.reader.format_name(), error = %e, "plan could not be parsed");
            e.into_validation_errors()
        })?;
        let PlanDocument {
            input,
            mut field_errors,
        } = document;

        // 2. Validate
        let outcome = AnalysisPlan::validate(&input, &self.policy);

        // 3. Merge with dropped fields
        match outcome {
            Ok(validated) if field_errors.is_empty() => {
                let (plan, warnings) = validated.into_parts();
                info!(
                    plan = %plan.name(),
                    statistics = plan.statistics().len(),
                    warnings = warnings.len(),
                    "plan validated"
                );
                Ok(ValidatePlanResult { plan, warnings })
            }
            outcome => {
                if let Err(mut errors) = outcome {
                    let dropped: Vec<FieldPath> =
                        field_errors.iter().map(|e| e.path().clone()).collect();
                    errors.retain(|e| !dropped.iter().any(|d| d.covers(e.path())));
                    field_errors.append(errors);
                }
                info!(plan = %input.name, errors = field_errors.len(), "plan rejected");
                Err(field_errors)
            }
        }
    }

    /// Validates and renders the outcome as a presentation record.
    pub fn report(&self, cmd: ValidatePlanCommand) -> ValidationReport {
        ValidationReport::from_outcome(&self.handle(cmd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BudgetPolicy, ErrorKind, ValidationError};
    use crate::ports::PlanReadError;
    use std::sync::Mutex;

    /// Returns the same outcome for any text and records what it was given.
    struct MockPlanReader {
        outcome: Result<serde_json::Value, String>,
        field_errors: ValidationErrors,
        seen: Mutex<Vec<String>>,
    }

    impl MockPlanReader {
        fn returning(value: serde_json::Value) -> Self {
            Self {
                outcome: Ok(value),
                field_errors: ValidationErrors::new(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                outcome: Err(message.to_string()),
                field_errors: ValidationErrors::new(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn with_dropped_field(mut self, path: &str) -> Self {
            self.field_errors
                .push(ValidationError::invalid_input(path, "invalid type: string \"0.1\""));
            self
        }
    }

    impl PlanReader for MockPlanReader {
        fn read_plan(&self, raw: &str) -> Result<PlanDocument, PlanReadError> {
            self.seen.lock().unwrap().push(raw.to_string());
            match &self.outcome {
                Ok(value) => Ok(PlanDocument::new(
                    serde_json::from_value(value.clone()).unwrap(),
                    self.field_errors.clone(),
                )),
                Err(message) => Err(PlanReadError::syntax("MOCK", message.clone())),
            }
        }

        fn format_name(&self) -> &'static str {
            "MOCK"
        }
    }

    fn plan(total_epsilon: f64, statistic_epsilon: f64) -> serde_json::Value {
        serde_json::json!({
            "name": "Plan",
            "dataset": {
                "name": "D",
                "variables": [{"name": "Age", "var_type": "Integer", "min": 0, "max": 120}]
            },
            "privacy_parameters": {
                "total_epsilon": {"value": total_epsilon},
                "number_of_rows_public": true,
                "individual_in_at_most_one_row": true
            },
            "statistics": [{"variable": "Age", "statistic": "mean", "epsilon": statistic_epsilon}]
        })
    }

    fn handler(reader: MockPlanReader, policy: ValidationPolicy) -> (ValidatePlanHandler, Arc<MockPlanReader>) {
        let reader = Arc::new(reader);
        (ValidatePlanHandler::new(reader.clone(), policy), reader)
    }

    #[test]
    fn valid_plan_is_returned_with_warnings() {
        let (handler, reader) =
            handler(MockPlanReader::returning(plan(8.0, 1.0)), ValidationPolicy::default());

        let result = handler.handle(ValidatePlanCommand::new("raw text")).unwrap();

        assert_eq!(result.plan.name(), "Plan");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(*reader.seen.lock().unwrap(), vec!["raw text".to_string()]);
    }

    #[test]
    fn syntax_failure_becomes_root_invalid_input() {
        let (handler, _) = handler(MockPlanReader::failing("unexpected end"), ValidationPolicy::default());

        let errors = handler.handle(ValidatePlanCommand::new("{")).unwrap_err();

        assert_eq!(errors.len(), 1);
        let err = errors.iter().next().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.path().is_root());
        assert_eq!(err.message(), "MOCK syntax error: unexpected end");
    }

    #[test]
    fn policy_is_applied() {
        let over_budget = plan(1.0, 2.0);

        let (strict, _) = handler(
            MockPlanReader::returning(over_budget.clone()),
            ValidationPolicy::default(),
        );
        assert!(strict.handle(ValidatePlanCommand::new("")).is_err());

        let (relaxed, _) = handler(
            MockPlanReader::returning(over_budget),
            ValidationPolicy::default().with_budget_policy(BudgetPolicy::Unenforced),
        );
        assert!(relaxed.handle(ValidatePlanCommand::new("")).is_ok());
    }

    #[test]
    fn dropped_fields_are_reported_with_domain_errors() {
        let mut raw = plan(-1.0, 0.5);
        raw["statistics"][0].as_object_mut().unwrap().remove("epsilon");
        let reader = MockPlanReader::returning(raw).with_dropped_field("statistics[0].epsilon");
        let (handler, _) = handler(reader, ValidationPolicy::default());

        let errors = handler.handle(ValidatePlanCommand::new("")).unwrap_err();

        assert_eq!(errors.at_path("statistics[0].epsilon").len(), 1);
        assert_eq!(
            errors.at_path("privacy_parameters.total_epsilon.value")[0].kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn dropped_field_fails_an_otherwise_valid_plan() {
        let reader =
            MockPlanReader::returning(plan(1.0, 0.5)).with_dropped_field("statistics[0].confidence_level");
        let (handler, _) = handler(reader, ValidationPolicy::default());

        let errors = handler.handle(ValidatePlanCommand::new("")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn report_summarizes_outcome() {
        let (handler, _) = handler(MockPlanReader::returning(plan(1.0, 2.0)), ValidationPolicy::default());
        let report = handler.report(ValidatePlanCommand::new(""));
        assert!(!report.valid);
        assert_eq!(report.errors[0].kind, ErrorKind::BudgetExceeded);
    }
}
