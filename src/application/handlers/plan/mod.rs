//! Plan handlers - validating analysis plans.

mod validate_plan;
mod validation_report;

pub use validate_plan::{ValidatePlanCommand, ValidatePlanHandler, ValidatePlanResult};
pub use validation_report::{ReportedError, ReportedWarning, ValidationReport};
