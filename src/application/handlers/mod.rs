//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod plan;

pub use plan::{
    ReportedError, ReportedWarning, ValidatePlanCommand, ValidatePlanHandler, ValidatePlanResult,
    ValidationReport,
};
