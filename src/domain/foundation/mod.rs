//! Foundation module - Shared domain primitives.
//!
//! Contains the closed vocabularies, thresholds, error taxonomy, and
//! warning plumbing that every validator builds on.

pub mod constants;
mod errors;
mod field_path;
mod histogram_bin_type;
mod missing_value_type;
mod policy;
mod scalar_value;
mod statistic_type;
mod validated;
mod variable_type;

pub use errors::{ErrorKind, ValidationError, ValidationErrors};
pub use field_path::FieldPath;
pub use histogram_bin_type::HistogramBinType;
pub use missing_value_type::MissingValueType;
pub use policy::{BudgetPolicy, ValidationPolicy};
pub use scalar_value::ScalarValue;
pub use statistic_type::StatisticType;
pub use validated::{PrivacyBudgetWarning, Validated};
pub use variable_type::VariableType;
