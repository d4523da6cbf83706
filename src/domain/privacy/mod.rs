//! Privacy module - validated privacy-budget primitives.
//!
//! - `Epsilon`, `Delta` - privacy-loss parameters with hard and soft limits
//! - `ConfidenceLevel` - closed set of interval confidence levels
//! - `Bounds` - clamping range for numeric variables
//! - `PrivacyParameters` - dataset-level budget and disclosure flags
//! - `DataSensitivity` - recommended starting budgets

mod bounds;
mod confidence_level;
mod delta;
mod epsilon;
mod parameter_input;
mod privacy_parameters;
mod sensitivity;

pub use bounds::{Bounds, BoundsInput};
pub use confidence_level::ConfidenceLevel;
pub use delta::Delta;
pub use epsilon::Epsilon;
pub use parameter_input::ParameterInput;
pub use privacy_parameters::{PrivacyParameters, PrivacyParametersInput};
pub use sensitivity::DataSensitivity;
