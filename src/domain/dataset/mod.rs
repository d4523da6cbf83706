//! Dataset module - variable definitions and the dataset that owns them.

mod dataset;
mod variable;

pub use dataset::{Dataset, DatasetInput};
pub use variable::{BooleanEncoding, Variable, VariableInput, VariableKind};
