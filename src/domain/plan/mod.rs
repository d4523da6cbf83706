//! Plan module - the analysis plan aggregate and its cross-part rules.

mod analysis_plan;
mod library;
mod rules;

pub use analysis_plan::{AnalysisPlan, AnalysisPlanInput};
pub use library::LibraryDescriptor;

pub use crate::domain::foundation::BudgetPolicy;
