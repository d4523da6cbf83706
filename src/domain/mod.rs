//! Domain layer containing validation rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared vocabulary (type enums, constants, errors, warnings, policy)
//! - `privacy` - Epsilon, delta, confidence levels, bounds, privacy parameters
//! - `dataset` - Variable definitions and the dataset that owns them
//! - `statistics` - Statistic requests, missing-value handling, histogram bins
//! - `plan` - The analysis plan aggregate and its plan-level rules

pub mod dataset;
pub mod foundation;
pub mod plan;
pub mod privacy;
pub mod statistics;
