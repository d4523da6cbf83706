//! DP Script Spec - validated analysis plans for differentially private releases
//!
//! This crate reads a plan (dataset description, privacy budget, requested
//! statistics), checks every structural, range, reference, and budget rule,
//! and returns either an immutable validated plan with advisory warnings or
//! the full list of problems found.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
