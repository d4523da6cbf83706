//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PlanReader` - Parses raw plan text (JSON, YAML) into an input record

mod plan_reader;

pub use plan_reader::{PlanDocument, PlanReadError, PlanReader};
