//! Adapters - Implementations of port interfaces.
//!
//! - `input` - JSON and YAML plan readers, plan file loading

pub mod input;

pub use input::{read_plan_file, reader_for_path, JsonPlanReader, YamlPlanReader};
