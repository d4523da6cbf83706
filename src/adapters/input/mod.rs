//! Input Adapters - PlanReader implementations and file loading.

mod decode;
mod json_reader;
mod plan_file;
mod yaml_reader;

pub use json_reader::JsonPlanReader;
pub use plan_file::{read_plan_file, reader_for_path, MAX_PLAN_FILE_BYTES};
pub use yaml_reader::YamlPlanReader;
