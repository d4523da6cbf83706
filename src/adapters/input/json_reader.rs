//! JSON plan reader.

use crate::ports::{PlanDocument, PlanReadError, PlanReader};

use super::decode::decode_plan;

const FORMAT: &str = "JSON";

/// Reads plans written as JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPlanReader;

impl JsonPlanReader {
    pub fn new() -> Self {
        Self
    }
}

impl PlanReader for JsonPlanReader {
    fn read_plan(&self, raw: &str) -> Result<PlanDocument, PlanReadError> {
        let document: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| PlanReadError::syntax(FORMAT, e.to_string()))?;
        decode_plan(FORMAT, document)
    }

    fn format_name(&self) -> &'static str {
        FORMAT
    }
}
