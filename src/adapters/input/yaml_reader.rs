//! YAML plan reader.

use crate::ports::{PlanDocument, PlanReadError, PlanReader};

use super::decode::decode_plan;

const FORMAT: &str = "YAML";

/// Reads plans written as YAML documents. Field names match the JSON form.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlPlanReader;

impl YamlPlanReader {
    pub fn new() -> Self {
        Self
    }
}

impl PlanReader for YamlPlanReader {
    fn read_plan(&self, raw: &str) -> Result<PlanDocument, PlanReadError> {
        let document: serde_json::Value =
            serde_yaml::from_str(raw).map_err(|e| PlanReadError::syntax(FORMAT, e.to_string()))?;
        decode_plan(FORMAT, document)
    }

    fn format_name(&self) -> &'static str {
        FORMAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "
name: Plan 3
differentially_private_library:
  name: OpenDP
  version: 0.9.2
dataset:
  name: Educator Survey
  variables:
    - name: Income
      var_type: Integer
      min: 0
      max: 500000
    - name: State
      var_type: Categorical
      categories: [CT, ME]
privacy_parameters:
  total_epsilon: 1.0
  total_delta: 1.0e-5
  number_of_rows_public: true
  individual_in_at_most_one_row: true
statistics:
  - variable: Income
    statistic: mean
    epsilon: 0.25
    missing_value_handling:
      type: insert_fixed
      fixed_value: 35
";

    #[test]
    fn reads_plan_shape() {
        let input = YamlPlanReader::new().read_plan(PLAN).unwrap().input;
        assert_eq!(input.differentially_private_library.name, "OpenDP");
        assert_eq!(input.dataset.variables[0].max, Some(500_000.0));
        assert_eq!(input.privacy_parameters.total_delta.map(|d| d.value()), Some(1e-5));
        assert_eq!(
            input.statistics[0]
                .missing_value_handling
                .as_ref()
                .map(|m| m.handling_type.as_str()),
            Some("insert_fixed")
        );
    }

    #[test]
    fn wrongly_typed_epsilon_is_located() {
        let raw = PLAN.replace("epsilon: 0.25", "epsilon: lots");
        let document = YamlPlanReader::new().read_plan(&raw).unwrap();
        assert_eq!(document.field_errors.at_path("statistics[0].epsilon").len(), 1);
        assert_eq!(document.input.statistics[0].epsilon, None);
    }

    #[test]
    fn bad_indentation_is_a_syntax_error() {
        let err = YamlPlanReader::new()
            .read_plan("name: x\n  dataset: [")
            .unwrap_err();
        assert!(matches!(err, PlanReadError::Syntax { format: "YAML", .. }));
    }
}
