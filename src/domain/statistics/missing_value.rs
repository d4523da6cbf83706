//! Missing-value handling declared for one statistic.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MissingValueType, ScalarValue, ValidationError, ValidationErrors};

/// Wire form: `{"type": "insert_fixed", "fixed_value": 35}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingValueHandlingInput {
    #[serde(rename = "type", default)]
    pub handling_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_value: Option<ScalarValue>,
}

/// How nulls in the variable are treated before the statistic runs.
#[derive(Debug, Clone, PartialEq)]
pub enum MissingValueHandling {
    Drop,
    InsertRandom,
    InsertFixed(ScalarValue),
    NotApplicable,
}

impl MissingValueHandling {
    /// Paths in the returned errors are relative to the handling record.
    pub fn validate(input: &MissingValueHandlingInput) -> Result<Self, ValidationErrors> {
        let Some(handling_type) = MissingValueType::from_name(&input.handling_type) else {
            return Err(ValidationError::invalid_input(
                "type",
                format!(
                    "unknown missing value handling \"{}\"; expected one of {}",
                    input.handling_type,
                    MissingValueType::allowed_names()
                ),
            )
            .into());
        };

        match (handling_type, &input.fixed_value) {
            (MissingValueType::InsertFixed, Some(value)) => Ok(Self::InsertFixed(value.clone())),
            (MissingValueType::InsertFixed, None) => Err(ValidationError::structural(
                "fixed_value",
                "a fixed_value is required for \"insert_fixed\"",
            )
            .into()),
            (other, Some(_)) => Err(ValidationError::structural(
                "fixed_value",
                format!(
                    "fixed_value is only allowed for \"insert_fixed\", not \"{}\"",
                    other.name()
                ),
            )
            .into()),
            (MissingValueType::Drop, None) => Ok(Self::Drop),
            (MissingValueType::InsertRandom, None) => Ok(Self::InsertRandom),
            (MissingValueType::NotApplicable, None) => Ok(Self::NotApplicable),
        }
    }

    pub fn handling_type(&self) -> MissingValueType {
        match self {
            Self::Drop => MissingValueType::Drop,
            Self::InsertRandom => MissingValueType::InsertRandom,
            Self::InsertFixed(_) => MissingValueType::InsertFixed,
            Self::NotApplicable => MissingValueType::NotApplicable,
        }
    }

    pub fn fixed_value(&self) -> Option<&ScalarValue> {
        match self {
            Self::InsertFixed(value) => Some(value),
            _ => None,
        }
    }
}

impl From<MissingValueHandling> for MissingValueHandlingInput {
    fn from(handling: MissingValueHandling) -> Self {
        let handling_type = handling.handling_type().name().to_string();
        let fixed_value = match handling {
            MissingValueHandling::InsertFixed(value) => Some(value),
            _ => None,
        };
        Self {
            handling_type,
            fixed_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorKind;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<MissingValueHandling, ValidationErrors> {
        MissingValueHandling::validate(&serde_json::from_value(value).unwrap())
    }

    #[test]
    fn insert_fixed_keeps_value() {
        let handling = parse(json!({"type": "insert_fixed", "fixed_value": 35})).unwrap();
        assert_eq!(handling.fixed_value(), Some(&ScalarValue::Number(35.0)));
        assert_eq!(handling.handling_type().label(), "Insert Fixed Value");
    }

    #[test]
    fn insert_fixed_without_value_fails() {
        let errors = parse(json!({"type": "insert_fixed"})).unwrap_err();
        assert_eq!(
            errors.at_path("fixed_value")[0].kind(),
            ErrorKind::StructuralMismatch
        );
    }

    #[test]
    fn drop_with_value_fails() {
        let errors = parse(json!({"type": "drop", "fixed_value": 1})).unwrap_err();
        assert_eq!(errors.at_path("fixed_value").len(), 1);
    }

    #[test]
    fn empty_type_is_not_applicable() {
        assert_eq!(
            parse(json!({"type": ""})).unwrap(),
            MissingValueHandling::NotApplicable
        );
    }

    #[test]
    fn unknown_type_lists_choices() {
        let errors = parse(json!({"type": "impute"})).unwrap_err();
        let err = errors.at_path("type")[0];
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("\"insert_random\""));
    }

    #[test]
    fn converts_back_to_wire_form() {
        let input: MissingValueHandlingInput =
            MissingValueHandling::InsertFixed(ScalarValue::from("n/a")).into();
        assert_eq!(
            serde_json::to_value(input).unwrap(),
            json!({"type": "insert_fixed", "fixed_value": "n/a"})
        );
    }
}
