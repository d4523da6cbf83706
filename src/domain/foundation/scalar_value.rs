//! ScalarValue - a string, number, or boolean taken from the input record.
//!
//! Used for categories, boolean encodings, and fixed replacement values.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ScalarValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, ScalarValue::Bool(_))
    }

    /// Name of the JSON type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarValue::Bool(_) => "boolean",
            ScalarValue::Number(_) => "number",
            ScalarValue::Text(_) => "string",
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self {
        ScalarValue::Number(n)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Number(n) => write!(f, "{}", n),
            ScalarValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_each_json_type() {
        let values: Vec<ScalarValue> = serde_json::from_str(r#"[true, 2, 2.5, "CT"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ScalarValue::Bool(true),
                ScalarValue::Number(2.0),
                ScalarValue::Number(2.5),
                ScalarValue::Text("CT".to_string()),
            ]
        );
    }

    #[test]
    fn number_and_text_of_same_digits_differ() {
        assert_ne!(ScalarValue::Number(1.0), ScalarValue::Text("1".to_string()));
    }

    #[test]
    fn integer_numbers_serialize_without_fraction_loss() {
        let json = serde_json::to_string(&ScalarValue::Number(2.0)).unwrap();
        assert_eq!(json, "2.0");
    }

    #[test]
    fn display_quotes_text() {
        assert_eq!(format!("{}", ScalarValue::from("ME")), "\"ME\"");
        assert_eq!(format!("{}", ScalarValue::from(1.0)), "1");
        assert_eq!(format!("{}", ScalarValue::from(false)), "false");
    }
}
