//! VariableType enum - the four kinds of dataset variable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a dataset variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    Integer,
    Float,
    Categorical,
    Boolean,
}

static ALLOWED_NAMES: Lazy<String> = Lazy::new(|| {
    VariableType::all()
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
});

impl VariableType {
    /// Returns all variable types in canonical order.
    pub fn all() -> &'static [VariableType] {
        &[
            VariableType::Integer,
            VariableType::Float,
            VariableType::Categorical,
            VariableType::Boolean,
        ]
    }

    /// Returns the wire name.
    pub fn name(&self) -> &'static str {
        match self {
            VariableType::Integer => "Integer",
            VariableType::Float => "Float",
            VariableType::Categorical => "Categorical",
            VariableType::Boolean => "Boolean",
        }
    }

    /// Looks up a type by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.name() == name)
    }

    /// Comma-separated list of valid names, for error messages.
    pub fn allowed_names() -> &'static str {
        ALLOWED_NAMES.as_str()
    }

    /// Integer and Float variables carry clamping bounds.
    pub fn is_numeric(&self) -> bool {
        matches!(self, VariableType::Integer | VariableType::Float)
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_round_trips_every_type() {
        for t in VariableType::all() {
            assert_eq!(VariableType::from_name(t.name()), Some(*t));
        }
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert_eq!(VariableType::from_name("integer"), None);
        assert_eq!(VariableType::from_name("Text"), None);
    }

    #[test]
    fn allowed_names_lists_all_types() {
        assert_eq!(
            VariableType::allowed_names(),
            "Integer, Float, Categorical, Boolean"
        );
    }

    #[test]
    fn only_integer_and_float_are_numeric() {
        assert!(VariableType::Integer.is_numeric());
        assert!(VariableType::Float.is_numeric());
        assert!(!VariableType::Categorical.is_numeric());
        assert!(!VariableType::Boolean.is_numeric());
    }

    #[test]
    fn serializes_to_wire_name() {
        let json = serde_json::to_string(&VariableType::Categorical).unwrap();
        assert_eq!(json, "\"Categorical\"");
    }
}
