//! MissingValueType enum - declared policy for null values.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValueType {
    Drop,
    InsertRandom,
    InsertFixed,
    #[serde(rename = "")]
    NotApplicable,
}

static ALLOWED_NAMES: Lazy<String> = Lazy::new(|| {
    MissingValueType::all()
        .iter()
        .map(|m| format!("\"{}\"", m.name()))
        .collect::<Vec<_>>()
        .join(", ")
});

impl MissingValueType {
    pub fn all() -> &'static [MissingValueType] {
        &[
            MissingValueType::Drop,
            MissingValueType::InsertRandom,
            MissingValueType::InsertFixed,
            MissingValueType::NotApplicable,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MissingValueType::Drop => "drop",
            MissingValueType::InsertRandom => "insert_random",
            MissingValueType::InsertFixed => "insert_fixed",
            MissingValueType::NotApplicable => "",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.name() == name)
    }

    pub fn allowed_names() -> &'static str {
        ALLOWED_NAMES.as_str()
    }

    /// Returns the label shown to depositors.
    pub fn label(&self) -> &'static str {
        match self {
            MissingValueType::Drop => "Drop Missing Value",
            MissingValueType::InsertRandom => "Insert Random Value",
            MissingValueType::InsertFixed => "Insert Fixed Value",
            MissingValueType::NotApplicable => "Not applicable",
        }
    }
}

impl fmt::Display for MissingValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_not_applicable() {
        assert_eq!(
            MissingValueType::from_name(""),
            Some(MissingValueType::NotApplicable)
        );
    }

    #[test]
    fn labels_match_handling() {
        assert_eq!(MissingValueType::Drop.label(), "Drop Missing Value");
        assert_eq!(MissingValueType::InsertFixed.label(), "Insert Fixed Value");
        assert_eq!(MissingValueType::NotApplicable.label(), "Not applicable");
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(MissingValueType::from_name("impute"), None);
    }

    #[test]
    fn allowed_names_quotes_each_name() {
        assert_eq!(
            MissingValueType::allowed_names(),
            "\"drop\", \"insert_random\", \"insert_fixed\", \"\""
        );
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&MissingValueType::InsertRandom).unwrap();
        assert_eq!(json, "\"insert_random\"");
    }
}
