//! Error taxonomy for plan validation.
//!
//! Every hard failure is a [`ValidationError`] pinned to the [`FieldPath`]
//! of the offending field. Aggregates return [`ValidationErrors`] so that
//! all problems in one record are reported together.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::FieldPath;

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A scalar lies outside its legal numeric range.
    #[error("{path}: {message}")]
    Range { path: FieldPath, message: String },

    /// A field is present or absent in violation of a type-conditional rule.
    #[error("{path}: {message}")]
    StructuralMismatch { path: FieldPath, message: String },

    /// A statistic names a variable the dataset does not define.
    #[error("{path}: variable \"{var_name}\" was not found in the dataset")]
    Reference { path: FieldPath, var_name: String },

    /// The statistics ask for more epsilon than the dataset provides.
    #[error("{path}: only {available} epsilon is available, but the statistics request {requested} epsilon")]
    BudgetExceeded {
        path: FieldPath,
        available: f64,
        requested: f64,
    },

    /// The input record itself is malformed (unknown enum member, empty name, bad syntax).
    #[error("{path}: {message}")]
    InvalidInput { path: FieldPath, message: String },
}

impl ValidationError {
    pub fn range(path: impl Into<FieldPath>, message: impl Into<String>) -> Self {
        ValidationError::Range {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn structural(path: impl Into<FieldPath>, message: impl Into<String>) -> Self {
        ValidationError::StructuralMismatch {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn reference(path: impl Into<FieldPath>, var_name: impl Into<String>) -> Self {
        ValidationError::Reference {
            path: path.into(),
            var_name: var_name.into(),
        }
    }

    pub fn budget_exceeded(path: impl Into<FieldPath>, available: f64, requested: f64) -> Self {
        ValidationError::BudgetExceeded {
            path: path.into(),
            available,
            requested,
        }
    }

    pub fn invalid_input(path: impl Into<FieldPath>, message: impl Into<String>) -> Self {
        ValidationError::InvalidInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Range { .. } => ErrorKind::Range,
            ValidationError::StructuralMismatch { .. } => ErrorKind::StructuralMismatch,
            ValidationError::Reference { .. } => ErrorKind::Reference,
            ValidationError::BudgetExceeded { .. } => ErrorKind::BudgetExceeded,
            ValidationError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }

    /// Returns the path of the offending field.
    pub fn path(&self) -> &FieldPath {
        match self {
            ValidationError::Range { path, .. }
            | ValidationError::StructuralMismatch { path, .. }
            | ValidationError::Reference { path, .. }
            | ValidationError::BudgetExceeded { path, .. }
            | ValidationError::InvalidInput { path, .. } => path,
        }
    }

    /// Returns the human-readable message without the path.
    pub fn message(&self) -> String {
        match self {
            ValidationError::Range { message, .. }
            | ValidationError::StructuralMismatch { message, .. }
            | ValidationError::InvalidInput { message, .. } => message.clone(),
            ValidationError::Reference { var_name, .. } => {
                format!("variable \"{}\" was not found in the dataset", var_name)
            }
            ValidationError::BudgetExceeded {
                available,
                requested,
                ..
            } => format!(
                "only {} epsilon is available, but the statistics request {} epsilon",
                available, requested
            ),
        }
    }

    /// Re-roots the error under the path of an enclosing record.
    pub fn nested(mut self, prefix: &FieldPath) -> Self {
        let path = match &mut self {
            ValidationError::Range { path, .. }
            | ValidationError::StructuralMismatch { path, .. }
            | ValidationError::Reference { path, .. }
            | ValidationError::BudgetExceeded { path, .. }
            | ValidationError::InvalidInput { path, .. } => path,
        };
        *path = path.prefixed(prefix);
        self
    }
}

/// Error categories, stable for clients that branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    #[serde(rename = "RANGE_ERROR")]
    Range,
    StructuralMismatch,
    #[serde(rename = "REFERENCE_ERROR")]
    Reference,
    BudgetExceeded,
    InvalidInput,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Range => "RANGE_ERROR",
            ErrorKind::StructuralMismatch => "STRUCTURAL_MISMATCH",
            ErrorKind::Reference => "REFERENCE_ERROR",
            ErrorKind::BudgetExceeded => "BUDGET_EXCEEDED",
            ErrorKind::InvalidInput => "INVALID_INPUT",
        };
        write!(f, "{}", s)
    }
}

/// All violations found while validating one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Adds a child record's errors, re-rooted under `prefix`.
    pub fn absorb(&mut self, child: ValidationErrors, prefix: &FieldPath) {
        self.0
            .extend(child.0.into_iter().map(|e| e.nested(prefix)));
    }

    /// Appends every error of `other`, keeping their paths.
    pub fn append(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn retain(&mut self, keep: impl FnMut(&ValidationError) -> bool) {
        self.0.retain(keep);
    }

    /// Records the error side of `result` and hands back the value, if any.
    pub fn collect<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Returns true if any error has the given kind.
    pub fn contains_kind(&self, kind: ErrorKind) -> bool {
        self.0.iter().any(|e| e.kind() == kind)
    }

    /// Returns the errors reported at exactly `path`.
    pub fn at_path(&self, path: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.path().as_str() == path).collect()
    }

    /// Ok with `value` when no error was collected, otherwise the collection.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "; [{}] {}", error.kind(), error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_displays_path_and_message() {
        let err = ValidationError::range("total_epsilon.value", "epsilon must be >= 0, got -2");
        assert_eq!(
            format!("{}", err),
            "total_epsilon.value: epsilon must be >= 0, got -2"
        );
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn reference_error_names_missing_variable() {
        let err = ValidationError::reference("statistics[1].variable", "TypingSpeed");
        assert_eq!(
            format!("{}", err),
            "statistics[1].variable: variable \"TypingSpeed\" was not found in the dataset"
        );
        assert_eq!(err.message(), "variable \"TypingSpeed\" was not found in the dataset");
    }

    #[test]
    fn budget_exceeded_carries_amounts() {
        let err = ValidationError::budget_exceeded("statistics", 1.0, 1.5);
        match &err {
            ValidationError::BudgetExceeded {
                available,
                requested,
                ..
            } => {
                assert_eq!(*available, 1.0);
                assert_eq!(*requested, 1.5);
            }
            _ => panic!("Expected BudgetExceeded"),
        }
        assert_eq!(err.kind(), ErrorKind::BudgetExceeded);
    }

    #[test]
    fn nested_prefixes_path() {
        let err = ValidationError::structural("bounds", "bounds are required")
            .nested(&FieldPath::new("variables[0]"));
        assert_eq!(err.path().as_str(), "variables[0].bounds");
    }

    #[test]
    fn absorb_keeps_every_child_error() {
        let mut child = ValidationErrors::new();
        child.push(ValidationError::range("min", "a"));
        child.push(ValidationError::structural("categories", "b"));

        let mut parent = ValidationErrors::new();
        parent.absorb(child, &FieldPath::new("dataset"));

        assert_eq!(parent.len(), 2);
        assert_eq!(parent.at_path("dataset.min").len(), 1);
        assert_eq!(parent.at_path("dataset.categories").len(), 1);
    }

    #[test]
    fn append_and_retain_keep_order() {
        let mut errors = ValidationErrors::from(ValidationError::range("a", "first"));
        let mut more = ValidationErrors::new();
        more.push(ValidationError::range("b", "second"));
        more.push(ValidationError::range("c", "third"));
        errors.append(more);
        errors.retain(|e| e.path().as_str() != "b");

        let paths: Vec<&str> = errors.iter().map(|e| e.path().as_str()).collect();
        assert_eq!(paths, vec!["a", "c"]);
    }

    #[test]
    fn into_result_is_ok_only_when_empty() {
        assert_eq!(ValidationErrors::new().into_result(|| 7), Ok(7));

        let errors = ValidationErrors::from(ValidationError::invalid_input("name", "empty"));
        assert!(errors.into_result(|| 7).is_err());
    }

    #[test]
    fn contains_kind_finds_matching_error() {
        let errors = ValidationErrors::from(ValidationError::reference("x", "y"));
        assert!(errors.contains_kind(ErrorKind::Reference));
        assert!(!errors.contains_kind(ErrorKind::Range));
    }

    #[test]
    fn error_kind_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorKind::Range), "RANGE_ERROR");
        assert_eq!(format!("{}", ErrorKind::StructuralMismatch), "STRUCTURAL_MISMATCH");
        assert_eq!(format!("{}", ErrorKind::BudgetExceeded), "BUDGET_EXCEEDED");
    }

    #[test]
    fn errors_display_lists_each_error() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::range("a", "too small"));
        errors.push(ValidationError::invalid_input("b", "empty"));
        assert_eq!(
            format!("{}", errors),
            "2 validation error(s); [RANGE_ERROR] a: too small; [INVALID_INPUT] b: empty"
        );
    }
}
