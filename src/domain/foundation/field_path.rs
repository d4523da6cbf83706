//! Dotted field paths locating a problem inside a nested input record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a field, e.g. `dataset.variables[2].bounds.max`.
///
/// The empty path addresses the record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// The path of the record being validated.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Creates a path from a dotted string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Appends a named field.
    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    /// Appends a sequence index.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    /// Re-roots this path under `prefix`.
    pub fn prefixed(&self, prefix: &FieldPath) -> Self {
        if prefix.is_root() {
            self.clone()
        } else if self.is_root() {
            prefix.clone()
        } else if self.0.starts_with('[') {
            Self(format!("{}{}", prefix.0, self.0))
        } else {
            Self(format!("{}.{}", prefix.0, self.0))
        }
    }

    /// True when `other` is this path or lies beneath it.
    ///
    /// The root covers every path.
    pub fn covers(&self, other: &FieldPath) -> bool {
        match other.0.strip_prefix(self.0.as_str()) {
            Some(rest) => {
                self.0.is_empty() || rest.is_empty() || rest.starts_with('.') || rest.starts_with('[')
            }
            None => false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
