//! Plan Reader Port - turns raw plan text into the unvalidated input record.
//!
//! Readers only check syntax and shape. Every semantic rule lives in the
//! domain, so a reader never rejects a plan for having a negative epsilon.
//!
//! A field holding the wrong kind of value (a string where a boolean
//! belongs) is dropped and reported at its path; the rest of the plan is
//! still decoded so its own problems can be reported alongside.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::foundation::{FieldPath, ValidationError, ValidationErrors};
use crate::domain::plan::AnalysisPlanInput;

/// A decoded plan and the fields dropped while decoding it.
#[derive(Debug, Clone)]
pub struct PlanDocument {
    pub input: AnalysisPlanInput,
    /// One `InvalidInput` per dropped field, at that field's path.
    pub field_errors: ValidationErrors,
}

impl PlanDocument {
    pub fn new(input: AnalysisPlanInput, field_errors: ValidationErrors) -> Self {
        Self {
            input,
            field_errors,
        }
    }

    /// A document in which every field decoded.
    pub fn clean(input: AnalysisPlanInput) -> Self {
        Self::new(input, ValidationErrors::new())
    }

    pub fn is_clean(&self) -> bool {
        self.field_errors.is_empty()
    }
}

/// Port for parsing one serialization format.
///
/// # Usage
///
/// ```rust,ignore
/// let reader: Arc<dyn PlanReader> = Arc::new(JsonPlanReader::new());
/// let document = reader.read_plan(&raw_text)?;
/// let plan = AnalysisPlan::validate(&document.input, &policy)?;
/// ```
pub trait PlanReader: Send + Sync {
    /// Parses `raw` into a plan input record.
    ///
    /// # Errors
    ///
    /// Returns `PlanReadError::Syntax` when the text is not well-formed or
    /// does not have the plan's shape (e.g. `dataset` missing), and
    /// `PlanReadError::Fields` when a required field holds the wrong kind
    /// of value.
    fn read_plan(&self, raw: &str) -> Result<PlanDocument, PlanReadError>;

    /// Short format name for logs and messages, e.g. `"JSON"`.
    fn format_name(&self) -> &'static str;
}

/// Errors raised before validation can start.
#[derive(Debug, Error)]
pub enum PlanReadError {
    #[error("{format} syntax error: {message}")]
    Syntax {
        format: &'static str,
        message: String,
    },

    #[error("{format} plan has malformed fields: {errors}")]
    Fields {
        format: &'static str,
        errors: ValidationErrors,
    },

    #[error("cannot read plan file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("plan file {path} is {size} bytes; the limit is {limit} bytes")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("unsupported plan file extension {extension:?}; expected .json, .yaml or .yml")]
    UnsupportedFormat { extension: String },
}

impl PlanReadError {
    pub fn syntax(format: &'static str, message: impl Into<String>) -> Self {
        Self::Syntax {
            format,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Field problems keep their paths; anything else is one `InvalidInput`
    /// at the root.
    pub fn into_validation_errors(self) -> ValidationErrors {
        match self {
            Self::Fields { errors, .. } => errors,
            other => ValidationError::invalid_input(FieldPath::root(), other.to_string()).into(),
        }
    }
}
