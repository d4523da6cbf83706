//! Shared decoding from a parsed document tree into the plan input record.
//!
//! Both readers parse their text into a `serde_json::Value` first. Decoding
//! then runs through `serde_path_to_error` so a field holding the wrong kind
//! of value is located by path. That field is removed and decoding retried,
//! which lets the domain validate everything else in the same pass.

use serde_json::Value;
use serde_path_to_error::{Path, Segment};

use crate::domain::foundation::{FieldPath, ValidationError, ValidationErrors};
use crate::domain::plan::AnalysisPlanInput;
use crate::ports::{PlanDocument, PlanReadError};

/// Upper bound on dropped fields before decoding gives up.
const MAX_FIELD_ERRORS: usize = 100;

pub(super) fn decode_plan(
    format: &'static str,
    mut document: Value,
) -> Result<PlanDocument, PlanReadError> {
    let mut field_errors = ValidationErrors::new();
    let mut dropped: Vec<FieldPath> = Vec::new();

    loop {
        let err = match serde_path_to_error::deserialize::<_, AnalysisPlanInput>(&document) {
            Ok(input) => return Ok(PlanDocument::new(input, field_errors)),
            Err(err) => err,
        };
        let path = field_path(err.path());
        let message = err.inner().to_string();

        // A required field reported missing because it was just dropped is
        // fallout, not a new problem.
        let fallout = missing_field(&message).is_some_and(|name| dropped.contains(&path.field(name)));
        if fallout {
            return Err(PlanReadError::Fields {
                format,
                errors: field_errors,
            });
        }
        if path.is_root() {
            if field_errors.is_empty() {
                return Err(PlanReadError::syntax(format, message));
            }
            field_errors.push(ValidationError::invalid_input(path, message));
            return Err(PlanReadError::Fields {
                format,
                errors: field_errors,
            });
        }

        tracing::debug!(format, path = %path, error = %message, "dropping malformed plan field");
        field_errors.push(ValidationError::invalid_input(path.clone(), message));
        if field_errors.len() >= MAX_FIELD_ERRORS || !remove_field(&mut document, err.path()) {
            return Err(PlanReadError::Fields {
                format,
                errors: field_errors,
            });
        }
        dropped.push(path);
    }
}

/// Name of the field in serde's "missing field `x`" message.
fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

fn field_path(path: &Path) -> FieldPath {
    path.iter().fold(FieldPath::root(), |acc, segment| match segment {
        Segment::Seq { index } => acc.index(*index),
        Segment::Map { key } => acc.field(key),
        Segment::Enum { variant } => acc.field(variant),
        _ => acc,
    })
}

/// Removes the map entry `path` points at. Sequence elements are never
/// removed, since that would shift the indexes of later elements.
fn remove_field(document: &mut Value, path: &Path) -> bool {
    let segments: Vec<&Segment> = path.iter().collect();
    let Some((Segment::Map { key }, parents)) = segments.split_last() else {
        return false;
    };

    let mut node = document;
    for segment in parents {
        node = match (segment, node) {
            (Segment::Map { key }, Value::Object(map)) => match map.get_mut(key.as_str()) {
                Some(child) => child,
                None => return false,
            },
            (Segment::Seq { index }, Value::Array(items)) => match items.get_mut(*index) {
                Some(child) => child,
                None => return false,
            },
            _ => return false,
        };
    }

    match node {
        Value::Object(map) => map.remove(key.as_str()).is_some(),
        _ => false,
    }
}
