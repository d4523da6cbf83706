//! Loading plans from disk, choosing the reader by file extension.

use std::path::Path;
use std::sync::Arc;

use crate::ports::{PlanDocument, PlanReadError, PlanReader};

use super::{JsonPlanReader, YamlPlanReader};

/// Maximum plan file size accepted (10 MB).
pub const MAX_PLAN_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Picks a reader for `path` from its extension (`.json`, `.yaml`, `.yml`,
/// case-insensitive).
pub fn reader_for_path(path: &Path) -> Result<Arc<dyn PlanReader>, PlanReadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(Arc::new(JsonPlanReader::new())),
        "yaml" | "yml" => Ok(Arc::new(YamlPlanReader::new())),
        _ => Err(PlanReadError::UnsupportedFormat { extension }),
    }
}

/// Reads and parses a plan file. The result still needs domain validation.
pub fn read_plan_file(path: impl AsRef<Path>) -> Result<PlanDocument, PlanReadError> {
    let path = path.as_ref();
    let reader = reader_for_path(path)?;

    let size = std::fs::metadata(path)
        .map_err(|e| PlanReadError::io(path, e))?
        .len();
    if size > MAX_PLAN_FILE_BYTES {
        return Err(PlanReadError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_PLAN_FILE_BYTES,
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|e| PlanReadError::io(path, e))?;
    tracing::debug!(
        path = %path.display(),
        format = reader.format_name(),
        bytes = size,
        "read plan file"
    );
    reader.read_plan(&raw)
}
