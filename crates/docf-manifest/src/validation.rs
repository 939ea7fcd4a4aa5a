//! Schema checks for manifests and their entry files

use serde_json::Value;
use std::path::{Component, Path};

use crate::constants::REQUIRED_FIELDS;
use crate::errors::ManifestError;
use crate::types::Manifest;

/// Truthiness of a JSON value: absent, `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn is_blank_or_non_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_none_or(|s| s.trim().is_empty())
}

/// Validate an untyped candidate document.
///
/// This is the check run on anything that has not been through the typed
/// [`Manifest`] yet: freshly parsed files and caller supplied documents.
pub fn validate_value(candidate: &Value) -> Result<(), ManifestError> {
    let Some(object) = candidate.as_object() else {
        return Err(ManifestError::Invalid(
            "Manifest must be a valid JSON object".to_string(),
        ));
    };

    for field in REQUIRED_FIELDS {
        if !is_truthy(object.get(field)) {
            return Err(ManifestError::Invalid(format!(
                "Missing required field: {}",
                field
            )));
        }
    }

    if is_blank_or_non_string(object.get("title")) {
        return Err(ManifestError::Invalid(
            "Title must be a non-empty string".to_string(),
        ));
    }

    if is_blank_or_non_string(object.get("entryFile")) {
        return Err(ManifestError::Invalid(
            "Entry file must be a non-empty string".to_string(),
        ));
    }

    Ok(())
}

impl Manifest {
    /// Validate the required fields of a typed manifest
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.title.is_empty() {
            return Err(ManifestError::Invalid(
                "Missing required field: title".to_string(),
            ));
        }
        if self.entry_file.is_empty() {
            return Err(ManifestError::Invalid(
                "Missing required field: entryFile".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(ManifestError::Invalid(
                "Title must be a non-empty string".to_string(),
            ));
        }
        if self.entry_file.trim().is_empty() {
            return Err(ManifestError::Invalid(
                "Entry file must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Check that `entry_file` names a regular file inside `docs_path`
pub fn validate_entry_file(docs_path: &Path, entry_file: &str) -> Result<(), ManifestError> {
    let relative = Path::new(entry_file);
    let stays_inside = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !stays_inside {
        return Err(ManifestError::EntryOutsideDocs(entry_file.to_string()));
    }

    let entry_path = docs_path.join(relative);
    match std::fs::metadata(&entry_path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ManifestError::EntryNotFile(entry_file.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ManifestError::EntryFileMissing(entry_file.to_string()))
        }
        Err(e) => Err(ManifestError::Io(e)),
    }
}
