//! Manifest persistence - loading from and saving to a package directory

use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::MANIFEST_FILENAME;
use crate::errors::ManifestError;
use crate::types::Manifest;
use crate::validation::validate_value;

/// Load and validate the manifest stored in `dir_path`.
///
/// The three caller-facing failures are kept apart: a missing document is
/// [`ManifestError::NotFound`], unparseable or wrongly shaped JSON is
/// [`ManifestError::InvalidFormat`], and a schema violation is
/// [`ManifestError::Invalid`].
pub fn load(dir_path: &Path) -> Result<Manifest, ManifestError> {
    let manifest_path = dir_path.join(MANIFEST_FILENAME);
    debug!("Loading manifest from {:?}", manifest_path);

    let content = match fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ManifestError::NotFound(manifest_path));
        }
        Err(e) => return Err(ManifestError::Io(e)),
    };

    let value: Value = serde_json::from_str(&content).map_err(|e| {
        ManifestError::InvalidFormat(format!("{} is not valid JSON: {}", MANIFEST_FILENAME, e))
    })?;

    validate_value(&value)?;

    let manifest: Manifest = serde_json::from_value(value).map_err(|e| {
        ManifestError::InvalidFormat(format!(
            "{} has an unexpected shape: {}",
            MANIFEST_FILENAME, e
        ))
    })?;

    debug!(
        "Manifest loaded: title={:?} entry={:?} version={}",
        manifest.title, manifest.entry_file, manifest.version
    );
    Ok(manifest)
}

/// Validate and write `manifest` into `dir_path`, returning the written path
pub fn save(dir_path: &Path, manifest: &Manifest) -> Result<PathBuf, ManifestError> {
    manifest.validate()?;

    let manifest_path = dir_path.join(MANIFEST_FILENAME);
    let content = manifest.to_json_string()?;

    let file = fs::File::create(&manifest_path)?;
    let mut writer = io::BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;

    debug!("Manifest written to {:?}", manifest_path);
    Ok(manifest_path)
}
