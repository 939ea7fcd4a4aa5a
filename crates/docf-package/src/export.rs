//! Export flow: source folder → `.docf` package

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use docf_manifest::constants::{DOCS_FOLDER, MANIFEST_FILENAME};
use docf_manifest::{generate, save, scan_docs, validate_entry_file, Manifest};

use crate::errors::{PackageError, Result};
use crate::progress::ExportStage;

/// Result of a successful export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedPackage {
    pub path: PathBuf,
    pub manifest: Manifest,
}

fn check_source(source_folder: &Path) -> Result<()> {
    match fs::metadata(source_folder) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PackageError::SourceNotDirectory(source_folder.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(PackageError::SourceNotFound(source_folder.to_path_buf()))
        }
        Err(e) => Err(PackageError::Io(e)),
    }
}

fn resolve_manifest(source_folder: &Path, supplied: Option<Manifest>) -> Result<Manifest> {
    match supplied {
        Some(manifest) => {
            manifest.validate()?;
            validate_entry_file(&source_folder.join(DOCS_FOLDER), &manifest.entry_file)?;
            debug!("Using supplied manifest for {:?}", source_folder);
            Ok(manifest)
        }
        None => Ok(generate(source_folder)?),
    }
}

/// Run every export check without touching the disk.
///
/// Returns the manifest an export of `source_folder` would embed.
pub fn plan_export(source_folder: &Path, manifest: Option<Manifest>) -> Result<Manifest> {
    check_source(source_folder)?;
    scan_docs(source_folder)?;
    resolve_manifest(source_folder, manifest)
}

/// Restores the source folder's `manifest.json` to what it was before export
struct TransientManifest {
    path: PathBuf,
    previous: Option<Vec<u8>>,
}

impl TransientManifest {
    fn capture(source_folder: &Path) -> Result<Self> {
        let path = source_folder.join(MANIFEST_FILENAME);
        let previous = match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(PackageError::Io(e)),
        };
        Ok(Self { path, previous })
    }

    /// Best-effort: failures are logged, never reported
    fn restore(self) {
        let outcome = match &self.previous {
            Some(bytes) => fs::write(&self.path, bytes),
            None => match fs::remove_file(&self.path) {
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = outcome {
            warn!("Could not clean up {:?}: {}", self.path, e);
        }
    }
}

/// Package `source_folder` into `output_path`.
///
/// When `manifest` is `None` one is synthesized from the folder structure.
/// `on_progress` is told about each stage as it starts; it cannot influence
/// the export.
pub fn export_package(
    source_folder: &Path,
    output_path: &Path,
    manifest: Option<Manifest>,
    mut on_progress: impl FnMut(ExportStage),
) -> Result<ExportedPackage> {
    on_progress(ExportStage::Scanning);
    check_source(source_folder)?;

    on_progress(ExportStage::Validating);
    let markdown_files = scan_docs(source_folder)?;
    debug!("Markdown files: {:?}", markdown_files);

    on_progress(ExportStage::Creating);
    let manifest = resolve_manifest(source_folder, manifest)?;
    let transient = TransientManifest::capture(source_folder)?;
    if let Err(e) = save(source_folder, &manifest) {
        transient.restore();
        return Err(e.into());
    }

    on_progress(ExportStage::Compressing);
    let created = docf_archive::create(source_folder, output_path);
    transient.restore();
    let path = created?;

    on_progress(ExportStage::Complete);
    info!("Exported {:?} to {:?}", source_folder, path);
    Ok(ExportedPackage { path, manifest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(root: &Path) -> io::Result<PathBuf> {
        let source = root.join("proj");
        fs::create_dir_all(source.join("docs"))?;
        fs::write(source.join("docs").join("README.md"), "# Hello")?;
        fs::write(source.join("docs").join("guide.md"), "# Guide")?;
        Ok(source)
    }

    #[test]
    fn test_stages_in_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let source = project(temp.path())?;
        let mut stages = Vec::new();

        export_package(&source, &temp.path().join("out.docf"), None, |s| {
            stages.push(s);
        })?;

        assert_eq!(stages, ExportStage::ALL.to_vec());
        Ok(())
    }

    #[test]
    fn test_failure_has_no_complete_stage() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let mut stages = Vec::new();
        let result = export_package(temp.path(), &temp.path().join("out.docf"), None, |s| {
            stages.push(s);
        });

        assert!(result.is_err());
        assert!(!stages.contains(&ExportStage::Complete));
        assert!(!temp.path().join("out.docf").exists());
        Ok(())
    }

    #[test]
    fn test_transient_manifest_removed() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let source = project(temp.path())?;
        export_package(&source, &temp.path().join("out.docf"), None, |_| {})?;
        assert!(!source.join("manifest.json").exists());
        assert!(source.is_dir());
        Ok(())
    }

    #[test]
    fn test_existing_manifest_restored() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let source = project(temp.path())?;
        fs::write(source.join("manifest.json"), "hand written")?;

        export_package(&source, &temp.path().join("out.docf"), None, |_| {})?;
        assert_eq!(fs::read_to_string(source.join("manifest.json"))?, "hand written");
        Ok(())
    }

    #[test]
    fn test_supplied_manifest_checked_before_mutation(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let source = project(temp.path())?;

        let result = export_package(
            &source,
            &temp.path().join("out.docf"),
            Some(Manifest::new("Docs", "missing.md")),
            |_| {},
        );
        assert!(matches!(
            result,
            Err(PackageError::Manifest(
                docf_manifest::ManifestError::EntryFileMissing(_)
            ))
        ));
        assert!(!source.join("manifest.json").exists());
        assert!(!temp.path().join("out.docf").exists());

        let result = plan_export(&source, Some(Manifest::new(" ", "README.md")));
        assert!(matches!(
            result,
            Err(PackageError::Manifest(docf_manifest::ManifestError::Invalid(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_plan_export_generates() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let source = project(temp.path())?;
        let manifest = plan_export(&source, None)?;
        assert_eq!(manifest.entry_file, "README.md");
        assert!(!source.join("manifest.json").exists());
        Ok(())
    }

    #[test]
    fn test_source_checks() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let missing = temp.path().join("missing");
        assert!(matches!(
            plan_export(&missing, None),
            Err(PackageError::SourceNotFound(_))
        ));

        let file = temp.path().join("file.txt");
        fs::write(&file, "x")?;
        assert!(matches!(
            plan_export(&file, None),
            Err(PackageError::SourceNotDirectory(_))
        ));
        Ok(())
    }
}
