//! Open flow: `.docf` package → working directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use docf_archive::ExtractionReport;
use docf_manifest::constants::DOCS_FOLDER;
use docf_manifest::{load, validate_entry_file, Manifest};

use crate::errors::Result;
use crate::workdir::WorkingDir;

/// A package extracted into its own working directory
#[derive(Debug)]
pub struct OpenedPackage {
    pub working_dir: WorkingDir,
    pub manifest: Manifest,
    pub docs_path: PathBuf,
    /// Entries extraction left out
    pub report: ExtractionReport,
}

impl OpenedPackage {
    pub fn entry_path(&self) -> PathBuf {
        self.docs_path.join(&self.manifest.entry_file)
    }

    /// Names of the regular files directly inside the payload folder
    pub fn list_docs(&self) -> io::Result<Vec<String>> {
        list_files(&self.docs_path)
    }

    /// Entry file text; invalid UTF-8 is replaced rather than rejected
    pub fn read_entry(&self) -> io::Result<String> {
        let bytes = fs::read(self.entry_path())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// A package extracted into a caller-chosen directory
#[derive(Debug, Clone)]
pub struct UnpackedPackage {
    pub destination: PathBuf,
    pub manifest: Manifest,
    pub docs_path: PathBuf,
    pub report: ExtractionReport,
}

pub(crate) fn list_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Extract, then load and check the manifest and its entry file
fn populate(package_path: &Path, root: &Path) -> Result<(Manifest, ExtractionReport)> {
    let report = docf_archive::extract(package_path, root)?;
    let manifest = load(root)?;
    validate_entry_file(&root.join(DOCS_FOLDER), &manifest.entry_file)?;
    Ok((manifest, report))
}

/// Open `package_path` into a fresh working directory under `scratch_dir`.
///
/// On any failure the working directory is removed before the error is
/// returned.
pub fn open_package(package_path: &Path, scratch_dir: &Path) -> Result<OpenedPackage> {
    let mut working_dir = WorkingDir::create_in(scratch_dir)?;

    match populate(package_path, working_dir.path()) {
        Ok((manifest, report)) => {
            let docs_path = working_dir.path().join(DOCS_FOLDER);
            info!(
                "Opened {:?} as \"{}\" in {:?}",
                package_path,
                manifest.title,
                working_dir.path()
            );
            Ok(OpenedPackage {
                working_dir,
                manifest,
                docs_path,
                report,
            })
        }
        Err(e) => {
            if let Err(cleanup) = working_dir.release() {
                warn!(
                    "Failed to clean up working directory {:?}: {}",
                    working_dir.path(),
                    cleanup
                );
            }
            Err(e)
        }
    }
}

/// Extract and validate `package_path` into `destination`.
///
/// The destination belongs to the caller and is left in place on failure.
pub fn unpack_package(package_path: &Path, destination: &Path) -> Result<UnpackedPackage> {
    fs::create_dir_all(destination)?;
    let (manifest, report) = populate(package_path, destination)?;
    info!("Unpacked {:?} into {:?}", package_path, destination);
    Ok(UnpackedPackage {
        destination: destination.to_path_buf(),
        docs_path: destination.join(DOCS_FOLDER),
        manifest,
        report,
    })
}
