//! Ephemeral working directories for opened packages

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

use docf_manifest::constants::WORKDIR_PREFIX;

use crate::errors::{PackageError, Result};

/// Written into every working directory at creation. A sweep of the scratch
/// directory only removes directories that carry it.
const WORKDIR_MARKER: &str = ".docf-workdir";

/// True when the final component of `path` carries the reserved prefix
fn is_prefixed(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(WORKDIR_PREFIX))
}

/// Recursively remove a working directory.
///
/// Paths whose last component does not start with the reserved prefix are
/// refused and reported as `Ok(false)`, as are paths that no longer exist.
pub fn remove_working_dir(path: &Path) -> Result<bool> {
    if !is_prefixed(path) {
        warn!("Refusing to remove {:?}: not a docf working directory", path);
        return Ok(false);
    }
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!("Removed working directory {:?}", path);
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PackageError::Io(e)),
    }
}

/// Owning handle for one extraction directory.
///
/// Releasing is idempotent. A handle dropped without being released or kept
/// removes its directory on a best-effort basis.
#[derive(Debug)]
pub struct WorkingDir {
    path: PathBuf,
    released: bool,
}

impl WorkingDir {
    /// Create a fresh, uniquely named directory under `scratch_dir`
    pub fn create_in(scratch_dir: &Path) -> Result<Self> {
        fs::create_dir_all(scratch_dir).map_err(PackageError::WorkingDir)?;
        let path = tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir_in(scratch_dir)
            .map_err(PackageError::WorkingDir)?
            .keep();
        if let Err(e) = fs::write(path.join(WORKDIR_MARKER), b"") {
            let _ = fs::remove_dir_all(&path);
            return Err(PackageError::WorkingDir(e));
        }
        debug!("Created working directory {:?}", path);
        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Remove the directory and everything in it. A no-op once released.
    pub fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        remove_working_dir(&self.path)?;
        self.released = true;
        Ok(())
    }

    /// Give up ownership, leaving the directory on disk
    pub fn keep(mut self) -> PathBuf {
        self.released = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("Failed to clean up working directory {:?}: {}", self.path, e);
        }
    }
}

/// Release `working_dir`; calling it again on the same handle does nothing
pub fn close_working_dir(working_dir: &mut WorkingDir) -> Result<()> {
    working_dir.release()
}

/// Remove working directories under `scratch_dir` left behind by sessions
/// that never shut down cleanly. A directory qualifies only if it carries the
/// reserved prefix and the marker written by [`WorkingDir::create_in`]. Only directories last modified more than
/// `older_than` ago are touched. Returns how many were removed.
pub fn purge_stale_working_dirs(scratch_dir: &Path, older_than: Duration) -> Result<usize> {
    let entries = match fs::read_dir(scratch_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(PackageError::Io(e)),
    };

    let now = SystemTime::now();
    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_dir() || !is_prefixed(&path) {
            continue;
        }
        if !path.join(WORKDIR_MARKER).is_file() {
            debug!("Leaving {:?} alone: not created as a working directory", path);
            continue;
        }
        let age = entry
            .metadata()?
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .unwrap_or_default();
        if age < older_than {
            continue;
        }
        match remove_working_dir(&path) {
            Ok(true) => removed += 1,
            Ok(false) => {}
            Err(e) => warn!("Could not purge {:?}: {}", path, e),
        }
    }
    Ok(removed)
}
