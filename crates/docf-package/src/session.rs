//! Explicit owner of the currently open document

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::Result;
use crate::open::{open_package, OpenedPackage};

/// Keeps at most one opened package alive at a time.
///
/// Opening a new package releases the previous working directory before the
/// new extraction begins.
#[derive(Debug)]
pub struct Session {
    scratch_dir: PathBuf,
    current: Option<OpenedPackage>,
}

impl Session {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            current: None,
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn current(&self) -> Option<&OpenedPackage> {
        self.current.as_ref()
    }

    pub fn open(&mut self, package_path: &Path) -> Result<&OpenedPackage> {
        if let Err(e) = self.close() {
            warn!("Previous document was not fully cleaned up: {}", e);
        }
        let opened = open_package(package_path, &self.scratch_dir)?;
        Ok(self.current.insert(opened))
    }

    /// Hand the current document to the caller without releasing it
    pub fn detach(&mut self) -> Option<OpenedPackage> {
        self.current.take()
    }

    /// Release the current document, if any
    pub fn close(&mut self) -> Result<()> {
        match self.current.take() {
            Some(mut opened) => opened.working_dir.release(),
            None => Ok(()),
        }
    }
}
