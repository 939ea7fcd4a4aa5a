use docf_archive::ArchiveError;
use docf_manifest::ManifestError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced at the package lifecycle boundary.
///
/// Every variant displays as a single message fit for an end user.
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("Folder \"{}\" not found", .0.display())]
    SourceNotFound(PathBuf),

    #[error("\"{}\" is not a directory", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("Failed to prepare working directory: {0}")]
    WorkingDir(io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PackageError>;
