use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a package container
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt or unreadable archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Package not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}
