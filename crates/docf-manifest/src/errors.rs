use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during manifest operations
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("manifest.json not found")]
    NotFound(PathBuf),

    /// Unparseable document or a document of the wrong shape
    #[error("{0}")]
    InvalidFormat(String),

    /// The document parsed but failed schema validation
    #[error("{0}")]
    Invalid(String),

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("docs folder not found. Please ensure your documentation is in a \"docs\" folder.")]
    DocsFolderMissing(PathBuf),

    #[error("docs is not a directory")]
    DocsNotDirectory(PathBuf),

    #[error("No Markdown files found in docs folder")]
    NoMarkdownFiles,

    #[error("Entry file \"{0}\" not found in docs folder")]
    EntryFileMissing(String),

    #[error("Entry file \"{0}\" is not a file")]
    EntryNotFile(String),

    #[error("Entry file \"{0}\" must be a relative path inside the docs folder")]
    EntryOutsideDocs(String),
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_not_found_display() {
        let err = ManifestError::NotFound(PathBuf::from("/tmp/x/manifest.json"));
        assert_eq!(err.to_string(), "manifest.json not found");
    }

    #[test]
    fn test_docs_missing_names_folder() {
        let err = ManifestError::DocsFolderMissing(PathBuf::from("proj/docs"));
        assert!(err.to_string().starts_with("docs folder not found"));
    }

    #[test]
    fn test_entry_missing_display() {
        let err = ManifestError::EntryFileMissing("guide.md".to_string());
        assert_eq!(
            err.to_string(),
            "Entry file \"guide.md\" not found in docs folder"
        );
    }
}
