//! Folder scanning and manifest synthesis

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{DEFAULT_THEME, DOCS_FOLDER, MARKDOWN_EXTENSIONS};
use crate::errors::ManifestError;
use crate::types::Manifest;

/// True when `name` carries a Markdown extension (case-insensitive)
pub fn is_markdown(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
}

/// Scan the payload folder of `source_folder`.
///
/// Returns the names of the Markdown files found directly in `docs/`, sorted
/// ascending by byte order. Fails when the folder is missing, is not a
/// directory, or holds no Markdown file.
pub fn scan_docs(source_folder: &Path) -> Result<Vec<String>, ManifestError> {
    let docs_path = source_folder.join(DOCS_FOLDER);

    match fs::metadata(&docs_path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ManifestError::DocsNotDirectory(docs_path)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ManifestError::DocsFolderMissing(docs_path));
        }
        Err(e) => return Err(ManifestError::Io(e)),
    }

    let mut markdown_files = Vec::new();
    for entry in fs::read_dir(&docs_path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_markdown(&name) {
            markdown_files.push(name);
        }
    }

    if markdown_files.is_empty() {
        return Err(ManifestError::NoMarkdownFiles);
    }

    markdown_files.sort();
    debug!(
        "Found {} Markdown file(s) in {:?}",
        markdown_files.len(),
        docs_path
    );
    Ok(markdown_files)
}

/// Pick the entry file: `README.md`, then `index.md`, then the first name
fn select_entry_file(markdown_files: &[String]) -> Option<&String> {
    markdown_files
        .iter()
        .find(|f| f.eq_ignore_ascii_case("readme.md"))
        .or_else(|| {
            markdown_files
                .iter()
                .find(|f| f.eq_ignore_ascii_case("index.md"))
        })
        .or_else(|| markdown_files.first())
}

fn folder_title(source_folder: &Path) -> String {
    source_folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            fs::canonicalize(source_folder)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| "Documentation".to_string())
}

/// Synthesize a manifest from the structure of `source_folder`
pub fn generate(source_folder: &Path) -> Result<Manifest, ManifestError> {
    let markdown_files = scan_docs(source_folder)?;
    let entry_file = select_entry_file(&markdown_files).ok_or(ManifestError::NoMarkdownFiles)?;

    let manifest = Manifest::new(folder_title(source_folder), entry_file.clone())
        .with_theme(DEFAULT_THEME);

    info!(
        "Generated manifest for {:?} (entry: {})",
        source_folder, manifest.entry_file
    );
    Ok(manifest)
}
