//! Read-only listing of a package's entries

use std::fs;
use std::path::Path;

use crate::errors::ArchiveError;
use crate::policy::{classify, EntryVerdict};
use zip::ZipArchive;

/// One entry of a package as extraction would see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub size: u64,
    pub compressed_size: u64,
    pub is_dir: bool,
    pub verdict: EntryVerdict,
}

/// List every entry in `package_path` without writing anything
pub fn inspect(package_path: &Path) -> Result<Vec<EntryInfo>, ArchiveError> {
    if !package_path.is_file() {
        return Err(ArchiveError::PackageNotFound(package_path.to_path_buf()));
    }
    let mut archive = ZipArchive::new(fs::File::open(package_path)?)?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        let name = entry.name().to_string();
        entries.push(EntryInfo {
            verdict: classify(&name),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            is_dir: entry.is_dir(),
            name,
        });
    }

    Ok(entries)
}
