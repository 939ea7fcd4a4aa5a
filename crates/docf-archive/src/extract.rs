//! Streaming extraction of a package into a destination directory

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::errors::ArchiveError;
use crate::policy::{classify, EntryVerdict, SkipReason};

/// An archive entry that extraction refused to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: SkipReason,
}

/// What an extraction wrote and what it left out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Files written, relative to the destination root
    pub files: Vec<PathBuf>,
    pub directories: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl ExtractionReport {
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Extract `package_path` into `destination`.
///
/// Entries with a denied extension or a path that would land outside
/// `destination` are skipped and recorded in the report; they never abort the
/// run. Any read or write failure aborts the whole extraction.
pub fn extract(package_path: &Path, destination: &Path) -> Result<ExtractionReport, ArchiveError> {
    let file = match fs::File::open(package_path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ArchiveError::PackageNotFound(package_path.to_path_buf()));
        }
        Err(e) => return Err(ArchiveError::Io(e)),
    };
    let mut archive = ZipArchive::new(file)?;
    let mut report = ExtractionReport::default();

    debug!(
        "Extracting {} entries from {:?} into {:?}",
        archive.len(),
        package_path,
        destination
    );

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        let relative = match classify(&name) {
            EntryVerdict::Extract(relative) => relative,
            EntryVerdict::Skip(reason) => {
                warn!("Skipping archive entry {:?}: {}", name, reason);
                report.skipped.push(SkippedEntry { name, reason });
                continue;
            }
        };

        let target = destination.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            report.directories += 1;
            continue;
        }

        if relative.as_os_str().is_empty() {
            warn!("Skipping archive entry {:?}: resolves to the root", name);
            report.skipped.push(SkippedEntry {
                name,
                reason: SkipReason::EscapesDestination,
            });
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(fs::File::create(&target)?);
        io::copy(&mut entry, &mut writer)?;
        writer.flush()?;

        debug!("Extracted {:?}", relative);
        report.files.push(relative);
    }

    info!(
        "Extracted {} file(s) from {:?} ({} skipped)",
        report.files.len(),
        package_path,
        report.skipped.len()
    );
    Ok(report)
}
