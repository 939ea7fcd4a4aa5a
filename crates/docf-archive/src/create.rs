//! Deterministic package creation from a directory tree

use std::fs;
use std::io::{self, BufReader, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::errors::ArchiveError;
use crate::policy::is_allowed_asset;

const PARTIAL_SUFFIX: &str = ".partial";

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    output.with_file_name(name)
}

/// Archive name for a path relative to the source root, always `/`-separated
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn base_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
        .last_modified_time(DateTime::default())
}

fn write_tree(source_dir: &Path, output: &Path, partial: &Path) -> Result<usize, ArchiveError> {
    let file = fs::File::create(partial)?;
    let excluded: Vec<PathBuf> = [output, partial]
        .iter()
        .filter_map(|p| fs::canonicalize(p).ok())
        .collect();

    let mut writer = ZipWriter::new(file);
    let file_options = base_options().unix_permissions(0o644);
    let dir_options = base_options().unix_permissions(0o755);
    let mut file_count = 0;

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .sort_by_file_name()
        .follow_links(false)
    {
        let entry = entry?;
        let path = entry.path();
        let relative = path.strip_prefix(source_dir).unwrap_or(path);
        let name = archive_name(relative);

        if entry.file_type().is_dir() {
            writer.add_directory(format!("{}/", name), dir_options)?;
            continue;
        }

        let Ok(canonical) = fs::canonicalize(path) else {
            warn!("Skipping dangling link {:?}", path);
            continue;
        };
        if excluded.contains(&canonical) {
            debug!("Not packing the output file into itself: {:?}", path);
            continue;
        }
        if entry.file_type().is_symlink() && canonical.is_dir() {
            warn!("Skipping symlinked directory {:?}", path);
            continue;
        }
        if !is_allowed_asset(relative) {
            debug!("Packing asset outside the usual payload types: {}", name);
        }

        writer.start_file(name.as_str(), file_options)?;
        let mut reader = BufReader::new(fs::File::open(path)?);
        io::copy(&mut reader, &mut writer)?;
        file_count += 1;
        debug!("Added {}", name);
    }

    let mut file = writer.finish()?;
    file.flush()?;
    file.sync_all()?;
    Ok(file_count)
}

/// Pack every file under `source_dir` into a new ZIP at `package_path`.
///
/// Paths are stored relative to `source_dir` with no wrapping folder. The
/// archive is written next to `package_path` first and moved into place only
/// once it has been fully written and synced.
pub fn create(source_dir: &Path, package_path: &Path) -> Result<PathBuf, ArchiveError> {
    if !source_dir.is_dir() {
        return Err(ArchiveError::SourceNotFound(source_dir.to_path_buf()));
    }
    if let Some(parent) = package_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let partial = partial_path(package_path);
    match write_tree(source_dir, package_path, &partial) {
        Ok(file_count) => {
            fs::rename(&partial, package_path)?;
            info!(
                "Created {:?} with {} file(s)",
                package_path, file_count
            );
            Ok(package_path.to_path_buf())
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&partial) {
                debug!("Could not remove partial archive {:?}: {}", partial, cleanup);
            }
            Err(e)
        }
    }
}
