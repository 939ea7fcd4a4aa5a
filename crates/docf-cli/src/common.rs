//! Common types and utilities shared across commands

use clap::Parser;
use docf_config::Config;
use std::path::{Path, PathBuf};

use crate::logger;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Load the user config, falling back to defaults with a warning
pub fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            logger::warn(&format!("Failed to load config, using defaults: {}", e));
            Config::default()
        }
    }
}

/// Last component of `path`, resolving `.` and friends when needed
pub fn folder_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            std::fs::canonicalize(path)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        })
}

/// Default package path for a source folder: `<folder-name>.docf` in the
/// current directory
pub fn default_output(source: &Path) -> PathBuf {
    let stem = folder_name(source).unwrap_or_else(|| "documentation".to_string());
    PathBuf::from(format!(
        "{}.{}",
        stem,
        docf_manifest::constants::PACKAGE_EXTENSION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins() {
        let opts = GlobalOpts {
            quiet: true,
            verbose: 2,
        };
        assert_eq!(opts.verbosity_level(), 0);
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("some/where/handbook")),
            PathBuf::from("handbook.docf")
        );
        assert_eq!(
            default_output(Path::new("proj/")),
            PathBuf::from("proj.docf")
        );
    }
}
