//! Manifest options shared by `pack` and `validate`

use anyhow::{Context, Result};
use clap::Args;
use docf_config::Config;
use docf_manifest::{generate, validate_value, Manifest};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logger;

#[derive(Args, Debug, Clone, Default)]
pub struct ManifestArgs {
    /// Path to an existing manifest.json to embed
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,
    /// Override the package title
    #[arg(long)]
    pub title: Option<String>,
    /// Override the entry file (relative to docs/)
    #[arg(long)]
    pub entry: Option<String>,
    /// Override the display theme hint
    #[arg(long)]
    pub theme: Option<String>,
    /// Override the author
    #[arg(long)]
    pub author: Option<String>,
}

/// Read a manifest document supplied on the command line
pub fn read_manifest_file(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to load manifest from \"{}\"", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to load manifest from \"{}\"", path.display()))?;
    validate_value(&value)?;
    Ok(serde_json::from_value(value)?)
}

impl ManifestArgs {
    fn has_overrides(&self) -> bool {
        self.title.is_some() || self.entry.is_some() || self.theme.is_some() || self.author.is_some()
    }

    fn apply_overrides(&self, mut manifest: Manifest) -> Manifest {
        if let Some(title) = &self.title {
            manifest.title.clone_from(title);
        }
        if let Some(entry) = &self.entry {
            manifest.entry_file.clone_from(entry);
        }
        if let Some(theme) = &self.theme {
            manifest.theme = Some(theme.clone());
        }
        if let Some(author) = &self.author {
            manifest.author = Some(author.clone());
        }
        manifest
    }

    /// Build the manifest to hand to the export flow.
    ///
    /// `None` lets the export flow synthesize one itself. Config defaults only
    /// apply to synthesized manifests; flags override everything.
    pub fn resolve(&self, source: &Path, config: &Config) -> Result<Option<Manifest>> {
        if let Some(path) = &self.manifest {
            logger::debug(&format!("Using manifest from {}", path.display()));
            return Ok(Some(self.apply_overrides(read_manifest_file(path)?)));
        }

        let has_config_defaults = config.default_theme.is_some() || config.default_author.is_some();
        if !(self.has_overrides() || has_config_defaults) || !source.is_dir() {
            return Ok(None);
        }

        let mut manifest = generate(source)?;
        if let Some(theme) = &config.default_theme {
            manifest.theme = Some(theme.clone());
        }
        if let Some(author) = &config.default_author {
            manifest.author = Some(author.clone());
        }
        Ok(Some(self.apply_overrides(manifest)))
    }
}
