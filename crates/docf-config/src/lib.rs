//! User configuration for docf
//!
//! Settings live in a TOML file, `~/.config/docf/docf.toml` by default. The
//! `DOCF_CONFIG` environment variable points at a different file, which is how
//! tests and isolated runs keep away from the real one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "DOCF_CONFIG";

pub const CONFIG_FILENAME: &str = "docf.toml";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const KEYS: [&str; 6] = [
    "scratch-dir",
    "default-theme",
    "default-author",
    "viewer-theme",
    "font-size",
    "line-spacing",
];

const VIEWER_THEMES: [&str; 3] = ["system", "light", "dark"];
const FONT_SIZES: [&str; 3] = ["small", "medium", "large"];
const LINE_SPACINGS: [&str; 3] = ["compact", "normal", "relaxed"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}. Supported keys: {keys}", keys = KEYS.join(", "))]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}. Expected one of: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("Could not determine home directory")]
    NoHomeDir,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<String>,
}

/// Directory holding the config file and the log file
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(not(target_os = "windows"))]
    let dir = dirs::home_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join(".config")
        .join("docf");

    #[cfg(target_os = "windows")]
    let dir = dirs::config_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join("docf");

    Ok(dir)
}

fn check_choice(key: &str, value: &str, choices: &[&str]) -> Result<(), ConfigError> {
    if choices.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: choices.join(", "),
        })
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        // Explicit override for tests and isolated runs
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }
        Ok(config_dir()?.join(CONFIG_FILENAME))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path()?)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "scratch-dir" => self.scratch_dir.clone(),
            "default-theme" => self.default_theme.clone(),
            "default-author" => self.default_author.clone(),
            "viewer-theme" => self.viewer_theme.clone(),
            "font-size" => self.font_size.clone(),
            "line-spacing" => self.line_spacing.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "scratch-dir" => self.scratch_dir = Some(value),
            "default-theme" => self.default_theme = Some(value),
            "default-author" => self.default_author = Some(value),
            "viewer-theme" => {
                check_choice(key, &value, &VIEWER_THEMES)?;
                self.viewer_theme = Some(value);
            }
            "font-size" => {
                check_choice(key, &value, &FONT_SIZES)?;
                self.font_size = Some(value);
            }
            "line-spacing" => {
                check_choice(key, &value, &LINE_SPACINGS)?;
                self.line_spacing = Some(value);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values_iter().is_empty()
    }

    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Parent directory for working directories
    pub fn get_scratch_dir(&self) -> PathBuf {
        self.scratch_dir
            .as_ref()
            .map_or_else(std::env::temp_dir, PathBuf::from)
    }

    pub fn get_viewer_theme(&self) -> &str {
        self.viewer_theme.as_deref().unwrap_or("system")
    }

    pub fn get_font_size(&self) -> &str {
        self.font_size.as_deref().unwrap_or("medium")
    }

    pub fn get_line_spacing(&self) -> &str {
        self.line_spacing.as_deref().unwrap_or("normal")
    }
}
