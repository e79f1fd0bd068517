//! Configuration handling for the TUI

use crate::api::{DEFAULT_API_URL, DEFAULT_GEOGRAPHY_URL};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment override for the API address
pub const API_URL_ENV: &str = "PERMUTAS_API_URL";
/// Environment override for the geography service address
pub const GEOGRAPHY_URL_ENV: &str = "PERMUTAS_GEOGRAPHY_URL";
/// Token written to the store at startup
pub const TOKEN_ENV: &str = "PERMUTAS_TOKEN";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Permutas API address
    pub api_url: Option<String>,
    /// Geography lookup service address
    pub geography_url: Option<String>,
    /// Where the key-value store lives (defaults to the data dir)
    pub storage_path: Option<PathBuf>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("br", "permutas", "permutas-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the store and the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api_url = Some(url);
        }
        if let Some(url) = lookup(GEOGRAPHY_URL_ENV).filter(|v| !v.is_empty()) {
            self.geography_url = Some(url);
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn geography_url(&self) -> &str {
        self.geography_url.as_deref().unwrap_or(DEFAULT_GEOGRAPHY_URL)
    }

    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_path
            .clone()
            .or_else(|| Self::data_dir().map(|dir| dir.join("storage.json")))
    }
}
