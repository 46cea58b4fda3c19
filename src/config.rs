//! Configuration handling for the TUI

use crate::lookup::DEFAULT_BASE_URL;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the lookup service base URL
pub const LOOKUP_URL_ENV: &str = "CONTACT_FORM_LOOKUP_URL";

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "contact-form.log";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Lookup service base URL
    pub lookup_base_url: Option<String>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "contact-form", "contact-form")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Get the log directory, creating it if needed
    pub fn log_dir() -> Option<PathBuf> {
        let dir = Self::project_dirs()?.data_local_dir().to_path_buf();
        fs::create_dir_all(&dir).ok()?;
        Some(dir)
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Base URL to use: environment, then config file, then default
    pub fn lookup_base_url(&self) -> String {
        self.resolve_lookup_url(std::env::var(LOOKUP_URL_ENV).ok())
    }

    fn resolve_lookup_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| {
                self.lookup_base_url
                    .clone()
                    .filter(|v| !v.trim().is_empty())
            })
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}
