//! Configuration handling for newstrack
//!
//! Configuration is stored in `newstrack.toml` (project, found by walking up
//! from the working directory) and `~/.config/newstrack/config.toml` (global).
//! Project values win over global ones.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::share::DEFAULT_BASE_URL;
use crate::domain::tracking_id::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SEPARATOR};
use crate::domain::{NewsCategory, QrPreset};

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = "newstrack.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Public site settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin that article URLs are built on
    pub base_url: Option<String>,
}

/// Tracking ID settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackingConfig {
    /// Category used when `generate` gets no explicit prefix
    pub default_category: NewsCategory,

    /// Attempt budget when checking against existing IDs
    pub max_attempts: u32,

    /// Separator for the grouped display form
    pub separator: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            default_category: NewsCategory::Regular,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// QR code settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct QrConfig {
    pub preset: QrPreset,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    pub site: SiteConfig,
    pub tracking: TrackingConfig,
    pub qr: QrConfig,
}

impl ProjectConfig {
    /// Rejects settings that would produce broken IDs or URLs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tracking.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "tracking.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.tracking.separator.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Invalid(format!(
                "tracking.separator '{}' must not contain digits",
                self.tracking.separator
            )));
        }
        if let Some(url) = &self.site.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "site.base_url '{}' must start with http:// or https://",
                    url
                )));
            }
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Fallback site origin when the project sets none
    pub base_url: Option<String>,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project_root = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_project_root(&dir));

        let project = match &project_root {
            Some(root) => Self::load_project_config(root)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("news", "newstrack", "newstrack")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .validate()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the project root by looking for `newstrack.toml` from `start` upwards
    pub fn find_project_root(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_CONFIG_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Effective site origin: explicit override, then project, then global, then localhost
    pub fn base_url(&self, override_url: Option<&str>) -> String {
        override_url
            .map(str::to_string)
            .or_else(|| self.project.site.base_url.clone())
            .or_else(|| self.global.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}
