//! # Storage Layer
//!
//! The library persists nothing. This layer only reads the files the CLI
//! works with.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Project config | TOML | `newstrack.toml` (nearest ancestor directory) |
//! | Global config | TOML | `~/.config/newstrack/config.toml` |
//! | Taken IDs | Text, one ID per line | passed with `--existing` |
//!
//! ## Key Types
//!
//! - [`Config`] - Project and global configuration
//! - [`load_existing_ids`] - Reads a list of IDs that are already in use

mod config;
mod id_list;

pub use config::{
    Config, ConfigError, GlobalConfig, ProjectConfig, QrConfig, SiteConfig, TrackingConfig,
    PROJECT_CONFIG_FILE,
};
pub use id_list::{load_existing_ids, parse_id_list};
