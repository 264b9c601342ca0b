//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wl_core::{DurationPolicy, MinuteOfDay, StoreConfig};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// How an end time earlier than the start is treated.
    #[serde(default)]
    pub duration_policy: DurationPolicy,

    /// Start time suggested for the first entry of a day (`"09:00"` or `"9:00 AM"`).
    #[serde(default = "default_start")]
    pub default_start: String,
}

fn default_start() -> String {
    "09:00".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("worklog.db"),
            duration_policy: DurationPolicy::default(),
            default_start: default_start(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // WL_DATABASE_PATH, WL_DURATION_POLICY, WL_DEFAULT_START
        figment = figment.merge(Env::prefixed("WL_"));

        figment.extract()
    }

    /// Builds the entry store settings, validating `default_start`.
    pub fn store_config(&self) -> Result<StoreConfig> {
        let default_start: MinuteOfDay = self
            .default_start
            .parse()
            .with_context(|| format!("invalid default_start: {}", self.default_start))?;
        Ok(StoreConfig {
            policy: self.duration_policy,
            default_start,
        })
    }
}

/// Returns the platform-specific config directory for worklog.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("worklog"))
}

/// Returns the platform-specific data directory for worklog.
///
/// On Linux: `~/.local/share/worklog`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("worklog"))
}
