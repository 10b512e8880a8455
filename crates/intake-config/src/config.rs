use anyhow::{Context, Result};
use intake_core::IntakeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::hotels::{HOTEL_LIMIT_MAX, HotelSearchConfig};
use crate::remote::RemoteStoreConfig;

/// XDG app name used for the default config location.
pub const APP_NAME: &str = "travel-intake";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LEDGER_FILE: &str = "reiseanfragen.csv";
const DEFAULT_REQUESTS_DIR: &str = "requests";

/// Environment variables that override the config file.
pub mod env_keys {
    pub const DATA_DIR: &str = "INTAKE_DATA_DIR";
    pub const DAV_BASE_URL: &str = "HIDRIVE_DAV_BASEURL";
    pub const DAV_USER: &str = "HIDRIVE_USER";
    pub const DAV_PASS: &str = "HIDRIVE_PASS";
    pub const DAV_BASE_PATH: &str = "HIDRIVE_BASEPATH";
    pub const HOTEL_BASE_URL: &str = "HOTEL_API_BASEURL";
    pub const HOTEL_API_KEY: &str = "HOTEL_API_KEY";
}

/// Complete intake configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteStoreConfig,
    #[serde(default)]
    pub hotels: HotelSearchConfig,
}

/// Local storage layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory holding the ledger and the case folders.
    pub data_dir: PathBuf,
    /// Ledger file name inside `data_dir`.
    pub ledger_file: String,
    /// Case folder root inside `data_dir`.
    pub requests_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            ledger_file: DEFAULT_LEDGER_FILE.to_string(),
            requests_dir: DEFAULT_REQUESTS_DIR.to_string(),
        }
    }
}

impl StorageConfig {
    /// Storage rooted at `data_dir` with default file names.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }

    pub fn requests_path(&self) -> PathBuf {
        self.data_dir.join(&self.requests_dir)
    }
}

impl IntakeConfig {
    /// Load config from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    /// Environment overrides are applied afterwards, then the result is
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => match Self::config_path() {
                Ok(default_path) if default_path.exists() => Self::load_file(&default_path)?,
                Ok(default_path) => {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
                Err(e) => {
                    tracing::debug!(error = %e, "config directory unavailable, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Path to the default config file: `~/.config/travel-intake/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", APP_NAME)
            .context("Failed to determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the environment (or any key lookup).
    ///
    /// Empty `INTAKE_DATA_DIR` is ignored; `HIDRIVE_BASEPATH` may be empty
    /// to address the share root.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(env_keys::DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(v) = lookup(env_keys::DAV_BASE_URL) {
            self.remote.base_url = Some(v);
        }
        if let Some(v) = lookup(env_keys::DAV_USER) {
            self.remote.username = Some(v);
        }
        if let Some(v) = lookup(env_keys::DAV_PASS) {
            self.remote.password = Some(v);
        }
        if let Some(v) = lookup(env_keys::DAV_BASE_PATH) {
            self.remote.base_path = Some(v);
        }
        if let Some(v) = lookup(env_keys::HOTEL_BASE_URL) {
            self.hotels.base_url = Some(v);
        }
        if let Some(v) = lookup(env_keys::HOTEL_API_KEY) {
            self.hotels.api_key = Some(v);
        }
    }

    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.storage.ledger_file.trim().is_empty() {
            return Err(IntakeError::InvalidConfig(
                "storage.ledger_file must not be empty".into(),
            ));
        }
        if self.storage.requests_dir.trim().is_empty() {
            return Err(IntakeError::InvalidConfig(
                "storage.requests_dir must not be empty".into(),
            ));
        }
        if self.remote.timeout_secs == 0 {
            return Err(IntakeError::InvalidConfig(
                "remote.timeout_secs must be > 0".into(),
            ));
        }
        if self.hotels.timeout_secs == 0 {
            return Err(IntakeError::InvalidConfig(
                "hotels.timeout_secs must be > 0".into(),
            ));
        }
        if !(1..=HOTEL_LIMIT_MAX).contains(&self.hotels.default_limit) {
            return Err(IntakeError::InvalidConfig(format!(
                "hotels.default_limit must be within 1..={HOTEL_LIMIT_MAX}"
            )));
        }
        Ok(())
    }

    /// Copy with secrets masked, for `config show`.
    pub fn redacted_for_display(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            remote: self.remote.redacted_for_display(),
            hotels: self.hotels.redacted_for_display(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
