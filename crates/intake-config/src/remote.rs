use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_REMOTE_FOLDER: &str = "SimoneTravel";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// WebDAV target for mirroring case-folder snapshots.
///
/// Sync is attempted only when `base_url`, `username`, `password` and
/// `base_path` are all present. An empty `base_path` means the share root.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteStoreConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub base_path: Option<String>,
    /// Folder below `base_path` that collects all case folders.
    pub remote_folder: String,
    /// Upload request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            base_path: None,
            remote_folder: DEFAULT_REMOTE_FOLDER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Borrowed view of a fully configured remote store.
#[derive(Clone, Copy)]
pub struct RemoteCredentials<'a> {
    pub base_url: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub base_path: &'a str,
}

impl fmt::Debug for RemoteCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &mask_secret(self.password))
            .field("base_path", &self.base_path)
            .finish()
    }
}

impl RemoteStoreConfig {
    /// All settings required for an upload, or `None` if any is missing.
    pub fn credentials(&self) -> Option<RemoteCredentials<'_>> {
        Some(RemoteCredentials {
            base_url: non_empty(&self.base_url)?,
            username: non_empty(&self.username)?,
            password: non_empty(&self.password)?,
            base_path: self.base_path.as_deref()?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// Names of the settings that keep sync disabled, for user hints.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        let mut missing = Vec::new();
        if blank(&self.base_url) {
            missing.push("base_url");
        }
        if blank(&self.username) {
            missing.push("username");
        }
        if blank(&self.password) {
            missing.push("password");
        }
        if self.base_path.is_none() {
            missing.push("base_path");
        }
        missing
    }

    pub fn redacted_for_display(&self) -> Self {
        let mut redacted = self.clone();
        redacted.password = self.password.as_deref().map(mask_secret);
        redacted
    }
}

impl fmt::Debug for RemoteStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStoreConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_deref().map(mask_secret))
            .field("base_path", &self.base_path)
            .field("remote_folder", &self.remote_folder)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

pub(crate) fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }

    let char_count = secret.chars().count();
    let prefix: String = secret.chars().take(3).collect();
    let suffix: String = secret.chars().skip(char_count.saturating_sub(4)).collect();

    if char_count <= 8 {
        "***".to_string()
    } else {
        format!("{prefix}...{suffix}")
    }
}
