use serde::{Deserialize, Serialize};
use std::fmt;

use crate::remote::mask_secret;

/// Upper bound for a single hotel search.
pub const HOTEL_LIMIT_MAX: usize = 50;

const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_LIMIT: usize = 10;

/// Hotel search API settings. There is no built-in API key.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelSearchConfig {
    /// Search API base URL; the client appends `/search`.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Result count used when the caller does not pass one.
    pub default_limit: usize,
}

impl Default for HotelSearchConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl HotelSearchConfig {
    pub fn redacted_for_display(&self) -> Self {
        let mut redacted = self.clone();
        redacted.api_key = self.api_key.as_deref().map(mask_secret);
        redacted
    }
}

impl fmt::Debug for HotelSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotelSearchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_deref().map(mask_secret))
            .field("timeout_secs", &self.timeout_secs)
            .field("default_limit", &self.default_limit)
            .finish()
    }
}
