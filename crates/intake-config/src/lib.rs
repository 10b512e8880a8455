//! Intake configuration (`~/.config/travel-intake/config.toml` plus
//! environment overrides).
//!
//! The configuration is resolved once at startup and handed to each
//! component; nothing below the CLI reads the environment directly.

pub mod config;
pub mod hotels;
pub mod remote;

pub use config::{APP_NAME, IntakeConfig, StorageConfig, env_keys};
pub use hotels::{HOTEL_LIMIT_MAX, HotelSearchConfig};
pub use remote::{RemoteCredentials, RemoteStoreConfig};
