//! Hotel suggestions from a third-party search API.
//!
//! Independent of request intake: nothing here reads or writes the ledger or
//! case folders.

mod client;
mod export;

use anyhow::Result;
use async_trait::async_trait;
use intake_config::HOTEL_LIMIT_MAX;
use intake_core::IntakeError;
use serde::{Deserialize, Serialize};

pub use client::{HotelApiClient, parse_results};
pub use export::write_csv;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelSuggestion {
    pub name: String,
    /// Nightly price as reported by the API, currency unspecified.
    pub price: Option<f64>,
    pub url: Option<String>,
}

#[async_trait]
pub trait HotelSearch: Send + Sync {
    /// Up to `limit` suggestions for `city`.
    async fn search(&self, city: &str, limit: usize) -> Result<Vec<HotelSuggestion>>;
}

pub fn check_limit(limit: usize) -> Result<(), IntakeError> {
    if (1..=HOTEL_LIMIT_MAX).contains(&limit) {
        Ok(())
    } else {
        Err(IntakeError::HotelLimitOutOfRange {
            limit,
            max: HOTEL_LIMIT_MAX,
        })
    }
}
