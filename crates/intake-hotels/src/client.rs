use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use intake_config::HotelSearchConfig;
use intake_core::IntakeError;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{HotelSearch, HotelSuggestion, check_limit};

/// Client for a JSON hotel search endpoint (`GET {base_url}/search`).
#[derive(Debug)]
pub struct HotelApiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HotelApiClient {
    /// Build a client; fails if the base URL or API key is missing.
    pub fn from_config(config: &HotelSearchConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(IntakeError::HotelSearchUnconfigured("HOTEL_API_BASEURL"))?;
        let api_key = config
            .api_key
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(IntakeError::HotelSearchUnconfigured("HOTEL_API_KEY"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build hotel search client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }
}

#[async_trait]
impl HotelSearch for HotelApiClient {
    async fn search(&self, city: &str, limit: usize) -> Result<Vec<HotelSuggestion>> {
        let city = city.trim();
        if city.is_empty() {
            bail!("city must not be empty");
        }
        check_limit(limit)?;

        let limit_param = limit.to_string();
        let url = reqwest::Url::parse_with_params(
            &format!("{}/search", self.base_url),
            &[("city", city), ("limit", limit_param.as_str())],
        )
        .with_context(|| format!("invalid hotel search URL: {}", self.base_url))?;

        debug!(%city, limit, "querying hotel search");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("hotel search request failed for {city}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read hotel search response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "hotel search failed for {city}: status {status}, body {body}"
            ));
        }

        parse_results(&body, limit)
    }
}

/// Parse a search response: either a JSON array of hits or an object with a
/// `results` array. Hits without a name are skipped.
pub fn parse_results(body: &str, limit: usize) -> Result<Vec<HotelSuggestion>> {
    let value: Value =
        serde_json::from_str(body).context("failed to parse hotel search response JSON")?;

    let items = value
        .as_array()
        .or_else(|| value.get("results").and_then(Value::as_array))
        .ok_or_else(|| anyhow!("hotel search response has no results array"))?;

    let mut suggestions = Vec::new();
    for item in items {
        let Some(name) = item.get("name").and_then(Value::as_str) else {
            warn!("skipping hotel search hit without a name");
            continue;
        };
        suggestions.push(HotelSuggestion {
            name: name.to_string(),
            price: item.get("price").and_then(parse_price),
            url: item
                .get("url")
                .or_else(|| item.get("link"))
                .and_then(Value::as_str)
                .map(str::to_string),
        });
        if suggestions.len() == limit {
            break;
        }
    }

    Ok(suggestions)
}

fn parse_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
