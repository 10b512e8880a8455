use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use intake_config::{RemoteCredentials, RemoteStoreConfig};
use intake_core::IntakeError;
use intake_store::CaseFolder;
use intake_store::case_folder::REQUEST_JSON_FILE;
use tracing::{debug, info, warn};

use crate::{RemoteSync, SyncOutcome};

/// Uploads `request.json` with an HTTP `PUT` and basic auth.
#[derive(Debug)]
pub struct WebDavSync {
    config: RemoteStoreConfig,
    client: reqwest::Client,
}

impl WebDavSync {
    pub fn new(config: RemoteStoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build WebDAV client")?;
        Ok(Self { config, client })
    }

    async fn upload(&self, creds: RemoteCredentials<'_>, folder: &CaseFolder) -> Result<String> {
        let local = folder.json_path();
        let body = tokio::fs::read(&local)
            .await
            .with_context(|| format!("failed to read snapshot: {}", local.display()))?;

        let url = remote_url(
            creds.base_url,
            creds.base_path,
            &self.config.remote_folder,
            &folder.name,
        );
        let response = self
            .client
            .put(&url)
            .basic_auth(creds.username, Some(creds.password))
            .body(body)
            .send()
            .await
            .with_context(|| format!("WebDAV upload request failed: {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntakeError::RemoteStatus {
                status: status.as_u16(),
            }
            .into());
        }

        Ok(url)
    }
}

#[async_trait]
impl RemoteSync for WebDavSync {
    async fn sync(&self, folder: &CaseFolder) -> SyncOutcome {
        let Some(creds) = self.config.credentials() else {
            debug!(
                missing = ?self.config.missing_settings(),
                "remote store not configured, skipping upload"
            );
            return SyncOutcome::NotConfigured;
        };

        match self.upload(creds, folder).await {
            Ok(url) => {
                info!(folder = %folder.name, %url, "uploaded request snapshot");
                SyncOutcome::Uploaded { url }
            }
            Err(e) => {
                warn!(folder = %folder.name, error = %format!("{e:#}"), "remote upload failed");
                SyncOutcome::Failed {
                    reason: format!("{e:#}"),
                }
            }
        }
    }
}

/// `{base_url}/{base_path}/{remote_folder}/{folder_name}/request.json`, with
/// empty segments and duplicate slashes dropped.
pub fn remote_url(base_url: &str, base_path: &str, remote_folder: &str, folder_name: &str) -> String {
    let mut url = base_url.trim_end_matches('/').to_string();
    for segment in [base_path, remote_folder, folder_name, REQUEST_JSON_FILE] {
        let segment = segment.trim_matches('/');
        if !segment.is_empty() {
            url.push('/');
            url.push_str(segment);
        }
    }
    url
}

#[cfg(test)]
#[path = "webdav_tests.rs"]
mod tests;
