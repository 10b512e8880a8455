//! Best-effort mirroring of case-folder snapshots to remote storage.
//!
//! Sync always runs after local persistence has finished. Every failure is
//! reduced to a [`SyncOutcome`]; nothing here returns an error to the caller.

mod webdav;

use async_trait::async_trait;
use intake_store::CaseFolder;

pub use webdav::{WebDavSync, remote_url};

/// Result of one sync attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Required settings are missing; no request was made.
    NotConfigured,
    /// The remote store accepted the snapshot.
    Uploaded { url: String },
    /// The attempt failed (read, network, timeout or non-2xx status).
    Failed { reason: String },
}

impl SyncOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }
}

/// Copies a case folder's snapshot somewhere else.
#[async_trait]
pub trait RemoteSync: Send + Sync {
    async fn sync(&self, folder: &CaseFolder) -> SyncOutcome;
}
