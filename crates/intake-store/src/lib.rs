//! Durable storage for travel requests: the CSV ledger and per-request case
//! folders.
//!
//! # Directory Layout
//!
//! ```text
//! {data_dir}/
//! ├── reiseanfragen.csv     (append-only ledger, one row per request)
//! └── requests/
//!     └── {YYYYMMDD}_{slug}_{id8}/
//!         ├── request.json
//!         └── summary.md
//! ```
//!
//! Persisting writes the ledger row first and the case folder second. The two
//! are not a transaction: if the folder write fails, the ledger row stays.

use std::path::{Path, PathBuf};

use anyhow::Result;
use intake_config::StorageConfig;
use intake_core::RequestRecord;

pub mod case_folder;
pub mod ledger;

pub use case_folder::{CaseFolder, CaseFolderWriter, render_summary};
pub use ledger::{LedgerWriter, export_single};

/// Where a persisted request ended up.
#[derive(Debug, Clone)]
pub struct PersistedRequest {
    pub ledger_path: PathBuf,
    pub folder: CaseFolder,
}

/// Owns the ledger and the case-folder root for one data directory.
#[derive(Debug, Clone)]
pub struct IntakeStore {
    ledger: LedgerWriter,
    folders: CaseFolderWriter,
}

impl IntakeStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            ledger: LedgerWriter::new(config.ledger_path()),
            folders: CaseFolderWriter::new(config.requests_path()),
        }
    }

    pub fn ledger(&self) -> &LedgerWriter {
        &self.ledger
    }

    pub fn case_folders(&self) -> &CaseFolderWriter {
        &self.folders
    }

    pub fn ledger_path(&self) -> &Path {
        self.ledger.path()
    }

    /// Append the ledger row, then write the case folder.
    pub fn persist(&self, record: &RequestRecord) -> Result<PersistedRequest> {
        self.ledger.append(record)?;
        let folder = self.folders.write(record)?;

        tracing::info!(
            request_id = %record.request_id(),
            folder = %folder.name,
            ledger = %self.ledger.path().display(),
            "persisted travel request"
        );

        Ok(PersistedRequest {
            ledger_path: self.ledger.path().to_path_buf(),
            folder,
        })
    }

    /// All ledger rows in submission order.
    pub fn list(&self) -> Result<Vec<RequestRecord>> {
        self.ledger.read_all()
    }
}
