use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use intake_core::RequestRecord;
use tracing::warn;

/// Append-only CSV ledger with one row per request.
///
/// Rows are only ever appended. There is no cross-process lock: concurrent
/// writers from separate processes may interleave.
#[derive(Debug, Clone)]
pub struct LedgerWriter {
    path: PathBuf,
}

impl LedgerWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row for `record`, writing the header first if the file is
    /// missing or empty.
    pub fn append(&self, record: &RequestRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create ledger dir: {}", parent.display()))?;
        }

        let header_needed = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("failed to open ledger: {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(header_needed)
            .from_writer(file);
        writer
            .serialize(record)
            .with_context(|| format!("failed to append ledger row: {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("failed to flush ledger: {}", self.path.display()))?;

        Ok(())
    }

    /// Read every row in file order. A missing ledger reads as empty; rows
    /// that fail to parse or validate are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<RequestRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to read ledger: {}", self.path.display()))?;

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<RequestRecord>().enumerate() {
            match row {
                Ok(record) => match record.validate() {
                    Ok(()) => records.push(record),
                    Err(errors) => warn!(
                        path = %self.path.display(),
                        row = idx + 1,
                        %errors,
                        "skipping invalid ledger row"
                    ),
                },
                Err(error) => {
                    warn!(
                        path = %self.path.display(),
                        row = idx + 1,
                        %error,
                        "skipping unreadable ledger row"
                    );
                }
            }
        }

        Ok(records)
    }
}

/// Write `record` as a standalone CSV (header plus one row).
pub fn export_single<W: Write>(record: &RequestRecord, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .serialize(record)
        .context("failed to serialize request export")?;
    writer.flush().context("failed to flush request export")?;
    Ok(())
}
