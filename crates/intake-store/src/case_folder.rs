//! Per-request case folders.
//!
//! # Directory Layout
//!
//! ```text
//! {data_dir}/requests/
//! ├── 20250310_berlin-deutschland_3f2a9c4e/
//! │   ├── request.json
//! │   └── summary.md
//! └── 20250402_wien-oesterreich_a81c07d2/
//!     ├── request.json
//!     └── summary.md
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use intake_core::RequestRecord;

pub const REQUEST_JSON_FILE: &str = "request.json";
pub const SUMMARY_MD_FILE: &str = "summary.md";

const EMPTY_PLACEHOLDER: &str = "—";
const FOLDER_NOTE: &str = "_Anmerkung: Diese Mappe ist die Grundlage für Recherche, Vergleich und spätere Ablage (Tickets, Rechnungen)._";

/// Location of one request's case folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFolder {
    pub name: String,
    pub path: PathBuf,
}

impl CaseFolder {
    pub fn json_path(&self) -> PathBuf {
        self.path.join(REQUEST_JSON_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.path.join(SUMMARY_MD_FILE)
    }
}

/// Writes case folders below a fixed root directory.
#[derive(Debug, Clone)]
pub struct CaseFolderWriter {
    root: PathBuf,
}

impl CaseFolderWriter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `record`'s folder lives; does not touch the filesystem.
    pub fn folder_for(&self, record: &RequestRecord) -> CaseFolder {
        let name = record.folder_name();
        CaseFolder {
            path: self.root.join(&name),
            name,
        }
    }

    /// Create the folder (if needed) and write `request.json` and
    /// `summary.md`. The first failing write aborts the rest.
    pub fn write(&self, record: &RequestRecord) -> Result<CaseFolder> {
        let folder = self.folder_for(record);

        std::fs::create_dir_all(&folder.path)
            .with_context(|| format!("failed to create case folder: {}", folder.path.display()))?;

        let json =
            serde_json::to_string_pretty(record).context("failed to serialize request record")?;
        atomic_write(&folder.json_path(), json.as_bytes())?;
        atomic_write(&folder.summary_path(), render_summary(record).as_bytes())?;

        Ok(folder)
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        value
    }
}

/// Human-readable Markdown rendering of every record field.
pub fn render_summary(record: &RequestRecord) -> String {
    let lines = [
        format!("# Reiseanfrage {}", record.request_id()),
        format!("**Erstellt:** {}", record.created_at_display()),
        format!("**Ziel:** {}", record.destination()),
        format!(
            "**Zeitraum:** {} → {}",
            record.start_date().format("%Y-%m-%d"),
            record.end_date().format("%Y-%m-%d")
        ),
        format!("**Terminzeit vor Ort:** {}", record.appointment_display()),
        format!("**Verkehrsmittel:** {}", record.transport()),
        format!("**Hotelbudget/Nacht:** {} €", record.hotel_budget_per_night()),
        format!("**Hotel-Lage:** {}", or_placeholder(record.hotel_location_hint())),
        format!(
            "**Flexible Storno:** {}",
            if record.flexible_cancellation() { "Ja" } else { "Nein" }
        ),
        format!(
            "**Kostenstelle/Projekt:** {}",
            or_placeholder(record.cost_center())
        ),
        format!("**Kommentare/Wünsche:** {}", or_placeholder(record.notes())),
        String::new(),
        FOLDER_NOTE.to_string(),
    ];
    lines.join("\n")
}

/// Replace `target` with `data` via a sibling temp file, so readers never
/// see a half-written file.
fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    let dir = target
        .parent()
        .with_context(|| format!("no parent directory for {}", target.display()))?;

    let mut staged = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to stage file in {}", dir.display()))?;
    staged
        .write_all(data)
        .with_context(|| format!("failed to write staged {}", target.display()))?;
    staged
        .persist(target)
        .with_context(|| format!("failed to move staged file to {}", target.display()))?;

    Ok(())
}

#[cfg(test)]
#[path = "case_folder_tests.rs"]
mod tests;
