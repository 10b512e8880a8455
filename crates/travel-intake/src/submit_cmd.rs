use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use intake_config::IntakeConfig;
use intake_core::{IntakeForm, OutputFormat, RequestRecord, ValidationErrors};
use intake_store::{IntakeStore, PersistedRequest, export_single};
use intake_sync::{RemoteSync, SyncOutcome, WebDavSync};
use serde_json::json;

use crate::cli::SubmitArgs;

pub(crate) const EXIT_OK: i32 = 0;
pub(crate) const EXIT_FAILURE: i32 = 1;
pub(crate) const EXIT_VALIDATION: i32 = 2;

/// How a submission ended.
#[derive(Debug)]
pub(crate) enum SubmitOutcome {
    Rejected(ValidationErrors),
    StorageFailed(anyhow::Error),
    Stored {
        record: RequestRecord,
        persisted: PersistedRequest,
        /// `None` when sync was skipped on request.
        sync: Option<SyncOutcome>,
    },
}

/// validate → persist ledger → persist folder → optional remote sync.
pub(crate) async fn submit(
    form: IntakeForm,
    store: &IntakeStore,
    remote: Option<&dyn RemoteSync>,
) -> SubmitOutcome {
    let record = match RequestRecord::build(form) {
        Ok(record) => record,
        Err(errors) => return SubmitOutcome::Rejected(errors),
    };

    let persisted = match store.persist(&record) {
        Ok(persisted) => persisted,
        Err(e) => return SubmitOutcome::StorageFailed(e),
    };

    let sync = match remote {
        Some(remote) => Some(remote.sync(&persisted.folder).await),
        None => None,
    };

    SubmitOutcome::Stored {
        record,
        persisted,
        sync,
    }
}

/// Run `submit` for CLI args and render the result. Returns the exit code.
pub(crate) async fn handle_submit(
    args: SubmitArgs,
    config: &IntakeConfig,
    format: OutputFormat,
) -> Result<i32> {
    let store = IntakeStore::new(&config.storage);

    let webdav = if args.no_sync {
        None
    } else {
        match WebDavSync::new(config.remote.clone()) {
            Ok(sync) => Some(sync),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "remote sync unavailable");
                None
            }
        }
    };
    let remote = webdav.as_ref().map(|s| s as &dyn RemoteSync);

    match submit(args.to_form_today(), &store, remote).await {
        SubmitOutcome::Rejected(errors) => {
            for message in errors.messages() {
                eprintln!("error: {message}");
            }
            Ok(EXIT_VALIDATION)
        }
        SubmitOutcome::StorageFailed(e) => {
            eprintln!("storage failed: {e:#}");
            Ok(EXIT_FAILURE)
        }
        SubmitOutcome::Stored {
            record,
            persisted,
            sync,
        } => {
            // Past this point the request is stored, so export problems are warnings.
            let export = args.export.as_deref().and_then(|target| {
                match run_export(&record, target, &format) {
                    Ok(export) => Some(export),
                    Err(e) => {
                        eprintln!("warning: export failed, request is stored: {e:#}");
                        None
                    }
                }
            });
            render_stored(&record, &persisted, sync.as_ref(), export.as_ref(), format)?;
            Ok(EXIT_OK)
        }
    }
}

/// Where `--export` put the one-row CSV.
#[derive(Debug, PartialEq, Eq)]
enum Export {
    File(PathBuf),
    Stdout,
    /// `-` combined with `--format json`: the CSV travels inside the report.
    Inline(String),
}

fn run_export(record: &RequestRecord, target: &Path, format: &OutputFormat) -> Result<Export> {
    if target.as_os_str() != "-" {
        return write_export(record, target).map(Export::File);
    }
    match format {
        OutputFormat::Json => {
            let mut buf = Vec::new();
            export_single(record, &mut buf)?;
            let csv = String::from_utf8(buf).context("export is not valid UTF-8")?;
            Ok(Export::Inline(csv))
        }
        OutputFormat::Text => {
            export_single(record, std::io::stdout().lock())?;
            Ok(Export::Stdout)
        }
    }
}

/// Write the one-row export. A directory target gets `request_{id8}.csv`.
fn write_export(record: &RequestRecord, target: &Path) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(format!("request_{}.csv", record.short_id()))
    } else {
        target.to_path_buf()
    };
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create export: {}", path.display()))?;
    export_single(record, file)?;
    Ok(path)
}

fn sync_label(sync: Option<&SyncOutcome>) -> &'static str {
    match sync {
        None => "skipped",
        Some(SyncOutcome::NotConfigured) => "not_configured",
        Some(SyncOutcome::Uploaded { .. }) => "uploaded",
        Some(SyncOutcome::Failed { .. }) => "not_uploaded",
    }
}

fn render_stored(
    record: &RequestRecord,
    persisted: &PersistedRequest,
    sync: Option<&SyncOutcome>,
    export: Option<&Export>,
    format: OutputFormat,
) -> Result<()> {
    let (export_path, export_csv) = match export {
        Some(Export::File(path)) => (Some(path.as_path()), None),
        Some(Export::Inline(csv)) => (None, Some(csv.as_str())),
        Some(Export::Stdout) | None => (None, None),
    };
    match format {
        OutputFormat::Json => {
            let report = json!({
                "request_id": record.request_id(),
                "ledger": persisted.ledger_path,
                "folder": persisted.folder.path,
                "folder_name": persisted.folder.name,
                "export": export_path,
                "export_csv": export_csv,
                "sync": sync_label(sync),
                "record": record,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{}", record.request_id());
            eprintln!("Request saved: {}", record.destination());
            eprintln!("  Ledger:      {}", persisted.ledger_path.display());
            eprintln!("  Case folder: {}", persisted.folder.path.display());
            if let Some(path) = export_path {
                eprintln!("  Export:      {}", path.display());
            }
            match sync {
                Some(SyncOutcome::Uploaded { url }) => {
                    eprintln!("  Remote copy: {url}");
                }
                Some(SyncOutcome::NotConfigured) => {
                    eprintln!(
                        "Hint: WebDAV upload is optional via HIDRIVE_* environment variables."
                    );
                }
                Some(SyncOutcome::Failed { .. }) => {
                    eprintln!("  Remote copy: not uploaded (local copy is complete)");
                }
                None => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "submit_cmd_tests.rs"]
mod tests;
