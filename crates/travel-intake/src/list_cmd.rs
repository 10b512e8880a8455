use anyhow::Result;
use intake_config::IntakeConfig;
use intake_core::{OutputFormat, RequestRecord};
use intake_store::IntakeStore;

pub(crate) fn handle_list(
    limit: Option<usize>,
    config: &IntakeConfig,
    format: OutputFormat,
) -> Result<()> {
    let store = IntakeStore::new(&config.storage);
    let records = most_recent(store.list()?, limit);

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        eprintln!("No travel requests found in {}.", store.ledger_path().display());
        return Ok(());
    }

    println!(
        "{:<10}  {:<19}  {:<10}  {:<10}  {:<28}  {:>6}",
        "ID", "CREATED", "START", "END", "DESTINATION", "BUDGET"
    );
    for record in &records {
        println!(
            "{:<10}  {:<19}  {:<10}  {:<10}  {:<28}  {:>6}",
            record.short_id(),
            record.created_at_display(),
            record.start_date(),
            record.end_date(),
            truncate(record.destination(), 28),
            record.hotel_budget_per_night(),
        );
    }

    Ok(())
}

/// Keep the last `limit` rows, preserving ledger order.
fn most_recent(mut records: Vec<RequestRecord>, limit: Option<usize>) -> Vec<RequestRecord> {
    if let Some(limit) = limit {
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
    }
    records
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
