use anyhow::{Context, Result};
use intake_config::IntakeConfig;
use intake_core::OutputFormat;
use intake_hotels::{HotelApiClient, HotelSearch, HotelSuggestion, write_csv};

pub(crate) async fn handle_hotels(
    city: String,
    limit: Option<usize>,
    csv: Option<String>,
    config: &IntakeConfig,
    format: OutputFormat,
) -> Result<()> {
    let client = HotelApiClient::from_config(&config.hotels)?;
    let limit = limit.unwrap_or(config.hotels.default_limit);

    let hits = client.search(&city, limit).await?;

    match csv.as_deref() {
        // CSV on stdout replaces the table.
        Some("-") => return write_csv(&hits, std::io::stdout().lock()),
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create CSV export: {path}"))?;
            write_csv(&hits, file)?;
            eprintln!("Wrote {} suggestion(s) to {path}", hits.len());
        }
        None => {}
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
        OutputFormat::Text => print_table(&city, &hits),
    }
    Ok(())
}

fn print_table(city: &str, hits: &[HotelSuggestion]) {
    if hits.is_empty() {
        eprintln!("No hotel suggestions for {city}.");
        return;
    }
    println!("{:<36}  {:>8}  URL", "NAME", "PRICE");
    for hit in hits {
        let price = hit
            .price
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<36}  {:>8}  {}",
            hit.name,
            price,
            hit.url.as_deref().unwrap_or("-")
        );
    }
}
