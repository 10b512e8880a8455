use std::io::Write;

use anyhow::{Context, Result};

use crate::HotelSuggestion;

/// Write `name,price,url` rows with a header.
pub fn write_csv<W: Write>(suggestions: &[HotelSuggestion], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["name", "price", "url"])
        .context("failed to write hotel CSV header")?;
    for hit in suggestions {
        let price = hit.price.map(|p| p.to_string()).unwrap_or_default();
        writer
            .write_record([hit.name.as_str(), price.as_str(), hit.url.as_deref().unwrap_or("")])
            .context("failed to write hotel CSV row")?;
    }
    writer.flush().context("failed to flush hotel CSV")?;
    Ok(())
}
