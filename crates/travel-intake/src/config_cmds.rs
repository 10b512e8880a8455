use anyhow::Result;
use intake_config::IntakeConfig;
use intake_core::OutputFormat;

pub(crate) fn handle_config_show(config: &IntakeConfig, format: OutputFormat) -> Result<()> {
    let redacted = config.redacted_for_display();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&redacted)?);
        }
        OutputFormat::Text => {
            print!("{}", toml::to_string_pretty(&redacted)?);
            let missing = config.remote.missing_settings();
            if !missing.is_empty() {
                eprintln!("Remote sync disabled (missing: {}).", missing.join(", "));
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_config_path() -> Result<()> {
    println!("{}", IntakeConfig::config_path()?.display());
    Ok(())
}
