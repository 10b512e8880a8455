use anyhow::Result;
use clap::Parser;

mod cli;
mod config_cmds;
mod hotels_cmd;
mod list_cmd;
mod submit_cmd;

use cli::{Cli, Commands, ConfigCommands};
use intake_config::IntakeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let output_format = cli.format.clone();

    if let Commands::Config {
        cmd: ConfigCommands::Path,
    } = cli.command
    {
        return config_cmds::handle_config_path();
    }

    let config = IntakeConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Submit(args) => {
            let exit_code = submit_cmd::handle_submit(args, &config, output_format).await?;
            if exit_code != submit_cmd::EXIT_OK {
                std::process::exit(exit_code);
            }
        }
        Commands::List { limit } => {
            list_cmd::handle_list(limit, &config, output_format)?;
        }
        Commands::Hotels { city, limit, csv } => {
            hotels_cmd::handle_hotels(city, limit, csv, &config, output_format).await?;
        }
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config_cmds::handle_config_show(&config, output_format)?,
            ConfigCommands::Path => config_cmds::handle_config_path()?,
        },
    }

    Ok(())
}
