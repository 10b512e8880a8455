use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use intake_core::record::{DEFAULT_BUDGET, default_appointment_time};
use intake_core::{IntakeForm, OutputFormat, TransportMode};

#[derive(Parser)]
#[command(name = "travel-intake")]
#[command(about = "Travel Intake: record travel requests in a CSV ledger and case folders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (defaults to ~/.config/travel-intake/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a new travel request
    Submit(SubmitArgs),

    /// List recorded travel requests (oldest first)
    List {
        /// Show only the most recent N requests
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Look up hotel suggestions for a city
    Hotels {
        /// City to search in
        #[arg(long)]
        city: String,

        /// Maximum number of suggestions (1-50)
        #[arg(long)]
        limit: Option<usize>,

        /// Also write results as CSV to this path ("-" for stdout)
        #[arg(long)]
        csv: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Destination (city, country)
    #[arg(long)]
    pub destination: String,

    /// Start date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Local appointment time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub appointment: Option<NaiveTime>,

    /// Preferred means of travel
    #[arg(long, value_enum, default_value_t = TransportMode::Air)]
    pub transport: TransportMode,

    /// Hotel budget per night in EUR (50-600)
    #[arg(long, default_value_t = DEFAULT_BUDGET)]
    pub budget: u32,

    /// Preferred hotel location (e.g. near the main station)
    #[arg(long)]
    pub location: Option<String>,

    /// Do not require flexible cancellation
    #[arg(long)]
    pub no_flexible_cancellation: bool,

    /// Cost center or project
    #[arg(long)]
    pub cost_center: Option<String>,

    /// Special wishes or remarks
    #[arg(long)]
    pub notes: Option<String>,

    /// Write this request as a one-row CSV (file, directory, or "-" for stdout)
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Skip the remote upload even if configured
    #[arg(long)]
    pub no_sync: bool,
}

impl SubmitArgs {
    /// Form input, with missing dates set to `today`.
    pub fn to_form(&self, today: NaiveDate) -> IntakeForm {
        IntakeForm {
            destination: self.destination.clone(),
            start_date: self.start.unwrap_or(today),
            end_date: self.end.unwrap_or(today),
            appointment_time: self.appointment.unwrap_or_else(default_appointment_time),
            transport: self.transport,
            hotel_budget_per_night: self.budget,
            hotel_location_hint: self.location.clone().unwrap_or_default(),
            flexible_cancellation: !self.no_flexible_cancellation,
            cost_center: self.cost_center.clone().unwrap_or_default(),
            notes: self.notes.clone().unwrap_or_default(),
        }
    }

    pub fn to_form_today(&self) -> IntakeForm {
        self.to_form(Local::now().date_naive())
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (secrets masked)
    Show,
    /// Print the default config file path
    Path,
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{raw}', expected HH:MM"))
}
