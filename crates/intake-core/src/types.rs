use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Preferred means of travel.
///
/// Serialized with the labels used in the ledger and the case folder
/// (`Flug`, `Bahn`, `egal`); the CLI accepts English names plus the German
/// labels as aliases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum TransportMode {
    #[default]
    #[value(name = "air", alias = "flug")]
    #[serde(rename = "Flug")]
    Air,
    #[value(name = "rail", alias = "bahn")]
    #[serde(rename = "Bahn")]
    Rail,
    #[value(name = "any", alias = "egal")]
    #[serde(rename = "egal")]
    Any,
}

impl TransportMode {
    /// Label written to the ledger and the summary document.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Air => "Flug",
            Self::Rail => "Bahn",
            Self::Any => "egal",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Output format for CLI responses
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
