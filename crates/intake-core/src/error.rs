/// Accumulated form validation failures.
///
/// Every rule runs before this is returned, so callers can show the full list
/// at once instead of one problem per submission.
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", .messages.join("; "))]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum IntakeError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Remote store rejected upload with HTTP {status}")]
    RemoteStatus { status: u16 },

    #[error("Hotel search is not configured: missing {0}")]
    HotelSearchUnconfigured(&'static str),

    #[error("Hotel search limit {limit} out of range (1..={max})")]
    HotelLimitOutOfRange { limit: usize, max: usize },
}
