//! Domain types for travel-request intake: the request record, its builder,
//! and the slug encoder used to name case folders.

pub mod error;
pub mod record;
pub mod slug;
pub mod types;

pub use error::{IntakeError, ValidationErrors};
pub use record::{IntakeForm, RequestRecord};
pub use slug::{SLUG_FALLBACK, SLUG_MAX_LEN, sanitize_slug};
pub use types::{OutputFormat, TransportMode};
