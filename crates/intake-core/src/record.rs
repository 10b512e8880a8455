//! The travel request record and the form it is built from.
//!
//! [`RequestRecord::build`] validates before it creates a record. Records
//! deserialized from storage bypass that step; readers call
//! [`RequestRecord::validate`] to apply the same rules. There is no mutating
//! API: a correction is a new record with a new id.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::slug::sanitize_slug;
use crate::types::TransportMode;

pub const ERR_DESTINATION_REQUIRED: &str = "destination required";
pub const ERR_END_BEFORE_START: &str = "end date before start date";

/// Lowest accepted nightly hotel budget in EUR.
pub const BUDGET_MIN: u32 = 50;
/// Highest accepted nightly hotel budget in EUR.
pub const BUDGET_MAX: u32 = 600;
pub const DEFAULT_BUDGET: u32 = 150;

/// Length of the request-id prefix used in folder and export names.
pub const SHORT_ID_LEN: usize = 8;

/// Appointment time used when the form leaves it blank.
pub fn default_appointment_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Raw form input as collected from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub transport: TransportMode,
    pub hotel_budget_per_night: u32,
    pub hotel_location_hint: String,
    pub flexible_cancellation: bool,
    pub cost_center: String,
    pub notes: String,
}

impl IntakeForm {
    /// Form with the defaults the intake offers for every optional field.
    pub fn new(destination: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            destination: destination.into(),
            start_date,
            end_date,
            appointment_time: default_appointment_time(),
            transport: TransportMode::default(),
            hotel_budget_per_night: DEFAULT_BUDGET,
            hotel_location_hint: String::new(),
            flexible_cancellation: true,
            cost_center: String::new(),
            notes: String::new(),
        }
    }

    /// Run every validation rule and collect all failures.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.destination.trim().is_empty() {
            errors.push(ERR_DESTINATION_REQUIRED);
        }
        if self.end_date < self.start_date {
            errors.push(ERR_END_BEFORE_START);
        }
        if !(BUDGET_MIN..=BUDGET_MAX).contains(&self.hotel_budget_per_night) {
            errors.push(format!(
                "hotel budget must be between {BUDGET_MIN} and {BUDGET_MAX} EUR per night"
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A validated, immutable travel request.
///
/// Field order is the ledger column order. Serialized names are the ledger
/// headers, which are also the keys of `request.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    request_id: Uuid,
    #[serde(with = "created_at_format")]
    created_at: NaiveDateTime,
    #[serde(rename = "Ziel")]
    destination: String,
    #[serde(rename = "Start")]
    start_date: NaiveDate,
    #[serde(rename = "Ende")]
    end_date: NaiveDate,
    #[serde(rename = "Termin", with = "hhmm_format")]
    appointment_time: NaiveTime,
    #[serde(rename = "Verkehr")]
    transport: TransportMode,
    #[serde(rename = "Hotelbudget")]
    hotel_budget_per_night: u32,
    #[serde(rename = "Lage")]
    hotel_location_hint: String,
    #[serde(rename = "Flexible_Storno", deserialize_with = "lenient_bool::deserialize")]
    flexible_cancellation: bool,
    #[serde(rename = "Kostenstelle_Projekt")]
    cost_center: String,
    #[serde(rename = "Wunsch")]
    notes: String,
}

impl RequestRecord {
    /// Validate `form` and build a record with a fresh id and the current
    /// local time.
    pub fn build(form: IntakeForm) -> Result<Self, ValidationErrors> {
        Self::build_at(form, Uuid::new_v4(), Local::now().naive_local())
    }

    /// Same as [`build`](Self::build) with caller-supplied id and timestamp.
    pub fn build_at(
        form: IntakeForm,
        request_id: Uuid,
        created_at: NaiveDateTime,
    ) -> Result<Self, ValidationErrors> {
        form.validate()?;

        Ok(Self {
            request_id,
            created_at: created_at.with_nanosecond(0).unwrap_or(created_at),
            destination: form.destination.trim().to_string(),
            start_date: form.start_date,
            end_date: form.end_date,
            appointment_time: form
                .appointment_time
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(form.appointment_time),
            transport: form.transport,
            hotel_budget_per_night: form.hotel_budget_per_night,
            hotel_location_hint: form.hotel_location_hint.trim().to_string(),
            flexible_cancellation: form.flexible_cancellation,
            cost_center: form.cost_center.trim().to_string(),
            notes: form.notes.trim().to_string(),
        })
    }

    /// Apply the form rules to an existing record, e.g. one read from a
    /// hand-edited ledger.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut form = IntakeForm::new(self.destination.clone(), self.start_date, self.end_date);
        form.hotel_budget_per_night = self.hotel_budget_per_night;
        form.validate()
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// First [`SHORT_ID_LEN`] characters of the hyphenated request id.
    pub fn short_id(&self) -> String {
        short_id(&self.request_id)
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// `created_at` as written to the ledger (`YYYY-MM-DD HH:MM:SS`).
    pub fn created_at_display(&self) -> String {
        self.created_at.format(created_at_format::FORMAT).to_string()
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn appointment_time(&self) -> NaiveTime {
        self.appointment_time
    }

    /// Appointment time as written to the ledger (`HH:MM`).
    pub fn appointment_display(&self) -> String {
        self.appointment_time.format(hhmm_format::FORMAT).to_string()
    }

    pub fn transport(&self) -> TransportMode {
        self.transport
    }

    pub fn hotel_budget_per_night(&self) -> u32 {
        self.hotel_budget_per_night
    }

    pub fn hotel_location_hint(&self) -> &str {
        &self.hotel_location_hint
    }

    pub fn flexible_cancellation(&self) -> bool {
        self.flexible_cancellation
    }

    pub fn cost_center(&self) -> &str {
        &self.cost_center
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Name of this record's case folder.
    pub fn folder_name(&self) -> String {
        folder_name(self.start_date, &self.destination, &self.request_id)
    }
}

/// `{YYYYMMDD}_{slug}_{id prefix}`; a pure function of its inputs.
pub fn folder_name(start_date: NaiveDate, destination: &str, request_id: &Uuid) -> String {
    format!(
        "{}_{}_{}",
        start_date.format("%Y%m%d"),
        sanitize_slug(destination),
        short_id(request_id)
    )
}

fn short_id(request_id: &Uuid) -> String {
    request_id
        .hyphenated()
        .to_string()
        .chars()
        .take(SHORT_ID_LEN)
        .collect()
}

mod created_at_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub(super) fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

mod hhmm_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%H:%M";

    pub(super) fn serialize<S: Serializer>(
        value: &NaiveTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Accepts `true`/`false` as well as the capitalized `True`/`False` found
/// in older ledgers.
mod lenient_bool {
    use serde::Deserializer;
    use serde::de::{self, Visitor};
    use std::fmt;

    struct LenientBool;

    impl Visitor<'_> for LenientBool {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean (true/false or True/False)")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            match value.trim() {
                "true" | "True" | "TRUE" => Ok(true),
                "false" | "False" | "FALSE" => Ok(false),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<bool, D::Error> {
        deserializer.deserialize_any(LenientBool)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
