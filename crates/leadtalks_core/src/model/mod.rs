//! CRM domain model.
//!
//! # Responsibility
//! - Define canonical entity records for leads, stages, notes, tasks,
//!   calendar events, tag/field definitions and contacts.
//! - Keep wire names aligned with the presentation layer's data keys.
//!
//! # Invariants
//! - Identifiers are opaque strings; uniqueness is the caller's concern.
//! - Lead names copied onto tasks, events and notes are snapshots, never joins.

pub mod catalog;
pub mod contact;
pub mod event;
pub mod lead;
pub mod note;
pub mod stage;
pub mod task;

/// Serde adapter for optional `HH:MM` times of day.
pub(crate) mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text).map(Some).map_err(serde::de::Error::custom),
        }
    }

    /// Accepts `HH:MM` and `HH:MM:SS`.
    pub fn parse(text: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(text, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
    }
}
