//! Calendar events as authored, before any timezone conversion.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, TimestampField};
use crate::types::EventId;

/// Wall-clock layouts accepted for event start/end values, tried in order.
const WALL_CLOCK_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// The kind of calendar entry.
///
/// Only singular events carry distinct semantics today; recurring and
/// all-day entries are laid out from their own start/end like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    #[default]
    Singular,
    Recurring,
    AllDay,
}

/// A calendar event in its authoring timezone.
///
/// `start` and `end` are naive wall-clock strings (`2025-10-20 10:00`)
/// interpreted against `timezone`. Callers are expected to keep
/// `start < end` and to supply events sorted by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Opaque identifier.
    pub id: EventId,
    /// Entry kind.
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    /// Wall-clock start in `timezone`.
    pub start: String,
    /// Wall-clock end in `timezone`.
    pub end: String,
    /// IANA zone name used to interpret `start`/`end`.
    pub timezone: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Last modification time, epoch milliseconds on the wire.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CalendarEvent {
    /// Parses the start or end value as a naive wall-clock timestamp.
    pub fn wall_clock(&self, field: TimestampField) -> Result<NaiveDateTime, EngineError> {
        let raw = match field {
            TimestampField::Start => &self.start,
            TimestampField::End => &self.end,
        };
        let value = raw.trim();
        WALL_CLOCK_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .ok_or_else(|| EngineError::MalformedTimestamp {
                event_id: self.id.to_string(),
                field,
                value: raw.clone(),
            })
    }
}
