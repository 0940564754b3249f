//! Engine error kinds.

use std::fmt;

use thiserror::Error;

/// Which end of an event a timestamp belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    Start,
    End,
}

impl TimestampField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl fmt::Display for TimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the week computation.
///
/// Fragments falling outside the displayed week are not errors; they are
/// dropped silently by the splitter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The name is not a known IANA timezone identifier.
    #[error("unknown timezone: {name:?}")]
    InvalidTimezone { name: String },

    /// An event's start or end could not be read as a wall-clock timestamp.
    #[error("malformed {field} timestamp for event {event_id}: {value:?}")]
    MalformedTimestamp {
        event_id: String,
        field: TimestampField,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_timestamp_message_names_event_and_field() {
        let err = EngineError::MalformedTimestamp {
            event_id: "7".to_string(),
            field: TimestampField::End,
            value: "tomorrow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed end timestamp for event 7: \"tomorrow\""
        );
    }

    #[test]
    fn invalid_timezone_message_quotes_name() {
        let err = EngineError::InvalidTimezone {
            name: "Mars/Olympus".to_string(),
        };
        assert_eq!(err.to_string(), "unknown timezone: \"Mars/Olympus\"");
    }
}
