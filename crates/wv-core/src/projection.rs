//! Projection of authored events into the viewer's timezone.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::error::{EngineError, TimestampField};
use crate::event::CalendarEvent;
use crate::week::{DAYS_IN_WEEK, day_index};
use crate::zone::{parse_timezone, resolve_wall_clock};

/// An event whose span has been converted to the viewer's timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalCalendarEvent<'a> {
    /// The authored event this span came from.
    pub event: &'a CalendarEvent,
    pub local_start: DateTime<Tz>,
    pub local_end: DateTime<Tz>,
}

impl<'a> LocalCalendarEvent<'a> {
    /// Converts one event into the viewer's timezone.
    pub fn from_event(event: &'a CalendarEvent, viewer_tz: Tz) -> Result<Self, EngineError> {
        let (local_start, local_end) = to_local_span(event, viewer_tz)?;
        Ok(Self {
            event,
            local_start,
            local_end,
        })
    }
}

/// Interprets an event's wall-clock span in its own zone and expresses both
/// ends in `viewer_tz`.
pub fn to_local_span(
    event: &CalendarEvent,
    viewer_tz: Tz,
) -> Result<(DateTime<Tz>, DateTime<Tz>), EngineError> {
    let source_tz = parse_timezone(&event.timezone)?;
    let start = event.wall_clock(TimestampField::Start)?;
    let end = event.wall_clock(TimestampField::End)?;
    Ok((
        resolve_wall_clock(&source_tz, start).with_timezone(&viewer_tz),
        resolve_wall_clock(&source_tz, end).with_timezone(&viewer_tz),
    ))
}

/// Selects the events whose local start falls inside the week beginning at
/// `week_start`, converted into the week's timezone.
///
/// Only the start is tested: an event that begins before the window is
/// excluded even if it ends inside it. Input order is preserved.
pub fn project_for_week<'a>(
    events: &'a [CalendarEvent],
    week_start: &DateTime<Tz>,
) -> Result<Vec<LocalCalendarEvent<'a>>, EngineError> {
    let viewer_tz = week_start.timezone();
    let window = 0..DAYS_IN_WEEK as i64;

    let mut projected = Vec::new();
    for event in events {
        let local = LocalCalendarEvent::from_event(event, viewer_tz)?;
        if window.contains(&day_index(&local.local_start, week_start)) {
            projected.push(local);
        }
    }

    tracing::debug!(
        total = events.len(),
        in_window = projected.len(),
        "projected events into week"
    );
    Ok(projected)
}
