//! Whole-week computation: window, projection, splitting and layout.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::EngineError;
use crate::event::CalendarEvent;
use crate::layout::{LayoutConfig, PositionedFragment, layout_day};
use crate::projection::project_for_week;
use crate::split::split_by_local_day;
use crate::week::{day_label, week_days, week_start_in};
use crate::zone::parse_timezone;

/// One column of the week grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn<'a> {
    /// Position in the window, `0..7`.
    pub index: usize,
    pub date: NaiveDate,
    /// Header text, e.g. `Mon 20.10`.
    pub label: String,
    pub events: Vec<PositionedFragment<'a>>,
}

/// Geometry for a full week, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekView<'a> {
    pub timezone: Tz,
    /// Local midnight starting the first column.
    pub week_start: DateTime<Tz>,
    /// Always seven columns.
    pub days: Vec<DayColumn<'a>>,
}

/// Computes the week containing `instant` as seen from `viewer_timezone`.
///
/// Events are expected sorted by start. Each day's fragments are stably
/// sorted by local start before layout, which leaves sorted input as it is.
pub fn build_week<'a>(
    events: &'a [CalendarEvent],
    instant: DateTime<Utc>,
    viewer_timezone: &str,
    layout: &LayoutConfig,
) -> Result<WeekView<'a>, EngineError> {
    let tz = parse_timezone(viewer_timezone)?;
    let week_start = week_start_in(instant, tz);
    tracing::debug!(%week_start, timezone = %tz, "resolved week window");

    let projected = project_for_week(events, &week_start)?;
    let buckets = split_by_local_day(&projected, &week_start);

    let days = week_days(&week_start)
        .into_iter()
        .zip(buckets)
        .enumerate()
        .map(|(index, (date, mut fragments))| {
            if !fragments.is_sorted_by(|a, b| a.local_start <= b.local_start) {
                tracing::warn!(
                    day = index,
                    "events out of chronological order; sorting before layout"
                );
                fragments.sort_by(|a, b| a.local_start.cmp(&b.local_start));
            }
            DayColumn {
                index,
                date,
                label: day_label(date),
                events: layout_day(&fragments, layout),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        fragments = days.iter().map(|d| d.events.len()).sum::<usize>(),
        "laid out week"
    );

    Ok(WeekView {
        timezone: tz,
        week_start,
        days,
    })
}
