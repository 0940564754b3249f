//! Splitting of projected events into single-day fragments.
//!
//! An event that crosses one or more local midnights becomes a run of
//! fragments, one per day it occupies. Each fragment ends at most one
//! millisecond before the next local midnight, and the following fragment
//! starts exactly on that midnight.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::event::CalendarEvent;
use crate::projection::LocalCalendarEvent;
use crate::week::{DAYS_IN_WEEK, day_index};
use crate::zone::next_local_midnight;

/// The part of an event that falls on a single local day of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct DayFragment<'a> {
    /// The authored event this fragment came from.
    pub event: &'a CalendarEvent,
    /// Column in the window, `0..7`.
    pub day_index: usize,
    pub local_start: DateTime<Tz>,
    pub local_end: DateTime<Tz>,
}

/// One bucket of fragments per day of the window.
pub type WeekBuckets<'a> = [Vec<DayFragment<'a>>; DAYS_IN_WEEK];

/// A span still waiting to be assigned, with the number of fragments its
/// source event has produced so far.
struct Pending<'a> {
    event: &'a CalendarEvent,
    local_start: DateTime<Tz>,
    local_end: DateTime<Tz>,
    emitted: usize,
}

/// Distributes projected events over the seven days starting at `week_start`.
///
/// Fragments keep the order of `projected` within each bucket. Fragments
/// whose day lies outside the window are dropped.
pub fn split_by_local_day<'a>(
    projected: &[LocalCalendarEvent<'a>],
    week_start: &DateTime<Tz>,
) -> WeekBuckets<'a> {
    let tz = week_start.timezone();
    let mut buckets: WeekBuckets<'a> = std::array::from_fn(|_| Vec::new());

    // Reversed so that popping yields events in their original order; a
    // remainder is pushed on top and handled before the next event.
    let mut worklist: Vec<Pending<'a>> = projected
        .iter()
        .rev()
        .map(|local| Pending {
            event: local.event,
            local_start: local.local_start,
            local_end: local.local_end,
            emitted: 0,
        })
        .collect();

    while let Some(piece) = worklist.pop() {
        let index = day_index(&piece.local_start, week_start);
        let start_date = piece.local_start.date_naive();

        let midnight = if piece.local_end > piece.local_start
            && piece.local_end.date_naive() != start_date
        {
            next_local_midnight(&tz, start_date)
        } else {
            None
        };

        let Some(midnight) = midnight else {
            place(&mut buckets, index, piece.event, piece.local_start, piece.local_end);
            continue;
        };

        place(
            &mut buckets,
            index,
            piece.event,
            piece.local_start,
            midnight - Duration::milliseconds(1),
        );

        let emitted = piece.emitted + 1;
        if midnight >= piece.local_end {
            continue;
        }
        if emitted >= DAYS_IN_WEEK || index + 1 >= DAYS_IN_WEEK as i64 {
            tracing::trace!(
                event_id = %piece.event.id,
                day_index = index + 1,
                "dropping remainder past the end of the week"
            );
            continue;
        }
        worklist.push(Pending {
            event: piece.event,
            local_start: midnight,
            local_end: piece.local_end,
            emitted,
        });
    }

    buckets
}

fn place<'a>(
    buckets: &mut WeekBuckets<'a>,
    index: i64,
    event: &'a CalendarEvent,
    local_start: DateTime<Tz>,
    local_end: DateTime<Tz>,
) {
    let Some(day_index) = usize::try_from(index).ok().filter(|i| *i < DAYS_IN_WEEK) else {
        tracing::trace!(event_id = %event.id, day_index = index, "fragment outside week dropped");
        return;
    };
    buckets[day_index].push(DayFragment {
        event,
        day_index,
        local_start,
        local_end,
    });
}
