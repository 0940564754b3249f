//! Overlap-aware placement of a day's fragments.
//!
//! # Vertical placement
//!
//! `top` is the fragment's time of day and `height` its duration, both as a
//! fraction of 24 hours multiplied by the column extent. Heights are clamped
//! so a fragment never extends below the bottom of its column.
//!
//! # Horizontal placement
//!
//! Fragments are scanned in order while tracking a running high-water mark:
//! the latest end seen so far, and the `left` of the fragment that set it.
//! A fragment collides when that mark is after its start, or when it starts
//! at the same instant as the previous fragment. A colliding fragment is
//! placed at the larger of the high-water owner's and the previous
//! fragment's `left`, plus `shift` when it directly overlaps the previous
//! fragment. A non-colliding fragment returns to column zero.
//!
//! This produces a staggered cascade rather than a packed column
//! assignment; column zero is reused as soon as a run of overlapping
//! fragments ends.

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;

use crate::split::DayFragment;

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Units used for vertical geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutScale {
    /// The column is 100 units tall.
    Percent,
    /// The column is `24 * hour_height` pixels tall.
    Pixels { hour_height: f64 },
}

impl LayoutScale {
    /// Height of a full day column in this scale.
    #[must_use]
    pub fn day_extent(self) -> f64 {
        match self {
            Self::Percent => 100.0,
            Self::Pixels { hour_height } => hour_height * 24.0,
        }
    }
}

/// Parameters for [`layout_day`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub scale: LayoutScale,
    /// Horizontal stagger applied to a fragment that overlaps its predecessor.
    pub shift: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: LayoutScale::Percent,
            shift: 10.0,
        }
    }
}

/// A fragment with its position inside the day column.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedFragment<'a> {
    pub fragment: DayFragment<'a>,
    pub top: f64,
    pub left: f64,
    pub height: f64,
}

/// Scan state carried from one fragment to the next.
#[derive(Debug, Clone, Copy, Default)]
struct Cascade {
    /// Latest end seen so far.
    running_end: Option<DateTime<Tz>>,
    /// `left` of the fragment that set `running_end`.
    running_left: f64,
    /// Start, end and `left` of the previous fragment.
    previous: Option<(DateTime<Tz>, DateTime<Tz>, f64)>,
}

impl Cascade {
    /// Places one fragment and returns the state for the next one.
    fn step(self, start: DateTime<Tz>, end: DateTime<Tz>, shift: f64) -> (Self, f64) {
        let same_start_as_previous = self
            .previous
            .is_some_and(|(prev_start, _, _)| prev_start == start);
        let colliding = self.running_end.is_some_and(|e| e > start) || same_start_as_previous;

        let left = if colliding {
            let (prev_end, prev_left) = self
                .previous
                .map_or((None, 0.0), |(_, prev_end, prev_left)| (Some(prev_end), prev_left));
            let stagger = if prev_end.is_some_and(|e| e > start) {
                shift
            } else {
                0.0
            };
            self.running_left.max(prev_left) + stagger
        } else {
            0.0
        };

        let running_end = self.running_end.map_or(end, |e| e.max(end));
        let running_left = if running_end == end {
            left
        } else {
            self.running_left
        };

        let next = Self {
            running_end: Some(running_end),
            running_left,
            previous: Some((start, end, left)),
        };
        (next, left)
    }
}

/// Lays out one day's fragments.
///
/// Fragments are expected in chronological order of `local_start`; the
/// result has one entry per input fragment, in the same order.
pub fn layout_day<'a>(
    fragments: &[DayFragment<'a>],
    config: &LayoutConfig,
) -> Vec<PositionedFragment<'a>> {
    let extent = config.scale.day_extent();

    fragments
        .iter()
        .scan(Cascade::default(), |state, fragment| {
            let (next, left) = state.step(fragment.local_start, fragment.local_end, config.shift);
            *state = next;

            let top = scaled(milliseconds_since_midnight(&fragment.local_start), extent);
            let duration_ms = (fragment.local_end - fragment.local_start).num_milliseconds();
            let height = scaled(duration_ms, extent).min(extent - top);

            Some(PositionedFragment {
                fragment: fragment.clone(),
                top,
                left,
                height,
            })
        })
        .collect()
}

/// Wall-clock position within the local day.
fn milliseconds_since_midnight(instant: &DateTime<Tz>) -> i64 {
    let time = instant.time();
    i64::from(time.num_seconds_from_midnight()) * 1000
        + i64::from(time.nanosecond().min(999_999_999) / 1_000_000)
}

/// Converts a span of milliseconds into column units.
#[allow(clippy::cast_precision_loss)]
fn scaled(ms: i64, extent: f64) -> f64 {
    ms as f64 * extent / MS_PER_DAY
}
