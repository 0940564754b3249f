//! IANA timezone lookup and DST-safe wall-clock resolution.

use chrono::{DateTime, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::error::EngineError;

/// How far back to look for the offset in force before a DST gap.
const GAP_LOOKBACK_HOURS: i64 = 6;

/// Looks up an IANA zone by name.
pub fn parse_timezone(name: &str) -> Result<Tz, EngineError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| EngineError::InvalidTimezone {
            name: name.to_string(),
        })
}

/// Resolves a naive wall-clock value in `tz` to an absolute instant.
///
/// Ambiguous values (DST fall-back) take the earlier instant. Values inside
/// a DST gap are pushed forward by the length of the gap, so `02:30` on a
/// spring-forward night becomes `03:30`.
pub fn resolve_wall_clock(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            let offset = offset_around_gap(tz, naive);
            let utc = naive
                .checked_sub_signed(Duration::seconds(i64::from(offset)))
                .unwrap_or(naive);
            tz.from_utc_datetime(&utc)
        }
    }
}

/// Offset in force just before the gap containing `naive`, falling back to
/// the offset just after it.
fn offset_around_gap(tz: &Tz, naive: NaiveDateTime) -> i32 {
    let lookback = Duration::hours(GAP_LOOKBACK_HOURS);
    let before = naive.checked_sub_signed(lookback);
    let after = naive.checked_add_signed(lookback);
    [before, after]
        .into_iter()
        .flatten()
        .find_map(|candidate| tz.offset_from_local_datetime(&candidate).earliest())
        .map_or_else(
            || tz.offset_from_utc_datetime(&naive).fix().local_minus_utc(),
            |offset| offset.fix().local_minus_utc(),
        )
}

/// First instant of `date` in `tz`.
pub fn local_midnight(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    resolve_wall_clock(tz, date.and_time(chrono::NaiveTime::MIN))
}

/// First instant of the day after `date`, or `None` at the end of the calendar.
pub fn next_local_midnight(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    date.checked_add_days(Days::new(1))
        .map(|next| local_midnight(tz, next))
}
