//! Week window resolution.
//!
//! The displayed week is anchored on the Sunday that starts the local week,
//! shifted forward one day, at local midnight. Everything downstream indexes
//! days relative to that anchor, so it must always sit exactly on a local
//! midnight.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::EngineError;
use crate::zone::{local_midnight, parse_timezone};

/// Number of day columns in the window.
pub const DAYS_IN_WEEK: usize = 7;

/// Resolves the first instant of the week containing `instant`, as seen in
/// the named viewer timezone.
pub fn resolve_week_start(
    instant: DateTime<Utc>,
    viewer_timezone: &str,
) -> Result<DateTime<Tz>, EngineError> {
    let tz = parse_timezone(viewer_timezone)?;
    Ok(week_start_in(instant, tz))
}

/// Infallible form of [`resolve_week_start`] for an already-parsed zone.
///
/// A local Sunday belongs to the week that starts the next day.
pub fn week_start_in(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    let today = instant.with_timezone(&tz).date_naive();
    let days_since_sunday = today.weekday().num_days_from_sunday();
    let sunday = today - Days::new(u64::from(days_since_sunday));
    let monday = sunday + Days::new(1);
    local_midnight(&tz, monday)
}

/// Day index of `instant` relative to `week_start`, by local calendar date.
///
/// Negative or `>= 7` values mean the instant lies outside the window.
pub fn day_index(instant: &DateTime<Tz>, week_start: &DateTime<Tz>) -> i64 {
    let local = instant.with_timezone(&week_start.timezone());
    local
        .date_naive()
        .signed_duration_since(week_start.date_naive())
        .num_days()
}

/// The seven local dates covered by the window.
pub fn week_days(week_start: &DateTime<Tz>) -> [NaiveDate; DAYS_IN_WEEK] {
    let first = week_start.date_naive();
    std::array::from_fn(|i| first + Days::new(i as u64))
}

/// Column header for a day, e.g. `Mon 20.10`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %d.%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone, Weekday};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .expect("valid test timestamp")
    }

    #[test]
    fn resolves_monday_midnight_in_viewer_zone() {
        // Wednesday 2025-10-22 in Tashkent.
        let start = resolve_week_start(utc(2025, 10, 22, 12, 0), "Asia/Tashkent").unwrap();
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2025, 10, 20).unwrap());
        assert_eq!(start.time(), NaiveTime::MIN);
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(start.with_timezone(&Utc), utc(2025, 10, 19, 19, 0));
    }

    #[test]
    fn every_instant_of_the_week_maps_to_same_start() {
        let expected = resolve_week_start(utc(2025, 10, 20, 0, 0), "Asia/Tashkent").unwrap();
        // Tashkent Mon 00:00 is Sun 19:00 UTC; walk to Sat 23:59 local.
        let mut instant = utc(2025, 10, 19, 19, 0);
        let last = utc(2025, 10, 25, 18, 59);
        while instant <= last {
            assert_eq!(
                resolve_week_start(instant, "Asia/Tashkent").unwrap(),
                expected,
                "instant {instant}"
            );
            instant += chrono::Duration::minutes(97);
        }
    }

    #[test]
    fn sunday_belongs_to_following_week() {
        let start = resolve_week_start(utc(2025, 10, 26, 12, 0), "UTC").unwrap();
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2025, 10, 27).unwrap());
    }

    #[test]
    fn viewer_zone_decides_the_local_day() {
        // 2025-10-19 20:00 UTC is still Sunday in UTC but Monday in Tashkent.
        let instant = utc(2025, 10, 19, 20, 0);
        let in_utc = resolve_week_start(instant, "UTC").unwrap();
        let in_tashkent = resolve_week_start(instant, "Asia/Tashkent").unwrap();
        assert_eq!(in_utc.date_naive(), NaiveDate::from_ymd_opt(2025, 10, 20).unwrap());
        assert_eq!(
            in_tashkent.date_naive(),
            NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
        );
        assert_ne!(in_utc.with_timezone(&Utc), in_tashkent.with_timezone(&Utc));
    }

    #[test]
    fn unknown_viewer_zone_fails() {
        let err = resolve_week_start(utc(2025, 10, 22, 12, 0), "Nowhere/Special").unwrap_err();
        assert!(matches!(err, EngineError::InvalidTimezone { .. }));
    }

    #[test]
    fn day_index_counts_calendar_days_across_dst() {
        // Warsaw week containing the 2025-10-26 fall-back (a 25 hour Sunday).
        let tz = Tz::Europe__Warsaw;
        let start = week_start_in(utc(2025, 10, 22, 12, 0), tz);
        let sunday_late = tz.with_ymd_and_hms(2025, 10, 26, 23, 30, 0).unwrap();
        assert_eq!(day_index(&sunday_late, &start), 6);
        let before = tz.with_ymd_and_hms(2025, 10, 19, 23, 59, 0).unwrap();
        assert_eq!(day_index(&before, &start), -1);
    }

    #[test]
    fn labels_cover_seven_days() {
        let start = resolve_week_start(utc(2025, 10, 22, 12, 0), "Asia/Tashkent").unwrap();
        let labels: Vec<_> = week_days(&start).into_iter().map(day_label).collect();
        assert_eq!(
            labels,
            [
                "Mon 20.10", "Tue 21.10", "Wed 22.10", "Thu 23.10", "Fri 24.10", "Sat 25.10",
                "Sun 26.10"
            ]
        );
    }
}
