//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(day|week)s?\s+(ago|ahead)$").expect("relative date pattern is valid")
});

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: i64 = 1000 * 365;

/// Parse a reference date for week selection.
///
/// Supports:
/// - ISO 8601: "2025-10-22T10:30:00Z"
/// - Calendar date: "2025-10-22", taken at local noon in `tz`
/// - Relative: "3 days ago", "2 weeks ahead"
pub fn parse_reference_date(s: &str, tz: Tz, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).context("noon is valid")?);
        let local = tz
            .from_local_datetime(&noon)
            .earliest()
            .with_context(|| format!("{s} has no local noon in {tz}"))?;
        return Ok(local.with_timezone(&Utc));
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use ISO 8601 (e.g., 2025-10-22T10:30:00Z), a date (2025-10-22), or relative (e.g., '2 weeks ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;

    let days_per_unit = match &caps[2] {
        "day" => 1,
        "week" => 7,
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };

    if n > MAX_RELATIVE_DAYS / days_per_unit {
        anyhow::bail!("Relative date value too large: {n} {}", &caps[2]);
    }

    let delta = Duration::days(n * days_per_unit);
    Ok(if &caps[3] == "ago" { now - delta } else { now + delta })
}
