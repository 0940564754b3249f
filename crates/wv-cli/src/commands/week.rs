//! Week command: lays out one week of events and prints the geometry.
//!
//! Implements `wv week` with a reference date, week offset, viewer timezone
//! override, and human-readable or JSON output.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use wv_core::{PositionedFragment, WeekView, build_week, parse_timezone};

use super::util::parse_reference_date;
use crate::Config;
use crate::store::load_events;

/// Options for a single `wv week` invocation.
#[derive(Debug, Clone, Default)]
pub struct WeekArgs<'a> {
    pub date: Option<&'a str>,
    pub offset: i32,
    pub timezone: Option<&'a str>,
    pub events: Option<&'a Path>,
    pub json: bool,
}

/// Runs the week command, writing the rendered week to `writer`.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    args: &WeekArgs<'_>,
    now: DateTime<Utc>,
) -> Result<()> {
    let tz_name = config.viewer_timezone(args.timezone);
    let tz = parse_timezone(&tz_name)?;

    let reference = match args.date {
        Some(date) => parse_reference_date(date, tz, now)?,
        None => now,
    };
    let reference = Duration::try_weeks(i64::from(args.offset))
        .and_then(|delta| reference.checked_add_signed(delta))
        .with_context(|| format!("week offset out of range: {}", args.offset))?;

    let events_path = args.events.unwrap_or(&config.events_path);
    let events = load_events(events_path)?;

    let view = build_week(
        &events,
        reference,
        &tz_name,
        &config.layout.to_layout_config(),
    )
    .context("failed to lay out week")?;

    let output = if args.json {
        format_week_json(&view)?
    } else {
        format_week(&view)
    };
    writeln!(writer, "{}", output.trim_end())?;
    Ok(())
}

// ========== Text Output ==========

/// Formats the week as a per-day listing with geometry.
pub fn format_week(view: &WeekView<'_>) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "WEEK OF {} ({})",
        view.week_start.format("%a %d.%m.%Y"),
        view.timezone
    )
    .unwrap();
    writeln!(output).unwrap();

    for day in &view.days {
        writeln!(output, "{}", day.label).unwrap();
        if day.events.is_empty() {
            writeln!(output, "  (no events)").unwrap();
            continue;
        }
        for positioned in &day.events {
            writeln!(output, "  {}", format_fragment(positioned)).unwrap();
        }
    }

    output
}

fn format_fragment(positioned: &PositionedFragment<'_>) -> String {
    let fragment = &positioned.fragment;
    format!(
        "{}-{}  {}  [top {:.2}, left {:.2}, height {:.2}]",
        fragment.local_start.format("%H:%M"),
        fragment.local_end.format("%H:%M"),
        fragment.event.title,
        positioned.top,
        positioned.left,
        positioned.height,
    )
}

// ========== JSON Output ==========

/// JSON week structure.
#[derive(Debug, Serialize)]
pub struct JsonWeek {
    pub timezone: String,
    pub week_start: String,
    pub days: Vec<JsonDay>,
}

#[derive(Debug, Serialize)]
pub struct JsonDay {
    pub index: usize,
    pub date: String,
    pub label: String,
    pub events: Vec<JsonFragment>,
}

#[derive(Debug, Serialize)]
pub struct JsonFragment {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub top: f64,
    pub left: f64,
    pub height: f64,
}

fn instant(dt: &DateTime<Tz>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Formats the week as JSON.
pub fn format_week_json(view: &WeekView<'_>) -> Result<String> {
    let week = JsonWeek {
        timezone: view.timezone.name().to_string(),
        week_start: instant(&view.week_start),
        days: view
            .days
            .iter()
            .map(|day| JsonDay {
                index: day.index,
                date: day.date.format("%Y-%m-%d").to_string(),
                label: day.label.clone(),
                events: day
                    .events
                    .iter()
                    .map(|p| JsonFragment {
                        id: p.fragment.event.id.to_string(),
                        title: p.fragment.event.title.clone(),
                        start: instant(&p.fragment.local_start),
                        end: instant(&p.fragment.local_end),
                        top: p.top,
                        left: p.left,
                        height: p.height,
                    })
                    .collect(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&week)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use insta::assert_snapshot;
    use wv_core::{CalendarEvent, EventId, EventKind, LayoutConfig};

    fn event(id: &str, title: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            id: EventId::new(id).unwrap(),
            kind: EventKind::Singular,
            start: start.to_string(),
            end: end.to_string(),
            timezone: "UTC".to_string(),
            title: title.to_string(),
            description: String::new(),
            updated_at: None,
        }
    }

    fn sample_events() -> Vec<CalendarEvent> {
        vec![
            event("1", "Standup", "2025-03-03 09:00", "2025-03-03 09:15"),
            event("2", "Review", "2025-03-04 10:00", "2025-03-04 12:00"),
            event("3", "Pairing", "2025-03-04 10:00", "2025-03-04 12:00"),
            event("4", "Deploy", "2025-03-04 11:00", "2025-03-04 13:00"),
            event("5", "Night shift", "2025-03-06 22:00", "2025-03-07 06:00"),
            event("6", "Retro", "2025-03-07 15:00", "2025-03-07 16:00"),
        ]
    }

    fn wednesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn week_text_output() {
        let events = sample_events();
        let view = build_week(&events, wednesday(), "UTC", &LayoutConfig::default()).unwrap();
        assert_snapshot!(format_week(&view));
    }

    #[test]
    fn week_json_output_carries_geometry() {
        let events = sample_events();
        let view = build_week(&events, wednesday(), "UTC", &LayoutConfig::default()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&format_week_json(&view).unwrap()).unwrap();

        assert_eq!(json["timezone"], "UTC");
        assert_eq!(json["week_start"], "2025-03-03T00:00:00.000+00:00");
        assert_eq!(json["days"].as_array().unwrap().len(), 7);

        let tuesday = json["days"][1]["events"].as_array().unwrap();
        let lefts: Vec<_> = tuesday.iter().map(|e| e["left"].as_f64().unwrap()).collect();
        assert_eq!(lefts, [0.0, 10.0, 20.0]);

        let thursday = &json["days"][3]["events"][0];
        assert_eq!(thursday["end"], "2025-03-06T23:59:59.999+00:00");
        let friday = &json["days"][4]["events"][0];
        assert_eq!(friday["start"], "2025-03-07T00:00:00.000+00:00");
    }

    #[test]
    fn run_reads_events_file_and_honours_offset() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("events.json");
        std::fs::write(&path, serde_json::to_string(&sample_events()).unwrap()).unwrap();

        let config = Config {
            events_path: path,
            timezone: Some("UTC".to_string()),
            ..Config::default()
        };
        let args = WeekArgs {
            date: Some("2025-03-12"),
            offset: -1,
            ..WeekArgs::default()
        };
        let mut output = Vec::new();
        run(&mut output, &config, &args, wednesday()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("WEEK OF Mon 03.03.2025 (UTC)"));
        assert!(output.contains("Standup"));
    }

    #[test]
    fn run_rejects_offset_past_calendar_range() {
        let config = Config {
            timezone: Some("UTC".to_string()),
            ..Config::default()
        };
        let args = WeekArgs {
            offset: 2_000_000_000,
            ..WeekArgs::default()
        };
        let mut output = Vec::new();
        let err = run(&mut output, &config, &args, wednesday()).unwrap_err();
        assert!(err.to_string().contains("week offset out of range"));
        assert!(output.is_empty());
    }

    #[test]
    fn run_rejects_unknown_viewer_zone() {
        let config = Config::default();
        let args = WeekArgs {
            timezone: Some("Atlantis/Capital"),
            ..WeekArgs::default()
        };
        let mut output = Vec::new();
        let err = run(&mut output, &config, &args, wednesday()).unwrap_err();
        assert!(err.to_string().contains("Atlantis/Capital"));
    }
}
