//! Check command: validates the events file against the engine's rules.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono_tz::Tz;
use wv_core::{CalendarEvent, to_local_span};

use crate::Config;
use crate::store::load_events;

/// Runs the check command. Fails if any event is invalid.
pub fn run<W: Write>(writer: &mut W, config: &Config, events: Option<&Path>) -> Result<()> {
    let path = events.unwrap_or(&config.events_path);
    let events = load_events(path)?;

    let invalid = report(writer, &events)?;
    if invalid > 0 {
        anyhow::bail!("{invalid} invalid event(s) in {}", path.display());
    }
    Ok(())
}

/// Writes one line per invalid event and a summary; returns the invalid count.
fn report<W: Write>(writer: &mut W, events: &[CalendarEvent]) -> Result<usize> {
    let mut failures = Vec::new();
    let mut backwards = 0usize;
    for event in events {
        // Any valid zone works here; only parse failures and ordering matter.
        match to_local_span(event, Tz::UTC) {
            Ok((start, end)) if end <= start => backwards += 1,
            Ok(_) => {}
            Err(err) => failures.push((event, err)),
        }
    }

    writeln!(
        writer,
        "Checked {} events: {} ok, {} invalid",
        events.len(),
        events.len() - failures.len(),
        failures.len()
    )?;
    for (event, err) in &failures {
        writeln!(writer, "- {} ({}): {err}", event.id, event.title)?;
    }
    if backwards > 0 {
        writeln!(
            writer,
            "Warning: {backwards} event(s) end before or when they start"
        )?;
    }

    Ok(failures.len())
}
