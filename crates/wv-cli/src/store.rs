//! JSON-backed event store.

use std::path::Path;

use anyhow::{Context, Result};
use wv_core::CalendarEvent;

/// Reads all events from a JSON array file.
///
/// The file is read once per invocation and treated as an immutable snapshot.
/// Events are expected sorted by start; order is not checked here.
pub fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events file {}", path.display()))?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse events file {}", path.display()))?;
    tracing::debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}
