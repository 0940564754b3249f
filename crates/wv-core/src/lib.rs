//! Week view engine.
//!
//! Turns timezone-stamped calendar events into per-day, positioned
//! rectangles for a seven-day grid:
//! - Week window: the local midnight that anchors the grid
//! - Projection: events converted to the viewer's zone and filtered to the week
//! - Splitting: events crossing local midnight broken into per-day fragments
//! - Layout: vertical geometry from time of day, staggered horizontal offsets

mod error;
pub mod event;
pub mod layout;
mod pipeline;
pub mod projection;
pub mod split;
mod types;
pub mod week;
pub mod zone;

pub use error::{EngineError, TimestampField};
pub use event::{CalendarEvent, EventKind};
pub use layout::{LayoutConfig, LayoutScale, PositionedFragment, layout_day};
pub use pipeline::{DayColumn, WeekView, build_week};
pub use projection::{LocalCalendarEvent, project_for_week, to_local_span};
pub use split::{DayFragment, WeekBuckets, split_by_local_day};
pub use types::{EventId, ValidationError};
pub use week::{DAYS_IN_WEEK, day_index, day_label, resolve_week_start, week_days};
pub use zone::parse_timezone;
