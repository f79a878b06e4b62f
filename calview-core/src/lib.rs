//! Core calendar engine for the calview ecosystem.
//!
//! This crate provides the pure computation layer behind the calview client:
//! - `range` for view bounds and anchor navigation
//! - `grid` for the 42-cell month grid and week days
//! - `normalize` and `bucket` for turning loosely-typed backend records into
//!   per-day event buckets
//! - `label` for human-readable range labels
//!
//! Everything is synchronous and side-effect-free. The current timezone and
//! "today" are always explicit parameters, so results are deterministic and
//! testable with fixed dates.

pub mod bucket;
pub mod error;
pub mod event;
pub mod grid;
pub mod label;
pub mod normalize;
pub mod range;
pub mod view;

pub use bucket::{DayBuckets, DisplayCap, MalformedEvent, bin_events, group_by_day, split_overflow};
pub use error::{CalendarError, CalendarResult};
pub use event::CalendarEvent;
pub use grid::{GRID_CELLS, GridCell, month_grid, week_days};
pub use label::format_range_label;
pub use normalize::normalize;
pub use range::{ViewBounds, parse_anchor_date, shift_anchor, start_of_week};
pub use view::View;
