//! Canonical calendar event type.
//!
//! Backend records arrive with unstable field naming (see [`crate::normalize`]).
//! `CalendarEvent` is the shape everything downstream works with: grouping,
//! rendering and payload construction. Field names serialize in camelCase so
//! that a serialized canonical event normalizes back to itself.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Placeholder title for events whose raw record carries none.
pub const UNTITLED: &str = "(Untitled)";

/// A calendar event after normalization.
///
/// `start`/`end` are `None` when the raw field was absent or unparsable.
/// Such events survive normalization (the engine never fails wholesale over
/// bad input) but are dropped with a diagnostic at binning time, since the
/// start instant is what determines the day bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Backend-assigned identifier. `None` only before persistence.
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub all_day: bool,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl CalendarEvent {
    /// The local calendar day this event belongs to, derived from `start`.
    pub fn local_start_day(&self, tz: Tz) -> Option<NaiveDate> {
        self.start.map(|dt| dt.with_timezone(&tz).date_naive())
    }
}
