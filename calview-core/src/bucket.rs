//! Per-day event binning.
//!
//! Events are keyed by the local calendar day of their start instant and
//! ordered within each day by start time, ties keeping input order. Events
//! without a resolvable start cannot be placed in any bucket; they are
//! dropped into a diagnostics list instead of failing the whole operation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::CalendarEvent;
use crate::normalize::{normalize, raw_start_text};
use crate::view::View;

/// Events grouped by local calendar day, each day ordered by start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBuckets {
    map: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
}

impl DayBuckets {
    /// Events on one day, in display order. Empty slice for empty days.
    pub fn events_on(&self, day: NaiveDate) -> &[CalendarEvent] {
        self.map.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty days in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[CalendarEvent])> {
        self.map.iter().map(|(day, events)| (*day, events.as_slice()))
    }

    pub fn day_count(&self) -> usize {
        self.map.len()
    }

    pub fn total_events(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Diagnostic for an event that could not be binned.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedEvent {
    pub id: Option<String>,
    pub title: String,
    /// Raw start text from the backend record, when one was present.
    pub start: Option<String>,
}

impl fmt::Display for MalformedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.start {
            Some(raw) => write!(f, "'{}': unparsable start '{}'", self.title, raw),
            None => write!(f, "'{}': missing start", self.title),
        }
    }
}

/// Group normalized events into per-day buckets.
///
/// Total over well-formed events: anything without a start instant goes to
/// the diagnostics list and the rest still group. The per-day sort is
/// stable, so events with equal starts keep their input order.
pub fn group_by_day(
    events: impl IntoIterator<Item = CalendarEvent>,
    tz: Tz,
) -> (DayBuckets, Vec<MalformedEvent>) {
    let mut map: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    let mut dropped = Vec::new();

    for event in events {
        match event.local_start_day(tz) {
            Some(day) => map.entry(day).or_default().push(event),
            None => dropped.push(MalformedEvent {
                id: event.id.clone(),
                title: event.title.clone(),
                start: None,
            }),
        }
    }

    for events in map.values_mut() {
        events.sort_by_key(|e| e.start);
    }

    (DayBuckets { map }, dropped)
}

/// Normalize raw backend records and group them in one pass.
///
/// Diagnostics produced here additionally carry the offending raw start
/// text, which is lost once a record has been normalized.
pub fn bin_events(raws: &[Value], tz: Tz) -> (DayBuckets, Vec<MalformedEvent>) {
    let mut events = Vec::with_capacity(raws.len());
    let mut dropped = Vec::new();

    for raw in raws {
        let event = normalize(raw, tz);
        if event.start.is_none() {
            dropped.push(MalformedEvent {
                id: event.id,
                title: event.title,
                start: raw_start_text(raw),
            });
        } else {
            events.push(event);
        }
    }

    let (buckets, more) = group_by_day(events, tz);
    dropped.extend(more);
    (buckets, dropped)
}

/// How many events a day cell displays before truncating.
///
/// Truncation is a rendering concern: buckets always hold the complete
/// ordered list and consumers use [`split_overflow`] to decide what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCap {
    #[serde(default = "default_month_cap")]
    pub month: usize,
    #[serde(default = "default_week_cap")]
    pub week: usize,
}

fn default_month_cap() -> usize {
    3
}

fn default_week_cap() -> usize {
    6
}

impl Default for DisplayCap {
    fn default() -> Self {
        DisplayCap {
            month: default_month_cap(),
            week: default_week_cap(),
        }
    }
}

impl DisplayCap {
    /// The cap for a view; the day view is never truncated.
    pub fn for_view(&self, view: View) -> Option<usize> {
        match view {
            View::Day => None,
            View::Week => Some(self.week),
            View::Month => Some(self.month),
        }
    }
}

/// Split a day's events into the displayed prefix and the overflow count.
pub fn split_overflow<T>(events: &[T], cap: usize) -> (&[T], usize) {
    let shown = cap.min(events.len());
    (&events[..shown], events.len() - shown)
}
