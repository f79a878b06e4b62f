//! Normalization of loosely-typed backend event records.
//!
//! The backend contract for field naming is not fixed: records have been
//! observed with lower-camel and upper-camel field names. Each canonical
//! field therefore probes a priority-ordered alias list and takes the first
//! present, non-null value. The tables below *are* the contract — any
//! backend convention within them normalizes identically.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::event::{CalendarEvent, UNTITLED};

/// Alias table for the event identifier.
pub const ID_ALIASES: &[&str] = &["id", "eventId", "Id", "EventId"];
/// Alias table for the title.
pub const TITLE_ALIASES: &[&str] = &["title", "Title"];
/// Alias table for the description.
pub const DESCRIPTION_ALIASES: &[&str] = &["description", "Description"];
/// Alias table for the location.
pub const LOCATION_ALIASES: &[&str] = &["location", "Location"];
/// Alias table for the all-day flag.
pub const ALL_DAY_ALIASES: &[&str] = &["allDay", "AllDay"];
/// Alias table for the start instant.
pub const START_ALIASES: &[&str] = &["start", "Start"];
/// Alias table for the end instant.
pub const END_ALIASES: &[&str] = &["end", "End"];

/// Normalize one raw record into a [`CalendarEvent`].
///
/// Total over arbitrary JSON: missing fields take their defaults, and
/// unparsable start/end values come back as `None` (reported later as
/// binning diagnostics, never as a failure here). Naive datetimes are
/// interpreted in `tz`.
pub fn normalize(raw: &Value, tz: Tz) -> CalendarEvent {
    CalendarEvent {
        id: probe_string(raw, ID_ALIASES),
        title: probe_string(raw, TITLE_ALIASES).unwrap_or_else(|| UNTITLED.to_string()),
        description: probe_string(raw, DESCRIPTION_ALIASES).unwrap_or_default(),
        location: probe_string(raw, LOCATION_ALIASES).unwrap_or_default(),
        all_day: probe(raw, ALL_DAY_ALIASES)
            .and_then(Value::as_bool)
            .unwrap_or(false),
        start: probe(raw, START_ALIASES).and_then(|v| parse_instant(v, tz)),
        end: probe(raw, END_ALIASES).and_then(|v| parse_instant(v, tz)),
    }
}

/// First present, non-null value among the aliases.
fn probe<'a>(raw: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| raw.get(key))
        .find(|v| !v.is_null())
}

/// Probe and coerce to a string. Numeric ids are stringified.
fn probe_string(raw: &Value, aliases: &[&str]) -> Option<String> {
    match probe(raw, aliases)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The raw start field as display text, for diagnostics on dropped events.
pub(crate) fn raw_start_text(raw: &Value) -> Option<String> {
    match probe(raw, START_ALIASES)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse a raw start/end value into an instant.
///
/// Accepted forms: RFC 3339 (any offset), `YYYY-MM-DDTHH:MMZ`, naive
/// datetimes (`T` or space separated, with or without seconds) interpreted
/// in `tz`, bare dates at local midnight, and integer unix epoch
/// milliseconds.
pub fn parse_instant(value: &Value, tz: Tz) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_instant_str(s, tz),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

fn parse_instant_str(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.to_utc());
    }
    // RFC 3339 requires seconds; backends also send minute-precision UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%MZ") {
        return Some(naive.and_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return resolve_local(naive, tz);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
        return resolve_local(midnight, tz);
    }
    None
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive).earliest().map(|dt| dt.to_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz::UTC;
    use serde_json::json;

    #[test]
    fn test_upper_camel_aliases_normalize_identically() {
        let event = normalize(&json!({"Title": "X", "EventId": 5}), UTC);
        assert_eq!(event.id.as_deref(), Some("5"));
        assert_eq!(event.title, "X");
        assert_eq!(event.description, "");
        assert_eq!(event.location, "");
        assert!(!event.all_day);
        assert_eq!(event.start, None);
        assert_eq!(event.end, None);
    }

    #[test]
    fn test_every_id_alias_yields_the_same_event() {
        let expected = normalize(&json!({"id": "abc", "title": "T"}), UTC);
        for alias in ID_ALIASES {
            let raw = json!({*alias: "abc", "title": "T"});
            assert_eq!(normalize(&raw, UTC), expected, "alias {}", alias);
        }
    }

    #[test]
    fn test_probing_is_priority_ordered_and_skips_null() {
        let raw = json!({"id": null, "eventId": "second", "Id": "third"});
        let event = normalize(&raw, UTC);
        assert_eq!(event.id.as_deref(), Some("second"));
    }

    #[test]
    fn test_missing_title_gets_placeholder() {
        let event = normalize(&json!({"id": "1"}), UTC);
        assert_eq!(event.title, UNTITLED);
    }

    #[test]
    fn test_parse_instant_accepts_minute_precision_utc() {
        let dt = parse_instant(&json!("2026-03-09T09:00Z"), UTC).expect("Should parse");
        assert_eq!(dt.to_rfc3339(), "2026-03-09T09:00:00+00:00");
    }

    #[test]
    fn test_parse_instant_accepts_offsets() {
        let dt = parse_instant(&json!("2026-03-09T09:00:00+02:00"), UTC).expect("Should parse");
        assert_eq!(dt.to_rfc3339(), "2026-03-09T07:00:00+00:00");
    }

    #[test]
    fn test_naive_datetime_is_interpreted_in_the_given_timezone() {
        let tz = chrono_tz::America::New_York;
        let dt = parse_instant(&json!("2026-03-09T09:00"), tz).expect("Should parse");
        // 09:00 EDT == 13:00 UTC
        assert_eq!(dt.to_rfc3339(), "2026-03-09T13:00:00+00:00");
    }

    #[test]
    fn test_bare_date_is_local_midnight() {
        let dt = parse_instant(&json!("2026-03-09"), UTC).expect("Should parse");
        assert_eq!(dt.to_rfc3339(), "2026-03-09T00:00:00+00:00");
    }

    #[test]
    fn test_epoch_millis_parse() {
        let dt = parse_instant(&json!(1_767_225_600_000i64), UTC).expect("Should parse");
        assert_eq!(dt.to_rfc3339(), "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_unparsable_start_becomes_none() {
        let event = normalize(&json!({"title": "bad", "start": "not-a-date"}), UTC);
        assert_eq!(event.start, None);
    }

    #[test]
    fn test_normalize_is_idempotent_on_canonical_events() {
        let raw = json!({
            "EventId": 7,
            "Title": "Planning",
            "Location": "Room 2",
            "AllDay": false,
            "Start": "2026-03-09T09:00:00Z",
            "End": "2026-03-09T10:00:00Z",
        });
        let once = normalize(&raw, UTC);
        let serialized = serde_json::to_value(&once).expect("Should serialize");
        let twice = normalize(&serialized, UTC);
        assert_eq!(once, twice);
    }
}
