//! View bounds and anchor navigation.
//!
//! A view is anchored on a local calendar day. This module turns
//! (view, anchor) into the half-open UTC interval `[start, end)` the backend
//! is queried with, and moves the anchor backwards/forwards by one view step.
//!
//! Day and week bounds are fixed-duration (exactly 24h and 7×24h from the
//! local-midnight start). Month bounds run wall-clock midnight to wall-clock
//! midnight of the next month.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CalendarError, CalendarResult};
use crate::view::View;

/// Half-open instant interval `[start, end)` visible in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ViewBounds {
    /// Bounds for the given view around `anchor`, in timezone `tz`.
    pub fn for_view(view: View, anchor: NaiveDate, tz: Tz) -> Self {
        match view {
            View::Day => day_bounds(anchor, tz),
            View::Week => week_bounds(anchor, tz),
            View::Month => month_bounds(anchor, tz),
        }
    }

    /// Whether an instant falls inside the half-open interval.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339()
    }

    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339()
    }
}

/// The 24 hours starting at `anchor`'s local midnight.
pub fn day_bounds(anchor: NaiveDate, tz: Tz) -> ViewBounds {
    let start = local_midnight(anchor, tz);
    ViewBounds {
        start,
        end: start + Duration::hours(24),
    }
}

/// The 7 days starting at the local midnight of `anchor`'s Monday.
pub fn week_bounds(anchor: NaiveDate, tz: Tz) -> ViewBounds {
    let start = local_midnight(start_of_week(anchor), tz);
    ViewBounds {
        start,
        end: start + Duration::days(7),
    }
}

/// From the local midnight of the first of `anchor`'s month to the local
/// midnight of the first of the following month.
pub fn month_bounds(anchor: NaiveDate, tz: Tz) -> ViewBounds {
    let first = first_of_month(anchor);
    ViewBounds {
        start: local_midnight(first, tz),
        end: local_midnight(shift_months(first, 1), tz),
    }
}

/// The most recent Monday on or before `anchor` (`anchor` itself on Mondays).
pub fn start_of_week(anchor: NaiveDate) -> NaiveDate {
    anchor - Duration::days(i64::from(anchor.weekday().num_days_from_monday()))
}

/// Move the anchor by `offset` view steps (negative for backwards).
///
/// Day steps are single days, week steps whole weeks. Month steps move by
/// calendar month with the day-of-month clamped to the target month's last
/// valid day, so Jan 31 + 1 month lands on Feb 28 (or 29).
pub fn shift_anchor(view: View, anchor: NaiveDate, offset: i32) -> NaiveDate {
    match view {
        View::Day => anchor + Duration::days(i64::from(offset)),
        View::Week => anchor + Duration::days(7 * i64::from(offset)),
        View::Month => shift_months(anchor, offset),
    }
}

/// Parse a CLI anchor date (`YYYY-MM-DD`).
pub fn parse_anchor_date(s: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

fn first_of_month(anchor: NaiveDate) -> NaiveDate {
    anchor.with_day(1).expect("day 1 exists in every month")
}

fn shift_months(anchor: NaiveDate, offset: i32) -> NaiveDate {
    let zero_based = anchor.year() * 12 + anchor.month0() as i32 + offset;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = anchor.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day-of-month is valid")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is valid")
        .pred_opt()
        .expect("date has a predecessor")
        .day()
}

/// Resolve a local midnight to an instant.
///
/// Ambiguous midnights (fall-back transition) take the earlier instant.
/// Skipped midnights (spring-forward at 00:00, e.g. Brazil) roll forward to
/// the first wall-clock hour that exists on that day.
fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.to_utc(),
        LocalResult::Ambiguous(first, _) => first.to_utc(),
        LocalResult::None => (1..=3)
            .find_map(|h| tz.from_local_datetime(&(midnight + Duration::hours(h))).earliest())
            .map(|dt| dt.to_utc())
            .unwrap_or_else(|| midnight.and_utc()),
    }
}
