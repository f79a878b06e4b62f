//! Human-readable labels for the current view and anchor.

use chrono::{Datelike, Duration, NaiveDate};

use crate::range::start_of_week;
use crate::view::View;

/// Label for the (view, anchor) combination shown in the view header.
///
/// Month: "March 2026". Day: "Monday, March 9, 2026". Week: the Monday and
/// Sunday endpoints, "Mar 9 – Mar 15, 2026"; a week crossing a year boundary
/// carries both years.
pub fn format_range_label(view: View, anchor: NaiveDate) -> String {
    match view {
        View::Month => anchor.format("%B %Y").to_string(),
        View::Day => anchor.format("%A, %B %-d, %Y").to_string(),
        View::Week => {
            let start = start_of_week(anchor);
            let end = start + Duration::days(6);
            if start.year() == end.year() {
                format!(
                    "{} – {}, {}",
                    start.format("%b %-d"),
                    end.format("%b %-d"),
                    end.year()
                )
            } else {
                format!(
                    "{} – {}",
                    start.format("%b %-d, %Y"),
                    end.format("%b %-d, %Y")
                )
            }
        }
    }
}
