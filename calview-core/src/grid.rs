//! Month grid and week day generation.

use chrono::{Datelike, Duration, NaiveDate};

use crate::range::start_of_week;

/// Cells in a month grid: 6 rows of 7 days, Monday-first.
pub const GRID_CELLS: usize = 42;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// Whether the cell belongs to the anchor's month (padding days from the
    /// neighbouring months fill the fixed 42-cell frame).
    pub in_month: bool,
    pub today: bool,
}

/// Build the fixed 42-cell grid for `anchor`'s month.
///
/// The grid starts at the first Monday on or before the first of the month
/// and depends only on `anchor`'s year and month; `today` is injected so the
/// flag is deterministic under test.
pub fn month_grid(anchor: NaiveDate, today: NaiveDate) -> Vec<GridCell> {
    let first = anchor.with_day(1).expect("day 1 exists in every month");
    let grid_start = start_of_week(first);

    (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            GridCell {
                date,
                in_month: date.year() == anchor.year() && date.month() == anchor.month(),
                today: date == today,
            }
        })
        .collect()
}

/// The seven local days of the week containing `anchor`, Monday-first.
pub fn week_days(anchor: NaiveDate) -> [NaiveDate; 7] {
    let monday = start_of_week(anchor);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("Should be a valid date")
    }

    #[test]
    fn test_grid_has_42_cells_starting_on_a_monday() {
        let grid = month_grid(date(2026, 3, 9), date(2026, 3, 9));
        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0].date.weekday(), Weekday::Mon);
        // March 2026 starts on a Sunday, so the grid begins in February
        assert_eq!(grid[0].date, date(2026, 2, 23));
    }

    #[test]
    fn test_in_month_cells_form_one_contiguous_run() {
        let grid = month_grid(date(2026, 3, 9), date(2026, 3, 9));
        let first_in = grid
            .iter()
            .position(|c| c.in_month)
            .expect("Should contain the month");
        let last_in = grid
            .iter()
            .rposition(|c| c.in_month)
            .expect("Should contain the month");

        assert_eq!(grid[first_in].date, date(2026, 3, 1));
        assert_eq!(grid[last_in].date, date(2026, 3, 31));
        assert!(grid[first_in..=last_in].iter().all(|c| c.in_month));
        assert!(grid[..first_in].iter().all(|c| !c.in_month));
        assert!(grid[last_in + 1..].iter().all(|c| !c.in_month));
    }

    #[test]
    fn test_grid_depends_only_on_anchor_month() {
        let today = date(2026, 3, 17);
        let from_first = month_grid(date(2026, 3, 1), today);
        let from_last = month_grid(date(2026, 3, 31), today);
        assert_eq!(from_first, from_last);
    }

    #[test]
    fn test_today_flag_uses_injected_date() {
        let grid = month_grid(date(2026, 3, 9), date(2026, 3, 17));
        let marked: Vec<_> = grid.iter().filter(|c| c.today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].date, date(2026, 3, 17));

        // Today outside the displayed month marks nothing
        let grid = month_grid(date(2026, 3, 9), date(2026, 5, 1));
        assert!(grid.iter().all(|c| !c.today));
    }

    #[test]
    fn test_month_starting_on_monday_keeps_full_leading_week() {
        // June 2026 starts on a Monday: cell 0 is June 1 itself
        let grid = month_grid(date(2026, 6, 10), date(2026, 6, 10));
        assert_eq!(grid[0].date, date(2026, 6, 1));
        assert!(grid[0].in_month);
    }

    #[test]
    fn test_week_days_are_monday_first_and_contain_anchor() {
        let anchor = date(2026, 3, 11);
        let days = week_days(anchor);
        assert_eq!(days[0], date(2026, 3, 9));
        assert_eq!(days[6], date(2026, 3, 15));
        assert!(days.contains(&anchor));
        assert_eq!(days[0].weekday(), Weekday::Mon);
    }
}
