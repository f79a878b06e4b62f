//! Terminal rendering of calendar views.
//!
//! The engine hands over grid cells and day buckets; this module decides how
//! much of each bucket to show (the per-view display caps) and prints the
//! overflow as a dimmed `+N more` line, never dropping data silently.

use calview_core::{CalendarEvent, DayBuckets, GridCell, split_overflow};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

const WEEKDAY_HEADER: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Month view: the 6x7 grid with out-of-month days dimmed and today
/// highlighted, followed by the month's per-day agenda.
pub fn month(grid: &[GridCell], buckets: &DayBuckets, tz: Tz, cap: usize) {
    let header: Vec<String> = WEEKDAY_HEADER.iter().map(|d| format!("{:>4}", d)).collect();
    println!("{}", header.join("").bold());

    for row in grid.chunks(7) {
        let mut line = String::new();
        for cell in row {
            let marker = if buckets.events_on(cell.date).is_empty() {
                ' '
            } else {
                '·'
            };
            let text = format!("{:>3}{}", cell.date.day(), marker);
            if cell.today {
                line.push_str(&text.cyan().bold().to_string());
            } else if cell.in_month {
                line.push_str(&text);
            } else {
                line.push_str(&text.dimmed().to_string());
            }
        }
        println!("{}", line);
    }

    for (day, events) in buckets.iter() {
        let in_month = grid.iter().any(|c| c.in_month && c.date == day);
        if !in_month {
            continue;
        }
        println!();
        println!("{}", day.format("%a %b %-d").to_string().bold());
        print_capped(events, tz, cap);
    }
}

/// Week view: one section per day, Monday-first.
pub fn week(days: &[NaiveDate; 7], today: NaiveDate, buckets: &DayBuckets, tz: Tz, cap: usize) {
    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }

        let heading = day.format("%a, %b %-d").to_string();
        if *day == today {
            println!("{}", heading.cyan().bold());
        } else {
            println!("{}", heading.bold());
        }

        let events = buckets.events_on(*day);
        if events.is_empty() {
            println!("  {}", "No events".dimmed());
        } else {
            println!("  {} {}", events.len(), pluralize("event", events.len()));
            print_capped(events, tz, cap);
        }
    }
}

/// Day view: the full agenda, never truncated.
pub fn day(anchor: NaiveDate, buckets: &DayBuckets, tz: Tz) {
    let events = buckets.events_on(anchor);
    if events.is_empty() {
        println!("{}", "No events scheduled".dimmed());
        return;
    }

    for event in events {
        println!("  {} {}", format_span(event, tz), event.title.bold());
        if !event.location.is_empty() {
            println!("       {}", format!("• {}", event.location).dimmed());
        }
        if !event.description.is_empty() {
            println!("       {}", event.description);
        }
    }
}

fn print_capped(events: &[CalendarEvent], tz: Tz, cap: usize) {
    let (shown, overflow) = split_overflow(events, cap);
    for event in shown {
        println!("  {}", event_line(event, tz));
    }
    if overflow > 0 {
        println!("  {}", format!("+{} more", overflow).dimmed());
    }
}

fn event_line(event: &CalendarEvent, tz: Tz) -> String {
    let location = if event.location.is_empty() {
        String::new()
    } else {
        format!(" {}", format!("({})", event.location).dimmed())
    };
    format!("{} {}{}", format_time(event, tz), event.title, location)
}

/// The time slot of an event (e.g. "  15:00" or "all-day"), in local time.
fn format_time(event: &CalendarEvent, tz: Tz) -> String {
    if event.all_day {
        return "all-day".to_string();
    }
    match event.start {
        Some(start) => format!("{:>7}", start.with_timezone(&tz).format("%H:%M").to_string()),
        None => format!("{:>7}", "--:--"),
    }
}

fn format_span(event: &CalendarEvent, tz: Tz) -> String {
    if event.all_day {
        return "all-day".to_string();
    }
    match (event.start, event.end) {
        (Some(start), Some(end)) => format!(
            "{}–{}",
            start.with_timezone(&tz).format("%H:%M"),
            end.with_timezone(&tz).format("%H:%M")
        ),
        (Some(start), None) => start.with_timezone(&tz).format("%H:%M").to_string(),
        _ => "--:--".to_string(),
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
