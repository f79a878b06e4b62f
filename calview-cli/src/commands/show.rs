use anyhow::Result;
use calview_core::{
    View, ViewBounds, bin_events, format_range_label, month_grid, parse_anchor_date, shift_anchor,
    week_days,
};
use chrono::Utc;
use owo_colors::OwoColorize;

use crate::client::EventsClient;
use crate::config::Config;
use crate::render;
use crate::utils::tui::create_spinner;

pub async fn run(config: &Config, view: View, date: Option<String>, shift: i32) -> Result<()> {
    let tz = config.timezone()?;
    // The wall clock is read exactly once per invocation
    let today = Utc::now().with_timezone(&tz).date_naive();

    let anchor = match date {
        Some(s) => parse_anchor_date(&s)?,
        None => today,
    };
    let anchor = shift_anchor(view, anchor, shift);
    let bounds = ViewBounds::for_view(view, anchor, tz);

    let client = EventsClient::new(config)?;
    let spinner = create_spinner("Loading events".to_string());
    let result = client.list_in_range(&bounds).await;
    spinner.finish_and_clear();
    let raws = result?;

    let (buckets, dropped) = bin_events(&raws, tz);

    println!("{}", format_range_label(view, anchor).bold());
    println!();
    match view {
        View::Month => render::month(
            &month_grid(anchor, today),
            &buckets,
            tz,
            config.display.month,
        ),
        View::Week => render::week(&week_days(anchor), today, &buckets, tz, config.display.week),
        View::Day => render::day(anchor, &buckets, tz),
    }

    if !dropped.is_empty() {
        eprintln!();
        for malformed in &dropped {
            eprintln!("{}", format!("Skipped {}", malformed).yellow());
        }
    }

    Ok(())
}
