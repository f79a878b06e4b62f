use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::client::{EventPayload, EventsClient};
use crate::commands::new::parse_datetime;
use crate::config::Config;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    config: &Config,
    id: String,
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    location: Option<String>,
    description: Option<String>,
    all_day: Option<bool>,
) -> Result<()> {
    if title.is_none()
        && start.is_none()
        && end.is_none()
        && location.is_none()
        && description.is_none()
        && all_day.is_none()
    {
        bail!(
            "Nothing to update. Pass at least one of --title, --start, --end, \
            --location, --description, --all-day"
        );
    }
    if let Some(t) = &title {
        if t.trim().is_empty() {
            bail!("Title cannot be empty");
        }
    }

    let tz = config.timezone()?;
    let start = start.map(|s| parse_datetime(&s, tz)).transpose()?;
    let end = end.map(|s| parse_datetime(&s, tz)).transpose()?;
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            bail!("End must be after start");
        }
    }

    // Only the provided fields go on the wire; the backend keeps the rest.
    let payload = EventPayload {
        id: Some(id.clone()),
        title,
        description,
        location,
        all_day,
        start,
        end,
    };

    let client = EventsClient::new(config)?;
    client.update(&id, &payload).await?;

    println!("{}", format!("Updated: {}", id).yellow());

    Ok(())
}
