use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use dialoguer::Input;
use owo_colors::OwoColorize;

use crate::client::{EventPayload, EventsClient};
use crate::config::Config;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    config: &Config,
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    duration: Option<String>,
    location: Option<String>,
    description: Option<String>,
    all_day: bool,
) -> Result<()> {
    let tz = config.timezone()?;
    let interactive = title.is_none() || start.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };
    if title.trim().is_empty() {
        bail!("Title is required");
    }

    // --- Start ---
    let start_time = match start {
        Some(s) => parse_datetime(&s, tz)?,
        None => prompt_with_retry("  When?", |input| parse_datetime(input, tz))?,
    };

    // --- End ---
    let end_time = if let Some(input) = end {
        parse_datetime(&input, tz)?
    } else if let Some(input) = duration {
        start_time + parse_duration(&input)?
    } else {
        default_end(start_time, all_day)
    };
    if end_time <= start_time {
        bail!("End must be after start");
    }

    let payload = EventPayload {
        id: None,
        title: Some(title.clone()),
        description: Some(description.unwrap_or_default()),
        location: Some(location.unwrap_or_default()),
        all_day: Some(all_day),
        start: Some(start_time),
        end: Some(end_time),
    };

    let client = EventsClient::new(config)?;
    client.create(&payload).await?;

    if interactive {
        println!();
    }
    println!("{}", format!("Created: {}", title).green());

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<F>(prompt: &str, parse: F) -> Result<DateTime<Utc>>
where
    F: Fn(&str) -> Result<DateTime<Utc>>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Parse a date/time input into an instant in `tz`.
///
/// Structured forms are tried first (`2026-03-20T15:00`, with a space, or a
/// bare date at midnight); anything else goes through fuzzydate, so
/// "tomorrow 3pm" works too.
pub(crate) fn parse_datetime(input: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return resolve_local(naive, tz);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
        return resolve_local(midnight, tz);
    }

    let naive = fuzzydate::parse(trimmed)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;
    resolve_local(naive, tz)
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.to_utc())
        .ok_or_else(|| anyhow::anyhow!("{} does not exist in timezone {}", naive, tz))
}

/// "1h 30m" and friends.
fn parse_duration(input: &str) -> Result<Duration> {
    let parsed = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    Duration::from_std(parsed).context("Duration out of range")
}

/// Default event length: an hour, or a full day for all-day events.
fn default_end(start: DateTime<Utc>, all_day: bool) -> DateTime<Utc> {
    if all_day {
        start + Duration::days(1)
    } else {
        start + Duration::hours(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz::UTC;

    #[test]
    fn test_parse_datetime_structured_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 20, 15, 0, 0).unwrap();
        assert_eq!(
            parse_datetime("2026-03-20T15:00", UTC).expect("Should parse"),
            expected
        );
        assert_eq!(
            parse_datetime("2026-03-20 15:00", UTC).expect("Should parse"),
            expected
        );
    }

    #[test]
    fn test_parse_datetime_bare_date_is_midnight() {
        let dt = parse_datetime("2026-03-20", UTC).expect("Should parse");
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_respects_timezone() {
        let dt = parse_datetime("2026-03-20T15:00", chrono_tz::Europe::Stockholm)
            .expect("Should parse");
        // 15:00 CET == 14:00 UTC
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 20, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("not-a-date at all?!", UTC).is_err());
    }

    #[test]
    fn test_default_end() {
        let start = Utc.with_ymd_and_hms(2026, 3, 20, 15, 0, 0).unwrap();
        assert_eq!(default_end(start, false) - start, Duration::hours(1));
        assert_eq!(default_end(start, true) - start, Duration::days(1));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(
            parse_duration("1h 30m").expect("Should parse"),
            Duration::minutes(90)
        );
        assert!(parse_duration("soonish").is_err());
    }
}
