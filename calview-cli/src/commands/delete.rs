use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::client::EventsClient;
use crate::config::Config;

pub async fn run(config: &Config, id: String, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete event {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted".dimmed());
            return Ok(());
        }
    }

    let client = EventsClient::new(config)?;
    client.delete(&id).await?;

    println!("{}", format!("Deleted: {}", id).red());

    Ok(())
}
