mod client;
mod commands;
mod config;
mod render;
mod utils;

use anyhow::Result;
use calview_core::View;
use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "calview")]
#[command(about = "Browse and edit your calendar from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a day, week or month view around a date
    Show {
        /// View granularity: day, week or month
        #[arg(short, long, default_value = "month")]
        view: String,

        /// Anchor date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Shift the anchor by this many view steps (negative for backwards)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        shift: i32,
    },
    /// Create an event
    New {
        title: Option<String>,

        /// Start date/time (e.g. "2026-03-20T15:00" or "tomorrow 3pm")
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time
        #[arg(short, long)]
        end: Option<String>,

        /// Duration instead of an end time (e.g. "1h 30m")
        #[arg(long, conflicts_with = "end")]
        duration: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// All-day event
        #[arg(long)]
        all_day: bool,
    },
    /// Update fields of an existing event
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Set or clear the all-day flag
        #[arg(long)]
        all_day: Option<bool>,
    },
    /// Delete an event by id
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Show { view, date, shift } => {
            let view: View = view.parse()?;
            commands::show::run(&config, view, date, shift).await
        }
        Commands::New {
            title,
            start,
            end,
            duration,
            location,
            description,
            all_day,
        } => {
            commands::new::run(
                &config,
                title,
                start,
                end,
                duration,
                location,
                description,
                all_day,
            )
            .await
        }
        Commands::Edit {
            id,
            title,
            start,
            end,
            location,
            description,
            all_day,
        } => {
            commands::edit::run(&config, id, title, start, end, location, description, all_day)
                .await
        }
        Commands::Delete { id, yes } => commands::delete::run(&config, id, yes).await,
    }
}
