use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth_core::store::FileStore;
use hearth_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "hearth")]
#[command(author, version, about = "A home dashboard backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the recurring chore list
    Chores {
        #[command(subcommand)]
        action: Option<ChoresAction>,
    },
    /// Show aggregated headlines from the configured sources
    News {
        /// Skip the article cache and hit every source
        #[arg(long)]
        fresh: bool,
    },
    /// Show the themed headline digest
    Digest {
        /// Refetch articles and rebuild the stored digest
        #[arg(long)]
        regenerate: bool,
    },
    /// Show current conditions for the configured location
    Weather,
    /// Track workouts, mood, learning, and social time
    Life {
        #[command(subcommand)]
        action: LifeAction,
    },
}

#[derive(Subcommand)]
enum ChoresAction {
    /// List every chore with its due/overdue state
    List {
        /// Evaluate against this date (yyyy-mm-dd) instead of today
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a chore
    Add {
        /// Chore name
        #[arg(short, long)]
        name: String,
        /// daily, weekly, monthly, yearly, or onetime
        #[arg(short, long, default_value = "daily")]
        schedule: String,
        /// Cadence detail: "weeks,dow", day-of-month, "mm-dd", or "yyyy-mm-dd"
        #[arg(short, long, default_value = "")]
        param: String,
    },
    /// Mark a chore completed today
    Done {
        /// Name of the chore
        name: String,
    },
    /// Remove a chore
    Remove {
        /// Name of the chore
        name: String,
    },
}

#[derive(Subcommand)]
enum LifeAction {
    /// Workout streak and unlocked achievements
    Streaks,
    /// Log activities from free text, e.g. "gym then coffee with a friend"
    Log {
        /// Text to scan for activity keywords
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging; RUST_LOG overrides the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let store = Arc::new(FileStore::new(config.data_dir()));

    match cli.command {
        Commands::Chores { action } => {
            match action.unwrap_or(ChoresAction::List { date: None }) {
                ChoresAction::List { date } => {
                    commands::chores::list(store.as_ref(), date.as_deref())
                }
                ChoresAction::Add {
                    name,
                    schedule,
                    param,
                } => commands::chores::add(store.as_ref(), &name, &schedule, &param),
                ChoresAction::Done { name } => commands::chores::done(store.as_ref(), &name),
                ChoresAction::Remove { name } => commands::chores::remove(store.as_ref(), &name),
            }
        }
        Commands::News { fresh } => commands::news::run(store, &config, fresh).await,
        Commands::Digest { regenerate } => commands::digest::run(store, &config, regenerate).await,
        Commands::Weather => commands::weather::run(&config).await,
        Commands::Life { action } => match action {
            LifeAction::Streaks => commands::life::streaks(store.as_ref()),
            LifeAction::Log { text } => commands::life::log(store.as_ref(), &text.join(" ")),
        },
    }
}
