mod cli;
mod config;
mod context;
mod graph;
mod scoring;
mod signal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::graph::bridge::DEFAULT_MAX_DEPTH;

#[derive(Parser)]
#[command(name = "warmpath", version, about = "Who to contact next, mined from your group chats")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank people worth contacting, with reasons and outreach drafts
    Scan {
        /// Transcript JSON ({"messages": [...], "members": [...]})
        #[arg(long)]
        transcript: PathBuf,
        /// Profiles JSON (array of profile records)
        #[arg(long)]
        profiles: PathBuf,
        /// Name of the person asking for recommendations
        #[arg(long)]
        requester: String,
        /// Override the configured reference city
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        max_results: Option<usize>,
        #[arg(long)]
        min_score: Option<u32>,
        /// Reference time (for reproducible runs); defaults to now
        #[arg(long)]
        now: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Find a connection path between two people in the entity graph
    Path {
        #[arg(long)]
        transcript: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
        #[arg(long)]
        json: bool,
    },
    /// List introduction triangles anchored at the requester
    Bridges {
        #[arg(long)]
        transcript: PathBuf,
        #[arg(long)]
        requester: String,
        #[arg(long)]
        json: bool,
    },
    /// List shared context (common neighbors) between two people
    Shared {
        #[arg(long)]
        transcript: PathBuf,
        #[arg(long, value_name = "NAME")]
        yours: String,
        #[arg(long, value_name = "NAME")]
        theirs: String,
        #[arg(long)]
        json: bool,
    },
    /// Pair people who need help with people who can give it
    HelpMatches {
        #[arg(long)]
        transcript: PathBuf,
        #[arg(long)]
        requester: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level and scan defaults)
    let config = config::WarmpathConfig::load()?;

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for --json output.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Scan {
            transcript,
            profiles,
            requester,
            city,
            max_results,
            min_score,
            now,
            json,
        } => {
            let mut scan_config = config.scan.clone();
            if city.is_some() {
                scan_config.reference_city = city;
            }
            if let Some(max) = max_results {
                scan_config.max_results = max;
            }
            if let Some(min) = min_score {
                scan_config.min_score = min;
            }
            cli::scan::scan(
                &transcript,
                &profiles,
                &requester,
                &scan_config,
                now.as_deref(),
                json,
            )?;
        }
        Command::Path {
            transcript,
            from,
            to,
            max_depth,
            json,
        } => {
            cli::query::path(&transcript, &from, &to, max_depth, json)?;
        }
        Command::Bridges {
            transcript,
            requester,
            json,
        } => {
            cli::query::bridges(&transcript, &requester, json)?;
        }
        Command::Shared {
            transcript,
            yours,
            theirs,
            json,
        } => {
            cli::query::shared(&transcript, &yours, &theirs, json)?;
        }
        Command::HelpMatches {
            transcript,
            requester,
            json,
        } => {
            cli::query::help_matches(&transcript, &requester, json)?;
        }
    }

    Ok(())
}
