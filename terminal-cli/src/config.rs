use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use rosterwatch_client::{DEFAULT_DATABASE_URL, DEFAULT_SOURCE_URL};
use rosterwatch_types::{parse_timestamp, DEFAULT_REFERENCE_TIME};
use tracing::Level;

use crate::actions::Action;

/// CLI flags, each with an environment fallback.
#[derive(Parser, Debug)]
#[command(name = "rosterwatch", version, about = "Roster analysis console")]
pub struct Args {
    /// Roster feed URL (JSON array of players)
    #[arg(long, env = "ROSTERWATCH_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// Realtime database URL results are written to
    #[arg(long, env = "ROSTERWATCH_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Instant inactivity is measured against (RFC 3339)
    #[arg(
        long,
        env = "ROSTERWATCH_REFERENCE_TIME",
        default_value = DEFAULT_REFERENCE_TIME,
        value_parser = parse_reference_time
    )]
    pub reference_time: DateTime<Utc>,

    /// Per-request timeout in seconds (0 waits indefinitely)
    #[arg(long, env = "ROSTERWATCH_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Log level for diagnostics on stderr
    #[arg(long, env = "ROSTERWATCH_LOG_LEVEL", default_value = "warn")]
    pub log_level: Level,

    /// Run a single action and exit instead of showing the menu
    #[arg(long, value_enum)]
    pub run: Option<Action>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source_url: String,
    pub database_url: String,
    pub reference_time: DateTime<Utc>,
    pub request_timeout: Option<Duration>,
    pub log_level: Level,
    pub run: Option<Action>,
}

fn parse_reference_time(raw: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(raw).ok_or_else(|| anyhow!("expected an RFC 3339 timestamp, got {raw:?}"))
}

pub fn build_config(args: &Args) -> Config {
    Config {
        source_url: args.source_url.clone(),
        database_url: args.database_url.clone(),
        reference_time: args.reference_time,
        request_timeout: match args.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        },
        log_level: args.log_level,
        run: args.run,
    }
}
