use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use rosterwatch_client::{http_client, FirebaseStore, HttpSource};
use tracing::{info, Level};

mod actions;
mod config;
mod menu;
mod render;

use actions::Pipeline;
use config::{build_config, Args};

fn init_tracing(level: Level) {
    // Stdout carries the menu and results; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args);
    init_tracing(config.log_level);
    let http = http_client(config.request_timeout).context("failed to build HTTP client")?;
    let pipeline = Pipeline {
        source: HttpSource::new(http.clone(), &config.source_url)
            .context("invalid source URL")?,
        store: FirebaseStore::new(http, &config.database_url).context("invalid database URL")?,
        reference_time: config.reference_time,
    };
    info!(
        source = %pipeline.source.url(),
        database = %config.database_url,
        reference_time = %pipeline.reference_time,
        "starting rosterwatch"
    );

    let mut stdout = io::stdout().lock();
    match config.run {
        Some(action) => pipeline.run(action, &mut stdout).await,
        None => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            menu::run(&pipeline, input, &mut stdout).await
        }
    }
}
