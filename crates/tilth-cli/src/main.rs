//! Tilth CLI Application
//!
//! Command-line interface for the Tilth crop activity scheduler.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::{info, warn};
use renderer::TerminalRenderer;
use tilth_core::{engine, params::ListSchedules, StoreBuilder};
use tokio_util::sync::CancellationToken;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        remote_url,
        templates,
        timeout_secs,
        today,
        no_color,
        command,
    } = Args::parse();

    let today = match today {
        Some(input) => engine::parse_start_date(&input).context("Invalid --today")?,
        None => engine::today(),
    };

    let store = StoreBuilder::new()
        .with_database_path(database_file)
        .with_remote_url(remote_url)
        .with_timeout(timeout_secs.map(Duration::from_secs))
        .with_templates_path(templates)
        .build()
        .await
        .context("Failed to initialize schedule store")?;

    info!("Tilth started ({} backend)", store.backend_tag());

    // Abandon in-flight reads on Ctrl-C instead of waiting for the service.
    let token = CancellationToken::new();
    tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Received SIGINT, cancelling pending requests");
                token.cancel();
            }
        }
    });

    let cli = Cli::new(store, TerminalRenderer::new(!no_color), today, token);

    match command {
        Some(Crops) => cli.list_crops(),
        Some(Preview(args)) => cli.preview(args),
        Some(Schedule { command }) => cli.handle_schedule_command(command).await,
        Some(Activity { command }) => cli.handle_activity_command(command).await,
        None => cli.list_schedules(&ListSchedules::default()).await,
    }
}
