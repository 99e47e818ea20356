use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ActivityCommands, PreviewArgs, ScheduleCommands};

/// Main command-line interface for the Tilth crop scheduler
///
/// Tilth turns crop templates into dated activity timelines anchored to a
/// planting date, and tracks which activities have been done. Schedules are
/// kept in a local SQLite database unless a remote schedule service is
/// configured.
#[derive(Parser)]
#[command(version, about, name = "tilth")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tilth/tilth.db
    #[arg(long, global = true, env = "TILTH_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Base URL of a remote schedule service; overrides the local database
    #[arg(long, global = true, env = "TILTH_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// JSON file with crop templates; defaults to the built-in set
    #[arg(long, global = true, env = "TILTH_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Request timeout for the remote service, in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Evaluate overdue/today labels as of this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Tilth CLI
///
/// - `crops`: list the crop templates that can be scheduled
/// - `preview`: resolve a template without saving anything
/// - `schedule`: create, inspect and delete saved schedules
/// - `activity`: mark individual activities done, pending or skipped
#[derive(Subcommand)]
pub enum Commands {
    /// List supported crops
    #[command(alias = "c")]
    Crops,
    /// Show the timeline a crop would get, without saving it
    Preview(PreviewArgs),
    /// Manage schedules
    #[command(alias = "s")]
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Change activity status within a schedule
    #[command(alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
}
