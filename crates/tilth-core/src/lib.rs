//! Core library for the Tilth crop activity scheduler.
//!
//! This crate turns static agronomic templates (crop → growth stages → tasks
//! with relative day offsets) into dated activity timelines, tracks the status
//! of each activity, and keeps that state in sync with a schedule service.
//!
//! # Layers
//!
//! - **Templates** ([`templates`]): the immutable, injected crop template
//!   registry
//! - **Engine** ([`engine`]): pure generation, classification, progress,
//!   reminder and transition functions
//! - **Remote** ([`remote`]): the schedule service contract, over HTTP or an
//!   embedded SQLite database ([`db`])
//! - **Store** ([`store`]): cached client-side view of the service
//! - **Display** ([`display`]): markdown formatting for terminal rendering
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tilth_core::{params::CreateSchedule, StoreBuilder};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new()
//!     .with_database_path(Some("tilth.db"))
//!     .build()
//!     .await?;
//!
//! let schedule = store
//!     .create(&CreateSchedule::parse("Wheat", "2024-01-01")?)
//!     .await?;
//! println!("{schedule}");
//!
//! for summary in store.list(None, &CancellationToken::new()).await? {
//!     println!("{} {}%", summary.crop_name, summary.progress_percentage);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod remote;
pub mod store;
pub mod templates;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    ActivityUpdateResult, CreateResult, CropList, DeleteResult, ScheduleSummaries, Timeline,
    Upcoming,
};
pub use error::{Result, ScheduleError};
pub use models::{
    Activity, ActivityStatus, CropTemplate, Schedule, ScheduleStatus, ScheduleSummary,
    TemporalLabel,
};
pub use params::{
    CreateSchedule, Id, ListSchedules, PatchActivity, UpcomingActivities, UpdateScheduleStatus,
};
pub use remote::{HttpScheduleService, LocalScheduleService, ScheduleService};
pub use store::{ScheduleStore, StoreBuilder};
pub use templates::TemplateRegistry;
