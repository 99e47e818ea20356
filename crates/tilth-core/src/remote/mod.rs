//! The remote schedule service boundary.
//!
//! [`ScheduleService`] is the authoritative persistence contract the
//! [`ScheduleStore`](crate::store::ScheduleStore) synchronizes against. Two
//! backends implement it:
//!
//! - [`HttpScheduleService`]: JSON over HTTP to a remote server.
//! - [`LocalScheduleService`]: the same contract served in-process from
//!   SQLite, resolving templates with the shared generator.
//!
//! Backends report failures as [`ScheduleError`](crate::ScheduleError)s and
//! never retry; retry policy belongs to the caller.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Schedule, ScheduleStatus, ScheduleSummary},
    params::{CreateSchedule, PatchActivity, UpdateScheduleStatus},
};

pub mod http;
pub mod local;
pub mod wire;


pub use http::HttpScheduleService;
pub use local::LocalScheduleService;
pub use wire::{ActivityDocument, ScheduleDocument};

/// Authoritative schedule persistence.
#[async_trait]
pub trait ScheduleService: Send + Sync {
    /// Short backend name for logs.
    fn backend_tag(&self) -> &'static str;

    /// Lists schedule summaries, optionally filtered by status.
    async fn list_schedules(&self, status: Option<ScheduleStatus>) -> Result<Vec<ScheduleSummary>>;

    /// Fetches one schedule with fully resolved activities.
    async fn get_schedule(&self, id: u64) -> Result<Schedule>;

    /// Resolves the crop template and saves the resulting schedule.
    async fn create_schedule(&self, params: &CreateSchedule) -> Result<Schedule>;

    /// Changes one activity's status; returns the updated schedule.
    async fn patch_activity(&self, params: &PatchActivity) -> Result<Schedule>;

    /// Explicitly changes a schedule's status.
    async fn update_schedule_status(&self, params: &UpdateScheduleStatus) -> Result<Schedule>;

    /// Permanently deletes a schedule.
    async fn delete_schedule(&self, id: u64) -> Result<()>;
}
