//! Data models for crop templates, schedules and activities.
//!
//! Templates ([`CropTemplate`], [`Stage`], [`ActivityTemplate`]) are
//! read-only configuration. Schedules ([`Schedule`], [`ResolvedStage`],
//! [`Activity`]) are the dated, stateful values resolved from them. Display
//! implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use jiff::civil::date;
//! use tilth_core::models::{Activity, ActivityStatus, Schedule, ScheduleStatus};
//!
//! let schedule = Schedule::from_activities(
//!     Some(1),
//!     "Wheat".to_string(),
//!     date(2024, 1, 1),
//!     date(2024, 5, 30),
//!     ScheduleStatus::Planning,
//!     vec![Activity {
//!         id: Activity::derive_id("Sowing", 0),
//!         stage_name: "Sowing".to_string(),
//!         task: "Seed drilling".to_string(),
//!         scheduled_date: date(2024, 1, 1),
//!         status: ActivityStatus::Pending,
//!     }],
//! );
//! assert_eq!(schedule.stages.len(), 1);
//! assert!(schedule.activity("Sowing-0").is_some());
//! ```

pub mod activity;
pub mod schedule;
pub mod status;
pub mod summary;
pub mod template;

#[cfg(test)]
mod tests;

pub use activity::Activity;
pub use schedule::{ResolvedStage, Schedule};
pub use status::{ActivityStatus, ScheduleStatus, TemporalLabel};
pub use summary::ScheduleSummary;
pub use template::{ActivityTemplate, CropTemplate, DurationRange, Stage};
