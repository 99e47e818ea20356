//! Pure scheduling engine.
//!
//! Everything here is synchronous and side-effect free: the same inputs
//! always produce the same outputs, and nothing is cached. I/O lives in
//! [`crate::remote`] and [`crate::store`].
//!
//! - [`generator`]: template + start date → dated [`Schedule`](crate::models::Schedule)
//! - [`classify`]: status + date + today → [`TemporalLabel`](crate::models::TemporalLabel)
//! - [`progress`](mod@progress): completion percentage of a schedule
//! - [`upcoming`](mod@upcoming): reminders within a rolling horizon
//! - [`transitions`]: permitted activity and schedule status changes
//!
//! ```rust
//! use jiff::civil::date;
//! use tilth_core::{engine, templates::TemplateRegistry};
//!
//! let registry = TemplateRegistry::builtin()?;
//! let schedule = engine::generate(&registry, "Wheat", date(2024, 1, 1))?;
//!
//! assert_eq!(schedule.expected_harvest_date, date(2024, 5, 30));
//! assert_eq!(engine::progress(&schedule), 0);
//!
//! let reminders = engine::upcoming(&schedule, date(2024, 1, 1), engine::DEFAULT_HORIZON_DAYS);
//! assert!(reminders.iter().any(|entry| entry.is_overdue));
//! # Ok::<(), tilth_core::ScheduleError>(())
//! ```

pub mod classify;
pub mod generator;
pub mod progress;
pub mod transitions;
pub mod upcoming;

#[cfg(test)]
mod tests;

pub use classify::{classify, today};
pub use generator::{add_days, generate, parse_start_date, resolve};
pub use progress::{completion_percentage, progress};
pub use transitions::{apply_activity_status, check_schedule_transition, reconcile_status};
pub use upcoming::{upcoming, UpcomingActivity, DEFAULT_HORIZON_DAYS};
