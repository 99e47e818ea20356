//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use jiff::civil::Date;

use super::Timeline;
use crate::{
    engine::progress,
    models::{ActivityStatus, Schedule},
};

/// Confirmation for a newly saved schedule, followed by its timeline.
pub struct CreateResult<'a> {
    pub schedule: &'a Schedule,
    pub today: Date,
}

impl fmt::Display for CreateResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.schedule.id {
            writeln!(f, "Created schedule with ID: {id}")?;
            writeln!(f)?;
        }
        write!(f, "{}", Timeline::new(self.schedule, self.today))
    }
}

/// Confirmation for an activity status change.
///
/// ```rust
/// use jiff::civil::date;
/// use tilth_core::{display::ActivityUpdateResult, engine, models::ActivityStatus};
/// use tilth_core::templates::TemplateRegistry;
///
/// let registry = TemplateRegistry::builtin()?;
/// let mut schedule = engine::generate(&registry, "Wheat", date(2024, 1, 1))?;
/// schedule.id = Some(3);
/// engine::apply_activity_status(&mut schedule, "Sowing-0", ActivityStatus::Completed)?;
///
/// let output = ActivityUpdateResult {
///     schedule: &schedule,
///     activity_id: "Sowing-0",
/// }
/// .to_string();
/// assert!(output.contains("Activity `Sowing-0` in schedule 3 is now completed"));
/// assert!(output.contains("Progress: 6%"));
/// # Ok::<(), tilth_core::ScheduleError>(())
/// ```
pub struct ActivityUpdateResult<'a> {
    pub schedule: &'a Schedule,
    pub activity_id: &'a str,
}

impl fmt::Display for ActivityUpdateResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self
            .schedule
            .activity(self.activity_id)
            .map_or(ActivityStatus::Pending, |activity| activity.status);
        writeln!(
            f,
            "Activity `{}` in schedule {} is now {status}.",
            self.activity_id,
            self.schedule.id.unwrap_or_default()
        )?;
        writeln!(f)?;
        writeln!(f, "- Schedule status: {}", self.schedule.status)?;
        writeln!(f, "- Progress: {}%", progress(self.schedule))
    }
}

/// Confirmation for a deleted schedule.
pub struct DeleteResult {
    pub id: u64,
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted schedule {}.", self.id)
    }
}
