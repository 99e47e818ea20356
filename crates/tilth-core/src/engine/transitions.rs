//! Activity and schedule status transitions.
//!
//! Activity moves permitted:
//!
//! ```text
//! Pending ⇄ Completed
//! Pending → Skipped        (terminal)
//! ```
//!
//! Re-applying the current status is accepted as a no-op. A schedule becomes
//! `Completed` only when every activity is `Completed`, so a completed
//! schedule always reads 100% progress.

use crate::{
    error::{Result, ScheduleError},
    models::{ActivityStatus, Schedule, ScheduleStatus},
};

impl ActivityStatus {
    /// Whether an activity in this status may move to `next`.
    pub fn can_transition_to(self, next: ActivityStatus) -> bool {
        use ActivityStatus::*;

        match (self, next) {
            (Pending, Pending) | (Completed, Completed) | (Skipped, Skipped) => true,
            (Pending, Completed) | (Completed, Pending) | (Pending, Skipped) => true,
            (Completed, Skipped) | (Skipped, Pending) | (Skipped, Completed) => false,
        }
    }
}

impl ScheduleStatus {
    /// Whether the schedule still accepts activity changes.
    pub fn is_open(self) -> bool {
        match self {
            ScheduleStatus::Planning | ScheduleStatus::Active | ScheduleStatus::Completed => true,
            ScheduleStatus::Cancelled => false,
        }
    }
}

/// Derives the schedule status after an activity change.
pub fn reconcile_status(current: ScheduleStatus, total: usize, completed: usize) -> ScheduleStatus {
    match current {
        ScheduleStatus::Cancelled => ScheduleStatus::Cancelled,
        _ if total > 0 && completed == total => ScheduleStatus::Completed,
        ScheduleStatus::Completed => ScheduleStatus::Active,
        ScheduleStatus::Planning if completed > 0 => ScheduleStatus::Active,
        other => other,
    }
}

/// Validates an explicit schedule status change.
///
/// `Cancelled` is terminal, and `Completed` may only be set once every
/// activity is completed.
pub fn check_schedule_transition(
    id: u64,
    current: ScheduleStatus,
    next: ScheduleStatus,
    total: usize,
    completed: usize,
) -> Result<()> {
    if current == next {
        return Ok(());
    }
    if !current.is_open() {
        return Err(ScheduleError::ScheduleClosed {
            id,
            status: current,
        });
    }
    if next == ScheduleStatus::Completed && completed < total {
        return Err(ScheduleError::invalid_input("status").with_reason(format!(
            "schedule {id} still has {} unfinished activities",
            total - completed
        )));
    }
    Ok(())
}

/// Applies an activity status change to a schedule in place.
///
/// Returns the activity's previous status. On error the schedule is left
/// untouched.
pub fn apply_activity_status(
    schedule: &mut Schedule,
    activity_id: &str,
    status: ActivityStatus,
) -> Result<ActivityStatus> {
    let schedule_id = schedule.id.unwrap_or_default();
    if !schedule.status.is_open() {
        return Err(ScheduleError::ScheduleClosed {
            id: schedule_id,
            status: schedule.status,
        });
    }

    let activity =
        schedule
            .activity_mut(activity_id)
            .ok_or_else(|| ScheduleError::ActivityNotFound {
                schedule_id,
                activity_id: activity_id.to_string(),
            })?;

    let previous = activity.status;
    if !previous.can_transition_to(status) {
        return Err(ScheduleError::InvalidTransition {
            activity_id: activity_id.to_string(),
            from: previous,
            to: status,
        });
    }
    activity.status = status;

    schedule.status = reconcile_status(
        schedule.status,
        schedule.activity_count(),
        schedule.count_with_status(ActivityStatus::Completed),
    );
    Ok(previous)
}
