//! Upcoming activity selection for reminders.

use jiff::civil::Date;

use super::add_days;
use crate::models::{Activity, ActivityStatus, Schedule};

/// Default look-ahead window in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// An activity selected for reminding, with its relation to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingActivity<'a> {
    pub activity: &'a Activity,
    pub is_overdue: bool,
    pub is_today: bool,
}

/// Selects activities that are not completed and fall on or before
/// `today + horizon_days`, sorted by date.
///
/// Skipped activities are still selected; callers that want them hidden
/// filter on `activity.status`. Activities sharing a date keep their
/// timeline order.
pub fn upcoming(schedule: &Schedule, today: Date, horizon_days: u32) -> Vec<UpcomingActivity<'_>> {
    let limit = add_days(today, i64::from(horizon_days)).unwrap_or(Date::MAX);

    let mut selected: Vec<UpcomingActivity<'_>> = schedule
        .activities()
        .filter(|activity| match activity.status {
            ActivityStatus::Completed => false,
            ActivityStatus::Pending | ActivityStatus::Skipped => true,
        })
        .filter(|activity| activity.scheduled_date <= limit)
        .map(|activity| UpcomingActivity {
            activity,
            is_overdue: activity.scheduled_date < today,
            is_today: activity.scheduled_date == today,
        })
        .collect();

    selected.sort_by_key(|entry| entry.activity.scheduled_date);
    selected
}
