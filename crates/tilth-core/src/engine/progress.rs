//! Schedule completion percentage.

use crate::models::{ActivityStatus, Schedule};

/// Percentage of activities completed, rounded half up.
///
/// Skipped activities count toward the total but never as completed. An empty
/// schedule reports 0.
pub fn progress(schedule: &Schedule) -> u8 {
    let mut total = 0;
    let mut completed = 0;
    for activity in schedule.activities() {
        total += 1;
        match activity.status {
            ActivityStatus::Completed => completed += 1,
            ActivityStatus::Pending | ActivityStatus::Skipped => {}
        }
    }
    completion_percentage(completed, total)
}

/// `round(100 * completed / total)`, or 0 when `total` is 0.
///
/// ```rust
/// use tilth_core::engine::completion_percentage;
///
/// assert_eq!(completion_percentage(1, 10), 10);
/// assert_eq!(completion_percentage(1, 8), 13);
/// assert_eq!(completion_percentage(0, 0), 0);
/// ```
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((completed * 200 + total) / (total * 2)) as u8
}
