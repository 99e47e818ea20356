//! Time-relative activity labels.

use std::cmp::Ordering;

use jiff::{civil::Date, Zoned};

use crate::models::{Activity, ActivityStatus, TemporalLabel};

/// Labels an activity relative to `today`.
///
/// Completed and skipped activities keep their label regardless of the date.
/// Pending ones compare calendar days only: earlier is overdue, equal is
/// today, later is upcoming.
///
/// ```rust
/// use jiff::civil::date;
/// use tilth_core::{engine::classify, models::{ActivityStatus, TemporalLabel}};
///
/// let today = date(2024, 3, 10);
/// assert_eq!(classify(ActivityStatus::Pending, date(2024, 3, 9), today), TemporalLabel::Overdue);
/// assert_eq!(classify(ActivityStatus::Skipped, date(2024, 3, 9), today), TemporalLabel::Skipped);
/// ```
pub fn classify(status: ActivityStatus, scheduled_date: Date, today: Date) -> TemporalLabel {
    match status {
        ActivityStatus::Completed => TemporalLabel::Completed,
        ActivityStatus::Skipped => TemporalLabel::Skipped,
        ActivityStatus::Pending => match scheduled_date.cmp(&today) {
            Ordering::Less => TemporalLabel::Overdue,
            Ordering::Equal => TemporalLabel::Today,
            Ordering::Greater => TemporalLabel::Upcoming,
        },
    }
}

/// The current calendar day in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

impl Activity {
    /// Label of this activity as of `today`.
    pub fn label(&self, today: Date) -> TemporalLabel {
        classify(self.status, self.scheduled_date, today)
    }
}
