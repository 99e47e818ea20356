//! Status enumerations for schedules and activities.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Generated or saved but no activity has been completed yet
    #[default]
    Planning,

    /// Work on the crop is underway
    Active,

    /// Every activity has been completed
    Completed,

    /// Abandoned by the farmer; no further changes are accepted
    Cancelled,
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(ScheduleStatus::Planning),
            "active" => Ok(ScheduleStatus::Active),
            "completed" => Ok(ScheduleStatus::Completed),
            "cancelled" | "canceled" => Ok(ScheduleStatus::Cancelled),
            _ => Err(format!("Invalid schedule status: {s}")),
        }
    }
}

impl ScheduleStatus {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Planning => "planning",
            ScheduleStatus::Active => "active",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

/// Completion state of a single activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    /// Not yet done
    #[default]
    Pending,

    /// Marked done by the farmer
    Completed,

    /// Deliberately left out
    Skipped,
}

impl FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ActivityStatus::Pending),
            "completed" | "done" => Ok(ActivityStatus::Completed),
            "skipped" => Ok(ActivityStatus::Skipped),
            _ => Err(format!("Invalid activity status: {s}")),
        }
    }
}

impl ActivityStatus {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Skipped => "skipped",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tilth_core::models::ActivityStatus;
    ///
    /// assert_eq!(ActivityStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(ActivityStatus::Skipped.with_icon(), "⊘ Skipped");
    /// assert_eq!(ActivityStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ActivityStatus::Completed => "✓ Completed",
            ActivityStatus::Skipped => "⊘ Skipped",
            ActivityStatus::Pending => "○ Pending",
        }
    }
}

/// Time-relative label derived from an activity's status and date.
///
/// Never stored: it depends on "today", which moves independently of the
/// activity.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemporalLabel {
    Completed,
    Skipped,
    Overdue,
    Today,
    Upcoming,
}

impl TemporalLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalLabel::Completed => "completed",
            TemporalLabel::Skipped => "skipped",
            TemporalLabel::Overdue => "overdue",
            TemporalLabel::Today => "today",
            TemporalLabel::Upcoming => "upcoming",
        }
    }
}
