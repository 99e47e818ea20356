//! Resolved activity model.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ActivityStatus;

/// One concrete, dated task instance belonging to a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Stable identifier derived from the stage name and position
    pub id: String,

    /// Name of the stage the activity belongs to
    pub stage_name: String,

    /// Task description
    pub task: String,

    /// Calendar day the task is due
    pub scheduled_date: Date,

    /// Current completion state
    pub status: ActivityStatus,
}

impl Activity {
    /// Builds the identifier of the `index`-th activity of a stage.
    ///
    /// Identity is only unique while stage names are unique within a crop
    /// template; the template registry refuses templates that repeat one.
    ///
    /// ```rust
    /// use tilth_core::models::Activity;
    ///
    /// assert_eq!(Activity::derive_id("Sowing", 2), "Sowing-2");
    /// ```
    pub fn derive_id(stage_name: &str, index: usize) -> String {
        format!("{stage_name}-{index}")
    }
}
