//! Schedule summary types.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Schedule, ScheduleStatus};
use crate::engine::progress;

/// Compact listing entry for a saved schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub id: u64,
    pub crop_name: String,
    pub start_date: Date,
    pub expected_harvest_date: Date,
    pub status: ScheduleStatus,
    /// Completion percentage (0-100)
    pub progress_percentage: u8,
}

impl ScheduleSummary {
    /// Summarize a saved schedule. Previews have no ID and yield `None`.
    pub fn from_schedule(schedule: &Schedule) -> Option<Self> {
        Some(Self {
            id: schedule.id?,
            crop_name: schedule.crop_name.clone(),
            start_date: schedule.start_date,
            expected_harvest_date: schedule.expected_harvest_date,
            status: schedule.status,
            progress_percentage: progress(schedule),
        })
    }
}
