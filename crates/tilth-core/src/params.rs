//! Parameter structures for schedule operations.
//!
//! These are interface-agnostic: the CLI builds them from clap arguments and
//! the HTTP client serializes some of them directly as request bodies
//! (camelCase, matching the remote schedule service).

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    engine::{parse_start_date, DEFAULT_HORIZON_DAYS},
    error::Result,
    models::{ActivityStatus, ScheduleStatus},
};

/// Generic parameters for operations requiring just a schedule ID.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Id {
    pub id: u64,
}

/// Parameters for generating or saving a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedule {
    /// Exact crop display name
    pub crop_name: String,
    /// Planting date all offsets are anchored to
    pub start_date: Date,
}

impl CreateSchedule {
    /// Builds parameters from user input, validating the date.
    pub fn parse(crop_name: impl Into<String>, start_date: &str) -> Result<Self> {
        Ok(Self {
            crop_name: crop_name.into(),
            start_date: parse_start_date(start_date)?,
        })
    }
}

/// Parameters for listing schedules.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListSchedules {
    /// Only return schedules in this status; `None` returns all
    pub status: Option<ScheduleStatus>,
}

/// Parameters for changing one activity's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchActivity {
    pub schedule_id: u64,
    pub activity_id: String,
    pub status: ActivityStatus,
}

/// Parameters for an explicit schedule status change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateScheduleStatus {
    pub id: u64,
    pub status: ScheduleStatus,
}

/// Parameters for the reminder view of a schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingActivities {
    pub schedule_id: u64,
    /// Look-ahead window in days, inclusive
    pub horizon_days: u32,
}

impl UpcomingActivities {
    /// Reminder parameters with the default seven-day horizon.
    pub fn new(schedule_id: u64) -> Self {
        Self {
            schedule_id,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}
