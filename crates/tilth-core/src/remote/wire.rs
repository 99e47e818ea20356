//! JSON documents exchanged with the remote schedule service.
//!
//! The service sends schedules with a flat activity list; stages are rebuilt
//! from consecutive `stageName` runs on the way in.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    engine::progress,
    models::{Activity, ActivityStatus, Schedule, ScheduleStatus},
};

/// One activity as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDocument {
    pub id: String,
    pub stage_name: String,
    pub activity_name: String,
    pub scheduled_date: Date,
    pub status: ActivityStatus,
}

/// A schedule as returned by get, create and patch calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    pub id: u64,
    pub crop_name: String,
    pub start_date: Date,
    pub expected_harvest_date: Date,
    pub status: ScheduleStatus,
    /// Sent by patch responses; recomputed locally, never trusted as state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<u8>,
    #[serde(default)]
    pub activities: Vec<ActivityDocument>,
}

/// Request body carrying only a status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusBody<S> {
    pub status: S,
}

impl From<ActivityDocument> for Activity {
    fn from(doc: ActivityDocument) -> Self {
        Self {
            id: doc.id,
            stage_name: doc.stage_name,
            task: doc.activity_name,
            scheduled_date: doc.scheduled_date,
            status: doc.status,
        }
    }
}

impl From<&Activity> for ActivityDocument {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            stage_name: activity.stage_name.clone(),
            activity_name: activity.task.clone(),
            scheduled_date: activity.scheduled_date,
            status: activity.status,
        }
    }
}

impl From<ScheduleDocument> for Schedule {
    fn from(doc: ScheduleDocument) -> Self {
        Schedule::from_activities(
            Some(doc.id),
            doc.crop_name,
            doc.start_date,
            doc.expected_harvest_date,
            doc.status,
            doc.activities.into_iter().map(Activity::from).collect(),
        )
    }
}

impl From<&Schedule> for ScheduleDocument {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id.unwrap_or_default(),
            crop_name: schedule.crop_name.clone(),
            start_date: schedule.start_date,
            expected_harvest_date: schedule.expected_harvest_date,
            status: schedule.status,
            progress_percentage: Some(progress(schedule)),
            activities: schedule.activities().map(ActivityDocument::from).collect(),
        }
    }
}
