//! Schedule model definition and related functionality.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Activity, ActivityStatus, ScheduleStatus};

/// Activities of one stage, in template order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedStage {
    pub name: String,

    pub activities: Vec<Activity>,
}

/// A dated instantiation of a crop template for one planting.
///
/// The schedule owns copies of all stage and activity data; it never refers
/// back to the template it was generated from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Server-assigned identifier; `None` for unsaved previews
    pub id: Option<u64>,

    pub crop_name: String,

    /// Anchor date all offsets are resolved against
    pub start_date: Date,

    /// `start_date + duration.max_days`
    pub expected_harvest_date: Date,

    #[serde(default)]
    pub status: ScheduleStatus,

    #[serde(default)]
    pub stages: Vec<ResolvedStage>,
}

impl Schedule {
    /// Rebuilds the stage grouping from a flat activity list.
    ///
    /// Consecutive activities sharing a stage name form one stage, so the
    /// original stage order is kept.
    pub fn from_activities(
        id: Option<u64>,
        crop_name: String,
        start_date: Date,
        expected_harvest_date: Date,
        status: ScheduleStatus,
        activities: Vec<Activity>,
    ) -> Self {
        let mut stages: Vec<ResolvedStage> = Vec::new();
        for activity in activities {
            match stages.last_mut() {
                Some(stage) if stage.name == activity.stage_name => {
                    stage.activities.push(activity);
                }
                _ => stages.push(ResolvedStage {
                    name: activity.stage_name.clone(),
                    activities: vec![activity],
                }),
            }
        }

        Self {
            id,
            crop_name,
            start_date,
            expected_harvest_date,
            status,
            stages,
        }
    }

    /// Iterates over every activity in stage order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.stages.iter().flat_map(|stage| stage.activities.iter())
    }

    /// Looks up an activity by its identifier.
    pub fn activity(&self, activity_id: &str) -> Option<&Activity> {
        self.activities().find(|activity| activity.id == activity_id)
    }

    pub(crate) fn activity_mut(&mut self, activity_id: &str) -> Option<&mut Activity> {
        self.stages
            .iter_mut()
            .flat_map(|stage| stage.activities.iter_mut())
            .find(|activity| activity.id == activity_id)
    }

    /// Total number of activities in every status.
    pub fn activity_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.activities.len()).sum()
    }

    /// Number of activities with the given status.
    pub fn count_with_status(&self, status: ActivityStatus) -> usize {
        self.activities()
            .filter(|activity| activity.status == status)
            .count()
    }
}
