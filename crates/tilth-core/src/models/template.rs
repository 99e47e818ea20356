//! Crop template definitions.
//!
//! Templates are read-only agronomic data: stage and task offsets relative to
//! a planting date. They deserialize directly from the template configuration
//! format (`{duration: {min, max}, stages: [{name, dayOffset, duration,
//! activities: [{task, day}]}]}`).

use serde::{Deserialize, Serialize};

/// Expected crop duration in days, from planting to harvest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationRange {
    #[serde(rename = "min")]
    pub min_days: u32,

    #[serde(rename = "max")]
    pub max_days: u32,
}

/// A single task within a stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityTemplate {
    /// Task description shown to the farmer
    pub task: String,

    /// Day offset relative to the stage start (may be negative)
    #[serde(rename = "day")]
    pub day_offset_within_stage: i32,
}

/// A named phase of cultivation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stage {
    pub name: String,

    /// Day offset of the stage start relative to the planting date
    #[serde(rename = "dayOffset")]
    pub day_offset: i32,

    #[serde(rename = "duration")]
    pub duration_days: u32,

    #[serde(default)]
    pub activities: Vec<ActivityTemplate>,
}

/// Complete growth-stage template for one crop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropTemplate {
    /// Exact display name; filled from the configuration key
    #[serde(skip)]
    pub crop_name: String,

    pub duration: DurationRange,

    pub stages: Vec<Stage>,
}

impl CropTemplate {
    /// Total number of activities across all stages.
    pub fn activity_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.activities.len()).sum()
    }
}
