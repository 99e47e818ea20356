//! Schedule generation from crop templates.

use jiff::{civil::Date, Span};

use crate::{
    error::{Result, ScheduleError},
    models::{Activity, ActivityStatus, CropTemplate, ResolvedStage, Schedule, ScheduleStatus},
    templates::TemplateRegistry,
};

/// Generates an unsaved schedule for `crop_name` anchored at `start_date`.
///
/// Fails with [`ScheduleError::UnknownCropTemplate`] when the registry has no
/// template for the exact crop name; no default template is substituted.
pub fn generate(registry: &TemplateRegistry, crop_name: &str, start_date: Date) -> Result<Schedule> {
    let template = registry.lookup(crop_name)?;
    resolve(template, start_date)
}

/// Resolves a template into a dated schedule.
///
/// Every activity lands on `start_date + stage.day_offset +
/// activity.day_offset_within_stage`. Negative offsets are kept as-is (nursery
/// and land preparation work happens before the nominal start). Stages
/// without tasks contribute no activities and are left out of the timeline.
/// The template is only read; the schedule owns copies of everything.
pub fn resolve(template: &CropTemplate, start_date: Date) -> Result<Schedule> {
    let mut stages = Vec::with_capacity(template.stages.len());
    for stage in &template.stages {
        if stage.activities.is_empty() {
            continue;
        }

        let activities = stage
            .activities
            .iter()
            .enumerate()
            .map(|(index, task)| {
                let offset =
                    i64::from(stage.day_offset) + i64::from(task.day_offset_within_stage);
                Ok(Activity {
                    id: Activity::derive_id(&stage.name, index),
                    stage_name: stage.name.clone(),
                    task: task.task.clone(),
                    scheduled_date: add_days(start_date, offset)?,
                    status: ActivityStatus::Pending,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        stages.push(ResolvedStage {
            name: stage.name.clone(),
            activities,
        });
    }

    Ok(Schedule {
        id: None,
        crop_name: template.crop_name.clone(),
        start_date,
        expected_harvest_date: add_days(start_date, i64::from(template.duration.max_days))?,
        status: ScheduleStatus::Planning,
        stages,
    })
}

/// Adds a (possibly negative) number of calendar days to a date.
pub fn add_days(date: Date, days: i64) -> Result<Date> {
    let out_of_range = |e: jiff::Error| ScheduleError::DateOutOfRange {
        message: format!("{date} {days:+} days: {e}"),
    };
    let span = Span::new().try_days(days).map_err(out_of_range)?;
    date.checked_add(span).map_err(out_of_range)
}

/// Parses an ISO `YYYY-MM-DD` start date.
pub fn parse_start_date(input: &str) -> Result<Date> {
    input
        .trim()
        .parse::<Date>()
        .map_err(|e| ScheduleError::InvalidStartDate {
            input: input.to_string(),
            reason: e.to_string(),
        })
}
