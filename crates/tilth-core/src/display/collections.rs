//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::{models::ScheduleSummary, templates::TemplateRegistry};

/// Newtype wrapper for displaying schedule listings.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use tilth_core::{
///     display::ScheduleSummaries,
///     models::{ScheduleStatus, ScheduleSummary},
/// };
///
/// let summary = ScheduleSummary {
///     id: 1,
///     crop_name: "Wheat".to_string(),
///     start_date: date(2024, 1, 1),
///     expected_harvest_date: date(2024, 5, 30),
///     status: ScheduleStatus::Active,
///     progress_percentage: 40,
/// };
///
/// let output = ScheduleSummaries(vec![summary]).to_string();
/// assert!(output.contains("## Wheat (ID: 1) 40%"));
/// assert_eq!(ScheduleSummaries(vec![]).to_string(), "No schedules found.\n");
/// ```
pub struct ScheduleSummaries(pub Vec<ScheduleSummary>);

impl fmt::Display for ScheduleSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No schedules found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Supported crops with their durations and stage names.
pub struct CropList<'a>(pub &'a TemplateRegistry);

impl fmt::Display for CropList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No crop templates loaded.");
        }

        for template in self.0.iter() {
            writeln!(
                f,
                "- **{}**: {}-{} days, {} activities",
                template.crop_name,
                template.duration.min_days,
                template.duration.max_days,
                template.activity_count()
            )?;
            let stages: Vec<&str> = template.stages.iter().map(|s| s.name.as_str()).collect();
            writeln!(f, "  - {}", stages.join(" → "))?;
        }
        Ok(())
    }
}
