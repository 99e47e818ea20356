//! Date-relative views of schedules.
//!
//! These wrappers carry the evaluation date explicitly so labels are
//! recomputed every time they are rendered.

use std::fmt;

use jiff::civil::Date;

use crate::{
    engine::UpcomingActivity,
    models::{Schedule, TemporalLabel},
};

/// A schedule rendered with overdue/today/upcoming labels.
///
/// ```rust
/// use jiff::civil::date;
/// use tilth_core::{display::Timeline, engine, templates::TemplateRegistry};
///
/// let registry = TemplateRegistry::builtin()?;
/// let schedule = engine::generate(&registry, "Wheat", date(2024, 1, 1))?;
/// let output = Timeline::new(&schedule, date(2024, 1, 1)).to_string();
///
/// assert!(output.contains("## Land Preparation"));
/// assert!(output.contains("**overdue**"));
/// assert!(output.contains("**today**"));
/// # Ok::<(), tilth_core::ScheduleError>(())
/// ```
pub struct Timeline<'a> {
    pub schedule: &'a Schedule,
    pub today: Date,
}

impl<'a> Timeline<'a> {
    pub fn new(schedule: &'a Schedule, today: Date) -> Self {
        Self { schedule, today }
    }
}

impl fmt::Display for Timeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.schedule.fmt_header(f)?;

        if self.schedule.stages.is_empty() {
            return writeln!(f, "\nNo activities in this schedule.");
        }

        for stage in &self.schedule.stages {
            writeln!(f, "\n## {}", stage.name)?;
            writeln!(f)?;
            for activity in &stage.activities {
                let label = activity.label(self.today);
                let marker = match label {
                    TemporalLabel::Completed => "[x]",
                    TemporalLabel::Skipped => "[-]",
                    TemporalLabel::Overdue | TemporalLabel::Today | TemporalLabel::Upcoming => {
                        "[ ]"
                    }
                };
                writeln!(
                    f,
                    "- {marker} `{}` {} {} **{label}**",
                    activity.id, activity.scheduled_date, activity.task
                )?;
            }
        }
        Ok(())
    }
}

/// Reminder list produced by [`crate::engine::upcoming`].
pub struct Upcoming<'a>(pub &'a [UpcomingActivity<'a>]);

impl fmt::Display for Upcoming<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Nothing due in this window.");
        }

        for entry in self.0 {
            let when = if entry.is_overdue {
                " **overdue**"
            } else if entry.is_today {
                " **today**"
            } else {
                ""
            };
            writeln!(
                f,
                "- {} `{}` {} ({}){when}",
                entry.activity.scheduled_date,
                entry.activity.id,
                entry.activity.task,
                entry.activity.status
            )?;
        }
        Ok(())
    }
}
