//! Display implementations for domain models.
//!
//! Models render as markdown. Labels that depend on "today" are not part of
//! these implementations; see [`super::Timeline`] for that view.

use std::fmt;

use crate::{
    engine::progress,
    models::{Activity, ActivityStatus, Schedule, ScheduleStatus, ScheduleSummary, TemporalLabel},
};

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TemporalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- `{}` {} {} ({})",
            self.id,
            self.scheduled_date,
            self.task,
            self.status.with_icon()
        )
    }
}

impl Schedule {
    /// Header and metadata shared by every schedule view.
    pub(crate) fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => writeln!(f, "# {id}. {}", self.crop_name)?,
            None => writeln!(f, "# {} (preview)", self.crop_name)?,
        }
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Start: {}", self.start_date)?;
        writeln!(f, "- Expected harvest: {}", self.expected_harvest_date)?;
        writeln!(f, "- Progress: {}%", progress(self))
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_header(f)?;

        if self.stages.is_empty() {
            return writeln!(f, "\nNo activities in this schedule.");
        }

        for stage in &self.stages {
            writeln!(f, "\n## {}", stage.name)?;
            writeln!(f)?;
            for activity in &stage.activities {
                write!(f, "{activity}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) {}%",
            self.crop_name, self.id, self.progress_percentage
        )?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.status)?;
        writeln!(
            f,
            "- **Season**: {} → {}",
            self.start_date, self.expected_harvest_date
        )?;
        writeln!(f)
    }
}
