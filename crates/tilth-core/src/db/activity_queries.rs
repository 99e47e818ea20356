//! Activity queries and status updates.

use jiff::Timestamp;
use rusqlite::{params, Connection};

use super::schedule_queries::{load_schedule, parse_column};
use crate::{
    engine::apply_activity_status,
    error::{DatabaseResultExt, Result, ScheduleError},
    models::{Activity, ActivityStatus, Schedule},
};

const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (schedule_id, activity_id, stage_name, task, scheduled_date, status, position, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_ACTIVITIES_SQL: &str = "SELECT activity_id, stage_name, task, scheduled_date, status FROM activities WHERE schedule_id = ?1 ORDER BY position";
const UPDATE_ACTIVITY_STATUS_SQL: &str = "UPDATE activities SET status = ?1, updated_at = ?2 WHERE schedule_id = ?3 AND activity_id = ?4";
const UPDATE_SCHEDULE_STATUS_SQL: &str =
    "UPDATE schedules SET status = ?1, updated_at = ?2 WHERE id = ?3";

pub(super) fn insert_activities(
    connection: &Connection,
    schedule_id: u64,
    schedule: &Schedule,
    now: &str,
) -> Result<()> {
    let mut stmt = connection
        .prepare(INSERT_ACTIVITY_SQL)
        .db_context("Failed to prepare activity insert")?;

    for (position, activity) in schedule.activities().enumerate() {
        stmt.execute(params![
            schedule_id as i64,
            &activity.id,
            &activity.stage_name,
            &activity.task,
            activity.scheduled_date.to_string(),
            activity.status.as_str(),
            position as i64,
            now
        ])
        .db_context("Failed to insert activity")?;
    }
    Ok(())
}

pub(super) fn load_activities(connection: &Connection, schedule_id: u64) -> Result<Vec<Activity>> {
    let mut stmt = connection
        .prepare(SELECT_ACTIVITIES_SQL)
        .db_context("Failed to prepare query")?;

    let rows = stmt
        .query_map(params![schedule_id as i64], |row| {
            Ok(Activity {
                id: row.get(0)?,
                stage_name: row.get(1)?,
                task: row.get(2)?,
                scheduled_date: parse_column(row, 3)?,
                status: parse_column(row, 4)?,
            })
        })
        .db_context("Failed to query activities")?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read activity rows")
}

impl super::Database {
    /// Changes one activity's status and reconciles the schedule status, in a
    /// single transaction. Returns the updated schedule.
    pub fn update_activity_status(
        &mut self,
        schedule_id: u64,
        activity_id: &str,
        status: ActivityStatus,
    ) -> Result<Schedule> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut schedule = load_schedule(&tx, schedule_id)?
            .ok_or(ScheduleError::ScheduleNotFound { id: schedule_id })?;
        let schedule_status_before = schedule.status;
        let previous = apply_activity_status(&mut schedule, activity_id, status)?;

        let now = Timestamp::now().to_string();
        if previous != status {
            tx.execute(
                UPDATE_ACTIVITY_STATUS_SQL,
                params![status.as_str(), &now, schedule_id as i64, activity_id],
            )
            .db_context("Failed to update activity status")?;
        }
        if schedule.status != schedule_status_before {
            tx.execute(
                UPDATE_SCHEDULE_STATUS_SQL,
                params![schedule.status.as_str(), &now, schedule_id as i64],
            )
            .db_context("Failed to update schedule status")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(schedule)
    }
}
