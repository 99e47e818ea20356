//! Schedule CRUD operations and queries.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    engine::{check_schedule_transition, completion_percentage},
    error::{DatabaseResultExt, Result, ScheduleError},
    models::{ActivityStatus, Schedule, ScheduleStatus, ScheduleSummary},
};

const INSERT_SCHEDULE_SQL: &str = "INSERT INTO schedules (crop_name, start_date, expected_harvest_date, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_SCHEDULE_SQL: &str = "SELECT id, crop_name, start_date, expected_harvest_date, status FROM schedules WHERE id = ?1";
const UPDATE_SCHEDULE_STATUS_SQL: &str =
    "UPDATE schedules SET status = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_SCHEDULE_SQL: &str = "DELETE FROM schedules WHERE id = ?1";
const LIST_SUMMARIES_SQL: &str = "SELECT id, crop_name, start_date, expected_harvest_date, status, total_activities, completed_activities FROM schedule_summaries WHERE (?1 IS NULL OR status = ?1) ORDER BY created_at DESC, id DESC";

/// Parses a text column into any `FromStr` value, reporting the column on
/// failure.
pub(super) fn parse_column<T>(row: &rusqlite::Row, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("Invalid value '{raw}': {e}").into(),
        )
    })
}

/// Loads a schedule with all of its activities.
pub(super) fn load_schedule(connection: &Connection, id: u64) -> Result<Option<Schedule>> {
    let header = connection
        .query_row(SELECT_SCHEDULE_SQL, params![id as i64], |row| {
            Ok((
                row.get::<_, i64>(0)? as u64,
                row.get::<_, String>(1)?,
                parse_column::<Date>(row, 2)?,
                parse_column::<Date>(row, 3)?,
                parse_column::<ScheduleStatus>(row, 4)?,
            ))
        })
        .optional()
        .db_context("Failed to query schedule")?;

    let Some((id, crop_name, start_date, expected_harvest_date, status)) = header else {
        return Ok(None);
    };

    let activities = super::activity_queries::load_activities(connection, id)?;
    Ok(Some(Schedule::from_activities(
        Some(id),
        crop_name,
        start_date,
        expected_harvest_date,
        status,
        activities,
    )))
}

impl super::Database {
    /// Persists a generated schedule and its activities, returning the saved
    /// copy with its assigned ID.
    pub fn insert_schedule(&mut self, schedule: &Schedule) -> Result<Schedule> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        tx.execute(
            INSERT_SCHEDULE_SQL,
            params![
                &schedule.crop_name,
                schedule.start_date.to_string(),
                schedule.expected_harvest_date.to_string(),
                schedule.status.as_str(),
                &now,
                &now
            ],
        )
        .db_context("Failed to insert schedule")?;

        let id = tx.last_insert_rowid() as u64;
        super::activity_queries::insert_activities(&tx, id, schedule, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        let mut saved = schedule.clone();
        saved.id = Some(id);
        Ok(saved)
    }

    /// Retrieves a schedule by its ID.
    pub fn get_schedule(&self, id: u64) -> Result<Option<Schedule>> {
        load_schedule(&self.connection, id)
    }

    /// Lists schedule summaries, newest first, optionally filtered by status.
    pub fn list_schedules(&self, status: Option<ScheduleStatus>) -> Result<Vec<ScheduleSummary>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![status.map(|s| s.as_str())], |row| {
                let total: i64 = row.get(5)?;
                let completed: i64 = row.get(6)?;
                Ok(ScheduleSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    crop_name: row.get(1)?,
                    start_date: parse_column(row, 2)?,
                    expected_harvest_date: parse_column(row, 3)?,
                    status: parse_column(row, 4)?,
                    progress_percentage: completion_percentage(completed as usize, total as usize),
                })
            })
            .db_context("Failed to query schedules")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read schedule rows")
    }

    /// Explicitly changes a schedule's status.
    pub fn set_schedule_status(&mut self, id: u64, status: ScheduleStatus) -> Result<Schedule> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut schedule =
            load_schedule(&tx, id)?.ok_or(ScheduleError::ScheduleNotFound { id })?;
        check_schedule_transition(
            id,
            schedule.status,
            status,
            schedule.activity_count(),
            schedule.count_with_status(ActivityStatus::Completed),
        )?;

        if schedule.status != status {
            tx.execute(
                UPDATE_SCHEDULE_STATUS_SQL,
                params![status.as_str(), Timestamp::now().to_string(), id as i64],
            )
            .db_context("Failed to update schedule status")?;
            schedule.status = status;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(schedule)
    }

    /// Permanently deletes a schedule and all its activities.
    pub fn delete_schedule(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows_affected = tx
            .execute(DELETE_SCHEDULE_SQL, params![id as i64])
            .db_context("Failed to delete schedule")?;
        if rows_affected == 0 {
            return Err(ScheduleError::ScheduleNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")
    }
}
