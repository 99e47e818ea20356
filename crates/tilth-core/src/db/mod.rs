//! SQLite persistence for schedules and activities.
//!
//! This is the authoritative store behind
//! [`LocalScheduleService`](crate::remote::LocalScheduleService). It resolves
//! nothing itself: callers hand it schedules produced by the generator and
//! status changes already validated by the engine's transition rules.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod activity_queries;
pub mod migrations;
pub mod schedule_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
