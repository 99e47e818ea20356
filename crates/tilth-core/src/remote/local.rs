//! In-process schedule service backed by SQLite.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use log::debug;
use tokio::task;

use super::ScheduleService;
use crate::{
    db::Database,
    engine::generate,
    error::{JoinResultExt, Result, ScheduleError},
    models::{Schedule, ScheduleStatus, ScheduleSummary},
    params::{CreateSchedule, PatchActivity, UpdateScheduleStatus},
    templates::TemplateRegistry,
};

/// Serves the schedule service contract from a local SQLite file.
///
/// Every call opens its own connection on the blocking pool, so the service
/// is cheap to share across tasks.
pub struct LocalScheduleService {
    db_path: PathBuf,
    registry: Arc<TemplateRegistry>,
}

impl LocalScheduleService {
    /// Opens (creating if needed) the database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::FileSystem` if the parent directory cannot be
    /// created, or `ScheduleError::Database` if schema setup fails.
    pub async fn open<P: AsRef<Path>>(db_path: P, registry: Arc<TemplateRegistry>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ScheduleError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(|_| ()))
            .await
            .join_context()?;

        debug!("Opened schedule database at {}", db_path.display());
        Ok(Self { db_path, registry })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .join_context()
    }
}

#[async_trait]
impl ScheduleService for LocalScheduleService {
    fn backend_tag(&self) -> &'static str {
        "sqlite"
    }

    async fn list_schedules(&self, status: Option<ScheduleStatus>) -> Result<Vec<ScheduleSummary>> {
        self.with_db(move |db| db.list_schedules(status)).await
    }

    async fn get_schedule(&self, id: u64) -> Result<Schedule> {
        self.with_db(move |db| db.get_schedule(id)?.ok_or(ScheduleError::ScheduleNotFound { id }))
            .await
    }

    async fn create_schedule(&self, params: &CreateSchedule) -> Result<Schedule> {
        let schedule = generate(&self.registry, &params.crop_name, params.start_date)?;
        self.with_db(move |db| db.insert_schedule(&schedule)).await
    }

    async fn patch_activity(&self, params: &PatchActivity) -> Result<Schedule> {
        let PatchActivity {
            schedule_id,
            activity_id,
            status,
        } = params.clone();
        self.with_db(move |db| db.update_activity_status(schedule_id, &activity_id, status))
            .await
    }

    async fn update_schedule_status(&self, params: &UpdateScheduleStatus) -> Result<Schedule> {
        let UpdateScheduleStatus { id, status } = *params;
        self.with_db(move |db| db.set_schedule_status(id, status))
            .await
    }

    async fn delete_schedule(&self, id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_schedule(id)).await
    }
}
