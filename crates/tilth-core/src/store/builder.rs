//! Builder for creating and configuring ScheduleStore instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::info;

use super::ScheduleStore;
use crate::{
    error::{Result, ScheduleError},
    remote::{HttpScheduleService, LocalScheduleService, ScheduleService},
    templates::TemplateRegistry,
};

/// Builder for creating and configuring ScheduleStore instances.
///
/// With a remote URL the store talks HTTP to that service; otherwise it uses
/// the embedded SQLite service.
#[derive(Clone, Default)]
pub struct StoreBuilder {
    database_path: Option<PathBuf>,
    remote_url: Option<String>,
    timeout: Option<Duration>,
    templates_path: Option<PathBuf>,
    registry: Option<Arc<TemplateRegistry>>,
    service: Option<Arc<dyn ScheduleService>>,
    optimistic: bool,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path for the embedded service.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tilth/tilth.db` or `~/.local/share/tilth/tilth.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Talks to a remote schedule service instead of the embedded one.
    pub fn with_remote_url(mut self, url: Option<impl Into<String>>) -> Self {
        if let Some(url) = url {
            self.remote_url = Some(url.into());
        }
        self
    }

    /// Request timeout for the remote service.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if timeout.is_some() {
            self.timeout = timeout;
        }
        self
    }

    /// Loads crop templates from a JSON file instead of the built-in set.
    pub fn with_templates_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.templates_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Injects an already loaded registry. Takes precedence over
    /// `with_templates_path`.
    pub fn with_registry(mut self, registry: Arc<TemplateRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Injects a service implementation. Takes precedence over the remote URL
    /// and database settings.
    pub fn with_service(mut self, service: Arc<dyn ScheduleService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_optimistic_updates(mut self, enabled: bool) -> Self {
        self.optimistic = enabled;
        self
    }

    /// Builds the configured store.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::TemplateConfig` or `ScheduleError::FileSystem`
    /// if templates cannot be loaded, `ScheduleError::Configuration` for a bad
    /// remote URL, and `ScheduleError::Database` if the embedded database
    /// cannot be initialized
    pub async fn build(self) -> Result<ScheduleStore> {
        let registry = match (self.registry, self.templates_path) {
            (Some(registry), _) => registry,
            (None, Some(path)) => Arc::new(TemplateRegistry::from_path(path)?),
            (None, None) => Arc::new(TemplateRegistry::builtin()?),
        };

        let service: Arc<dyn ScheduleService> = match (self.service, self.remote_url) {
            (Some(service), _) => service,
            (None, Some(url)) => Arc::new(HttpScheduleService::new(&url, self.timeout)?),
            (None, None) => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                let local = LocalScheduleService::open(db_path, Arc::clone(&registry)).await?;
                info!("Using schedule database at {}", local.db_path().display());
                Arc::new(local)
            }
        };

        info!(
            "Schedule store ready ({} backend, {} crop templates)",
            service.backend_tag(),
            registry.len()
        );
        Ok(ScheduleStore::new(service, registry).with_optimistic_updates(self.optimistic))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tilth")
            .place_data_file("tilth.db")
            .map_err(|e| ScheduleError::XdgDirectory(e.to_string()))
    }
}
