//! Error types for the scheduling engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{ActivityStatus, ScheduleStatus};

/// Comprehensive error type for all schedule operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Generation was requested for a crop the registry does not know
    #[error("No crop template registered for '{crop}'")]
    UnknownCropTemplate { crop: String },
    /// The start date could not be parsed
    #[error("Invalid start date '{input}': {reason}")]
    InvalidStartDate { input: String, reason: String },
    /// A day offset pushed a date outside the supported calendar range
    #[error("Date arithmetic out of range: {message}")]
    DateOutOfRange { message: String },
    /// Schedule not found for the given ID
    #[error("Schedule with ID {id} not found")]
    ScheduleNotFound { id: u64 },
    /// Activity not found within the given schedule
    #[error("Activity '{activity_id}' not found in schedule {schedule_id}")]
    ActivityNotFound {
        schedule_id: u64,
        activity_id: String,
    },
    /// The requested activity status change is not a permitted transition
    #[error("Activity '{activity_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        activity_id: String,
        from: ActivityStatus,
        to: ActivityStatus,
    },
    /// The schedule no longer accepts changes
    #[error("Schedule {id} is {status} and cannot be modified")]
    ScheduleClosed { id: u64, status: ScheduleStatus },
    /// Another mutation of the same schedule is still in flight
    #[error("Schedule {id} has a pending change in flight")]
    ScheduleBusy { id: u64 },
    /// The caller abandoned the request before the response arrived
    #[error("Request was cancelled")]
    Cancelled,
    /// The remote service could not be reached
    #[error("Network failure: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// The remote service rejected the request
    #[error("Remote service error ({status}): {message}")]
    RemoteService { status: u16, message: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Malformed crop template configuration
    #[error("Template configuration error: {message}")]
    TemplateConfig { message: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A blocking database task panicked or was cancelled
    #[error("Background task failed: {source}")]
    TaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ScheduleError {
        ScheduleError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ScheduleError {
        ScheduleError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ScheduleError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a template configuration error.
    pub fn template_config(message: impl Into<String>) -> Self {
        Self::TemplateConfig {
            message: message.into(),
        }
    }

    /// Whether the failure came from the transport or the remote service.
    ///
    /// Callers own retry policy; the store never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RemoteService { .. })
    }

    /// Whether the error reports a missing schedule or activity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ScheduleNotFound { .. } | Self::ActivityNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ScheduleError::database(message).with_source(e))
    }
}

/// Extension trait for mapping tokio join failures of blocking tasks.
pub trait JoinResultExt<T> {
    /// Flatten a `spawn_blocking` join result into a schedule error.
    fn join_context(self) -> Result<T>;
}

impl<T> JoinResultExt<T> for std::result::Result<Result<T>, tokio::task::JoinError> {
    fn join_context(self) -> Result<T> {
        self.map_err(|source| ScheduleError::TaskFailed { source })?
    }
}

/// Result type alias for schedule operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
