use std::sync::Arc;

use jiff::civil::{date, Date};
use tempfile::TempDir;
use tilth_core::{
    engine, Database, LocalScheduleService, Schedule, ScheduleStore, StoreBuilder,
    TemplateRegistry,
};

/// The planting date used by most scenarios.
pub const WHEAT_START: Date = date(2024, 1, 1);

/// Helper function to create a test store backed by a temporary database
#[allow(dead_code)]
pub async fn create_test_store() -> (TempDir, ScheduleStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// Helper function to open the local service directly
#[allow(dead_code)]
pub async fn create_test_service() -> (TempDir, LocalScheduleService) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = Arc::new(TemplateRegistry::builtin().expect("Built-in templates load"));
    let service = LocalScheduleService::open(temp_dir.path().join("test.db"), registry)
        .await
        .expect("Failed to open service");
    (temp_dir, service)
}

/// Helper function to create a temporary database for testing
#[allow(dead_code)]
pub fn create_test_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::new(temp_dir.path().join("test.db")).expect("Failed to create database");
    (temp_dir, db)
}

/// Generates an unsaved schedule from the built-in templates
#[allow(dead_code)]
pub fn generated(crop_name: &str, start_date: Date) -> Schedule {
    let registry = TemplateRegistry::builtin().expect("Built-in templates load");
    engine::generate(&registry, crop_name, start_date).expect("Crop is built in")
}
