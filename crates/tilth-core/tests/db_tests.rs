mod common;

use common::{create_test_db, generated, WHEAT_START};
use jiff::civil::date;
use tilth_core::{ActivityStatus, ScheduleError, ScheduleStatus};

#[test]
fn test_database_initialization() {
    let (temp_dir, _db) = create_test_db();
    assert!(temp_dir.path().join("test.db").exists());
}

#[test]
fn test_reopen_keeps_data() {
    let (temp_dir, mut db) = create_test_db();
    let saved = db
        .insert_schedule(&generated("Rice", date(2024, 6, 15)))
        .expect("Failed to insert schedule");
    drop(db);

    let reopened = tilth_core::Database::new(temp_dir.path().join("test.db"))
        .expect("Failed to reopen database");
    let loaded = reopened
        .get_schedule(saved.id.unwrap())
        .expect("Failed to get schedule")
        .expect("Schedule should exist");
    assert_eq!(loaded, saved);
}

#[test]
fn test_insert_schedule_assigns_id() {
    let (_temp_dir, mut db) = create_test_db();

    let first = db
        .insert_schedule(&generated("Wheat", WHEAT_START))
        .expect("Failed to insert schedule");
    let second = db
        .insert_schedule(&generated("Maize", WHEAT_START))
        .expect("Failed to insert schedule");

    assert!(first.id.unwrap() > 0);
    assert!(second.id.unwrap() > first.id.unwrap());
    assert_eq!(first.status, ScheduleStatus::Planning);
}

#[test]
fn test_get_schedule_round_trips_activities() {
    let (_temp_dir, mut db) = create_test_db();
    let schedule = generated("Wheat", WHEAT_START);

    let saved = db.insert_schedule(&schedule).expect("Failed to insert schedule");
    let loaded = db
        .get_schedule(saved.id.unwrap())
        .expect("Failed to get schedule")
        .expect("Schedule should exist");

    assert_eq!(loaded, saved);
    assert_eq!(loaded.stages, schedule.stages);
    assert_eq!(
        loaded.activity("Land Preparation-0").unwrap().scheduled_date,
        date(2023, 12, 17)
    );
}

#[test]
fn test_get_missing_schedule() {
    let (_temp_dir, db) = create_test_db();
    assert!(db.get_schedule(99).expect("Query should succeed").is_none());
}

#[test]
fn test_list_schedules_newest_first_with_filter() {
    let (_temp_dir, mut db) = create_test_db();
    let wheat = db.insert_schedule(&generated("Wheat", WHEAT_START)).unwrap();
    let rice = db.insert_schedule(&generated("Rice", WHEAT_START)).unwrap();

    db.update_activity_status(wheat.id.unwrap(), "Sowing-0", ActivityStatus::Completed)
        .unwrap();

    let all = db.list_schedules(None).unwrap();
    let ids: Vec<_> = all.iter().map(|s| Some(s.id)).collect();
    assert_eq!(ids, vec![rice.id, wheat.id]);

    let active = db.list_schedules(Some(ScheduleStatus::Active)).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].crop_name, "Wheat");
    assert_eq!(active[0].progress_percentage, 6);

    let planning = db.list_schedules(Some(ScheduleStatus::Planning)).unwrap();
    assert_eq!(planning.len(), 1);
    assert_eq!(planning[0].progress_percentage, 0);
}

#[test]
fn test_update_activity_status_reconciles_schedule() {
    let (_temp_dir, mut db) = create_test_db();
    let saved = db.insert_schedule(&generated("Wheat", WHEAT_START)).unwrap();
    let id = saved.id.unwrap();

    let updated = db
        .update_activity_status(id, "Sowing-0", ActivityStatus::Completed)
        .expect("Failed to update activity");
    assert_eq!(updated.status, ScheduleStatus::Active);

    let reverted = db
        .update_activity_status(id, "Sowing-0", ActivityStatus::Pending)
        .expect("Failed to revert activity");
    assert_eq!(
        reverted.activity("Sowing-0").unwrap().status,
        ActivityStatus::Pending
    );
    // Reverting never moves a schedule back to planning.
    assert_eq!(reverted.status, ScheduleStatus::Active);

    let stored = db.get_schedule(id).unwrap().unwrap();
    assert_eq!(stored, reverted);
}

#[test]
fn test_completing_every_activity_completes_schedule() {
    let (_temp_dir, mut db) = create_test_db();
    let saved = db.insert_schedule(&generated("Wheat", WHEAT_START)).unwrap();
    let id = saved.id.unwrap();

    let ids: Vec<String> = saved.activities().map(|a| a.id.clone()).collect();
    let mut last = saved;
    for activity_id in &ids {
        last = db
            .update_activity_status(id, activity_id, ActivityStatus::Completed)
            .unwrap();
    }
    assert_eq!(last.status, ScheduleStatus::Completed);
    assert_eq!(db.list_schedules(None).unwrap()[0].progress_percentage, 100);

    let reopened = db
        .update_activity_status(id, &ids[0], ActivityStatus::Pending)
        .unwrap();
    assert_eq!(reopened.status, ScheduleStatus::Active);
}

#[test]
fn test_invalid_activity_updates_leave_rows_untouched() {
    let (_temp_dir, mut db) = create_test_db();
    let saved = db.insert_schedule(&generated("Wheat", WHEAT_START)).unwrap();
    let id = saved.id.unwrap();

    db.update_activity_status(id, "Sowing-0", ActivityStatus::Skipped)
        .unwrap();

    assert!(matches!(
        db.update_activity_status(id, "Sowing-0", ActivityStatus::Completed),
        Err(ScheduleError::InvalidTransition { .. })
    ));
    assert!(matches!(
        db.update_activity_status(id, "Sowing-99", ActivityStatus::Completed),
        Err(ScheduleError::ActivityNotFound { .. })
    ));
    assert!(matches!(
        db.update_activity_status(404, "Sowing-0", ActivityStatus::Completed),
        Err(ScheduleError::ScheduleNotFound { id: 404 })
    ));

    let stored = db.get_schedule(id).unwrap().unwrap();
    assert_eq!(
        stored.activity("Sowing-0").unwrap().status,
        ActivityStatus::Skipped
    );
    assert_eq!(stored.status, ScheduleStatus::Planning);
}

#[test]
fn test_set_schedule_status() {
    let (_temp_dir, mut db) = create_test_db();
    let id = db
        .insert_schedule(&generated("Potato", WHEAT_START))
        .unwrap()
        .id
        .unwrap();

    assert!(matches!(
        db.set_schedule_status(id, ScheduleStatus::Completed),
        Err(ScheduleError::InvalidInput { .. })
    ));

    let active = db.set_schedule_status(id, ScheduleStatus::Active).unwrap();
    assert_eq!(active.status, ScheduleStatus::Active);

    let cancelled = db
        .set_schedule_status(id, ScheduleStatus::Cancelled)
        .unwrap();
    assert_eq!(cancelled.status, ScheduleStatus::Cancelled);

    assert!(matches!(
        db.set_schedule_status(id, ScheduleStatus::Active),
        Err(ScheduleError::ScheduleClosed { .. })
    ));
    assert!(matches!(
        db.update_activity_status(id, "Planting-0", ActivityStatus::Completed),
        Err(ScheduleError::ScheduleClosed { .. })
    ));
}

#[test]
fn test_delete_schedule_cascades() {
    let (_temp_dir, mut db) = create_test_db();
    let keep = db.insert_schedule(&generated("Tomato", WHEAT_START)).unwrap();
    let gone = db.insert_schedule(&generated("Wheat", WHEAT_START)).unwrap();

    db.delete_schedule(gone.id.unwrap())
        .expect("Failed to delete schedule");

    assert!(db.get_schedule(gone.id.unwrap()).unwrap().is_none());
    let remaining = db.list_schedules(None).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(Some(remaining[0].id), keep.id);

    assert!(matches!(
        db.delete_schedule(gone.id.unwrap()),
        Err(ScheduleError::ScheduleNotFound { .. })
    ));
}
