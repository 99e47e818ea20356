//! Tests for the pure scheduling engine.

use jiff::civil::{date, Date};

use super::*;
use crate::{
    error::ScheduleError,
    models::{
        Activity, ActivityStatus, ActivityTemplate, CropTemplate, DurationRange, Schedule,
        ScheduleStatus, Stage, TemporalLabel,
    },
    templates::TemplateRegistry,
};

fn builtin() -> TemplateRegistry {
    TemplateRegistry::builtin().expect("Built-in templates should parse")
}

/// A fabricated single-stage crop with `count` activities spread one day apart.
fn synthetic_registry(count: usize) -> TemplateRegistry {
    let activities = (0..count)
        .map(|day| ActivityTemplate {
            task: format!("Task {day}"),
            day_offset_within_stage: day as i32,
        })
        .collect();
    TemplateRegistry::from_templates([CropTemplate {
        crop_name: "Testcrop".to_string(),
        duration: DurationRange {
            min_days: 10,
            max_days: 20,
        },
        stages: vec![Stage {
            name: "Only".to_string(),
            day_offset: 0,
            duration_days: 20,
            activities,
        }],
    }])
    .expect("Synthetic template should be valid")
}

fn first_in_stage<'a>(schedule: &'a Schedule, stage: &str) -> &'a Activity {
    schedule
        .activities()
        .find(|activity| activity.stage_name == stage)
        .unwrap_or_else(|| panic!("Stage {stage} should have activities"))
}

fn set_status(schedule: &mut Schedule, activity_id: &str, status: ActivityStatus) {
    apply_activity_status(schedule, activity_id, status).expect("Transition should be allowed");
}

#[test]
fn test_wheat_scenario_dates() {
    let schedule = generate(&builtin(), "Wheat", date(2024, 1, 1)).expect("Wheat should generate");

    assert_eq!(
        first_in_stage(&schedule, "Land Preparation").scheduled_date,
        date(2023, 12, 17)
    );
    assert_eq!(first_in_stage(&schedule, "Sowing").scheduled_date, date(2024, 1, 1));
    assert_eq!(
        first_in_stage(&schedule, "Harvesting").scheduled_date,
        date(2024, 4, 30)
    );
    assert_eq!(schedule.expected_harvest_date, date(2024, 5, 30));
    assert_eq!(schedule.status, ScheduleStatus::Planning);
    assert_eq!(schedule.id, None);
}

#[test]
fn test_every_activity_date_matches_offsets() {
    let registry = builtin();
    let starts = [date(2024, 1, 1), date(2023, 2, 28), date(2024, 2, 29), date(2025, 12, 31)];

    for template in registry.iter() {
        for start in starts {
            let schedule = resolve(template, start).expect("Template should resolve");
            let resolved: Vec<&Activity> = schedule.activities().collect();
            assert_eq!(resolved.len(), template.activity_count());

            let mut expected = Vec::new();
            for stage in &template.stages {
                for (index, task) in stage.activities.iter().enumerate() {
                    let offset = i64::from(stage.day_offset + task.day_offset_within_stage);
                    expected.push((
                        Activity::derive_id(&stage.name, index),
                        start.checked_add(jiff::Span::new().days(offset)).unwrap(),
                    ));
                }
            }

            for (activity, (id, scheduled)) in resolved.iter().zip(&expected) {
                assert_eq!(&activity.id, id);
                assert_eq!(activity.scheduled_date, *scheduled);
                assert_eq!(activity.status, ActivityStatus::Pending);
            }

            let max_days = i64::from(template.duration.max_days);
            assert_eq!(
                schedule.expected_harvest_date,
                start.checked_add(jiff::Span::new().days(max_days)).unwrap()
            );
        }
    }
}

#[test]
fn test_generate_is_deterministic() {
    let registry = builtin();
    let first = generate(&registry, "Rice", date(2024, 6, 15)).unwrap();
    let second = generate(&registry, "Rice", date(2024, 6, 15)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_negative_offsets_are_not_clamped() {
    let schedule = generate(&builtin(), "Rice", date(2024, 6, 15)).unwrap();

    let nursery = first_in_stage(&schedule, "Nursery");
    assert_eq!(nursery.scheduled_date, date(2024, 5, 21));

    // Stage offset 10 with a task at day -7 lands three days after start.
    let herbicide = schedule.activity("Vegetative Growth-0").unwrap();
    assert_eq!(herbicide.scheduled_date, date(2024, 6, 18));
}

#[test]
fn test_generate_unknown_crop() {
    match generate(&builtin(), "Quinoa", date(2024, 1, 1)) {
        Err(ScheduleError::UnknownCropTemplate { crop }) => assert_eq!(crop, "Quinoa"),
        other => panic!("Expected UnknownCropTemplate, got {other:?}"),
    }
}

#[test]
fn test_generate_does_not_touch_template() {
    let registry = builtin();
    let before = registry.lookup("Maize").unwrap().clone();

    let mut schedule = generate(&registry, "Maize", date(2024, 3, 1)).unwrap();
    schedule.stages[0].name = "Changed".to_string();
    schedule.stages[0].activities[0].task = "Changed".to_string();

    assert_eq!(registry.lookup("Maize").unwrap(), &before);
}

#[test]
fn test_empty_stages_are_omitted() {
    let registry = TemplateRegistry::from_templates([CropTemplate {
        crop_name: "Fallow".to_string(),
        duration: DurationRange {
            min_days: 5,
            max_days: 5,
        },
        stages: vec![Stage {
            name: "Rest".to_string(),
            day_offset: 0,
            duration_days: 5,
            activities: vec![],
        }],
    }])
    .unwrap();

    let schedule = generate(&registry, "Fallow", date(2024, 1, 1)).unwrap();
    assert!(schedule.stages.is_empty());
    assert_eq!(progress(&schedule), 0);
    assert_eq!(schedule.expected_harvest_date, date(2024, 1, 6));
}

#[test]
fn test_add_days_out_of_range() {
    assert!(matches!(
        add_days(Date::MAX, 1),
        Err(ScheduleError::DateOutOfRange { .. })
    ));
    assert_eq!(add_days(date(2024, 3, 1), -1).unwrap(), date(2024, 2, 29));
}

#[test]
fn test_parse_start_date() {
    assert_eq!(parse_start_date("2024-01-01").unwrap(), date(2024, 1, 1));
    assert_eq!(parse_start_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));

    for input in ["2023-02-29", "01/02/2024", "tomorrow", ""] {
        match parse_start_date(input) {
            Err(ScheduleError::InvalidStartDate { input: got, .. }) => assert_eq!(got, input),
            other => panic!("Expected InvalidStartDate for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_classify_pending_relative_to_today() {
    let today = date(2024, 3, 10);
    assert_eq!(
        classify(ActivityStatus::Pending, date(2024, 3, 9), today),
        TemporalLabel::Overdue
    );
    assert_eq!(
        classify(ActivityStatus::Pending, today, today),
        TemporalLabel::Today
    );
    assert_eq!(
        classify(ActivityStatus::Pending, date(2024, 3, 11), today),
        TemporalLabel::Upcoming
    );
}

#[test]
fn test_classify_terminal_labels_ignore_today() {
    let scheduled = date(2024, 3, 10);
    for today in [date(2020, 1, 1), scheduled, date(2030, 1, 1)] {
        assert_eq!(
            classify(ActivityStatus::Completed, scheduled, today),
            TemporalLabel::Completed
        );
        assert_eq!(
            classify(ActivityStatus::Skipped, scheduled, today),
            TemporalLabel::Skipped
        );
    }
}

#[test]
fn test_activity_label_yesterday_is_overdue() {
    let today = today();
    let activity = Activity {
        id: "Sowing-0".to_string(),
        stage_name: "Sowing".to_string(),
        task: "Sow".to_string(),
        scheduled_date: add_days(today, -1).unwrap(),
        status: ActivityStatus::Pending,
    };
    assert_eq!(activity.label(today), TemporalLabel::Overdue);
}

#[test]
fn test_progress_one_of_ten() {
    let mut schedule = generate(&synthetic_registry(10), "Testcrop", date(2024, 1, 1)).unwrap();
    assert_eq!(progress(&schedule), 0);

    set_status(&mut schedule, "Only-0", ActivityStatus::Completed);
    assert_eq!(progress(&schedule), 10);
}

#[test]
fn test_progress_monotonic_and_skip_never_raises() {
    let mut schedule = generate(&synthetic_registry(8), "Testcrop", date(2024, 1, 1)).unwrap();

    set_status(&mut schedule, "Only-0", ActivityStatus::Completed);
    let after_first = progress(&schedule);
    assert_eq!(after_first, 13);

    set_status(&mut schedule, "Only-1", ActivityStatus::Skipped);
    assert_eq!(progress(&schedule), after_first);

    let mut last = progress(&schedule);
    for index in 2..8 {
        set_status(
            &mut schedule,
            &Activity::derive_id("Only", index),
            ActivityStatus::Completed,
        );
        let current = progress(&schedule);
        assert!(current >= last, "progress decreased: {last} -> {current}");
        last = current;
    }
    // 7 of 8 completed, one skipped.
    assert_eq!(last, 88);
}

#[test]
fn test_completion_percentage_rounding() {
    assert_eq!(completion_percentage(0, 3), 0);
    assert_eq!(completion_percentage(1, 3), 33);
    assert_eq!(completion_percentage(2, 3), 67);
    assert_eq!(completion_percentage(3, 3), 100);
    assert_eq!(completion_percentage(1, 200), 1);
    assert_eq!(completion_percentage(5, 0), 0);
}

#[test]
fn test_upcoming_selection_and_order() {
    let mut schedule = generate(&synthetic_registry(10), "Testcrop", date(2024, 1, 1)).unwrap();
    set_status(&mut schedule, "Only-2", ActivityStatus::Completed);
    set_status(&mut schedule, "Only-1", ActivityStatus::Skipped);

    let today = date(2024, 1, 4);
    let selected = upcoming(&schedule, today, DEFAULT_HORIZON_DAYS);
    let ids: Vec<&str> = selected
        .iter()
        .map(|entry| entry.activity.id.as_str())
        .collect();

    // Day 9 is 2024-01-10, within today + 7 = 2024-01-11; completed day 2 excluded.
    assert_eq!(
        ids,
        vec!["Only-0", "Only-1", "Only-3", "Only-4", "Only-5", "Only-6", "Only-7", "Only-8", "Only-9"]
    );
    assert!(selected[0].is_overdue && !selected[0].is_today);
    assert!(selected[1].is_overdue, "skipped overdue activities stay visible");
    assert!(selected[2].is_today && !selected[2].is_overdue);
    assert!(!selected[3].is_today && !selected[3].is_overdue);
    assert!(selected
        .windows(2)
        .all(|pair| pair[0].activity.scheduled_date <= pair[1].activity.scheduled_date));
}

#[test]
fn test_upcoming_horizon_is_inclusive() {
    let schedule = generate(&synthetic_registry(10), "Testcrop", date(2024, 1, 1)).unwrap();

    let selected = upcoming(&schedule, date(2024, 1, 1), 3);
    let last = selected.last().unwrap();
    assert_eq!(selected.len(), 4);
    assert_eq!(last.activity.scheduled_date, date(2024, 1, 4));

    assert_eq!(upcoming(&schedule, date(2023, 12, 1), 7).len(), 0);
}

#[test]
fn test_upcoming_sorts_across_stages() {
    // Rice has a task in "Vegetative Growth" dated before the end of
    // "Transplanting"; the selection must interleave them by date.
    let schedule = generate(&builtin(), "Rice", date(2024, 6, 15)).unwrap();
    let selected = upcoming(&schedule, date(2024, 6, 15), 5);
    let ids: Vec<&str> = selected
        .iter()
        .map(|entry| entry.activity.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "Nursery-0",
            "Nursery-1",
            "Nursery-2",
            "Puddling-0",
            "Puddling-1",
            "Transplanting-0",
            "Vegetative Growth-0",
            "Transplanting-1",
        ]
    );
}

#[test]
fn test_activity_transitions() {
    use ActivityStatus::*;

    assert!(Pending.can_transition_to(Completed));
    assert!(Completed.can_transition_to(Pending));
    assert!(Pending.can_transition_to(Skipped));
    assert!(Skipped.can_transition_to(Skipped));
    assert!(!Skipped.can_transition_to(Pending));
    assert!(!Skipped.can_transition_to(Completed));
    assert!(!Completed.can_transition_to(Skipped));
}

#[test]
fn test_apply_rejects_invalid_transition_without_mutation() {
    let mut schedule = generate(&synthetic_registry(3), "Testcrop", date(2024, 1, 1)).unwrap();
    schedule.id = Some(9);
    set_status(&mut schedule, "Only-0", ActivityStatus::Skipped);
    let before = schedule.clone();

    match apply_activity_status(&mut schedule, "Only-0", ActivityStatus::Completed) {
        Err(ScheduleError::InvalidTransition { from, to, .. }) => {
            assert_eq!(from, ActivityStatus::Skipped);
            assert_eq!(to, ActivityStatus::Completed);
        }
        other => panic!("Expected InvalidTransition, got {other:?}"),
    }
    assert_eq!(schedule, before);

    assert!(matches!(
        apply_activity_status(&mut schedule, "Missing-0", ActivityStatus::Completed),
        Err(ScheduleError::ActivityNotFound { schedule_id: 9, .. })
    ));
}

#[test]
fn test_schedule_status_follows_activities() {
    let mut schedule = generate(&synthetic_registry(2), "Testcrop", date(2024, 1, 1)).unwrap();
    assert_eq!(schedule.status, ScheduleStatus::Planning);

    set_status(&mut schedule, "Only-0", ActivityStatus::Completed);
    assert_eq!(schedule.status, ScheduleStatus::Active);

    set_status(&mut schedule, "Only-1", ActivityStatus::Completed);
    assert_eq!(schedule.status, ScheduleStatus::Completed);
    assert_eq!(progress(&schedule), 100);

    set_status(&mut schedule, "Only-1", ActivityStatus::Pending);
    assert_eq!(schedule.status, ScheduleStatus::Active);
}

#[test]
fn test_skipped_activity_blocks_automatic_completion() {
    let mut schedule = generate(&synthetic_registry(2), "Testcrop", date(2024, 1, 1)).unwrap();
    set_status(&mut schedule, "Only-0", ActivityStatus::Completed);
    set_status(&mut schedule, "Only-1", ActivityStatus::Skipped);

    assert_eq!(schedule.status, ScheduleStatus::Active);
    assert_eq!(progress(&schedule), 50);
}

#[test]
fn test_cancelled_schedule_is_closed() {
    let mut schedule = generate(&synthetic_registry(2), "Testcrop", date(2024, 1, 1)).unwrap();
    schedule.status = ScheduleStatus::Cancelled;

    assert!(matches!(
        apply_activity_status(&mut schedule, "Only-0", ActivityStatus::Completed),
        Err(ScheduleError::ScheduleClosed { .. })
    ));
    assert!(matches!(
        check_schedule_transition(1, ScheduleStatus::Cancelled, ScheduleStatus::Active, 2, 0),
        Err(ScheduleError::ScheduleClosed { .. })
    ));
}

#[test]
fn test_explicit_completion_requires_all_activities() {
    assert!(matches!(
        check_schedule_transition(1, ScheduleStatus::Active, ScheduleStatus::Completed, 4, 3),
        Err(ScheduleError::InvalidInput { .. })
    ));
    assert!(
        check_schedule_transition(1, ScheduleStatus::Active, ScheduleStatus::Completed, 4, 4)
            .is_ok()
    );
    assert!(
        check_schedule_transition(1, ScheduleStatus::Planning, ScheduleStatus::Active, 4, 0)
            .is_ok()
    );
    assert!(
        check_schedule_transition(1, ScheduleStatus::Active, ScheduleStatus::Cancelled, 4, 1)
            .is_ok()
    );
}
