#[cfg(test)]
mod model_tests {
    use jiff::civil::date;

    use crate::models::{
        Activity, ActivityStatus, CropTemplate, Schedule, ScheduleStatus, ScheduleSummary,
    };

    fn activity(stage: &str, index: usize, day: i8, status: ActivityStatus) -> Activity {
        Activity {
            id: Activity::derive_id(stage, index),
            stage_name: stage.to_string(),
            task: format!("{stage} task {index}"),
            scheduled_date: date(2024, 1, 1 + day),
            status,
        }
    }

    fn create_test_schedule() -> Schedule {
        Schedule::from_activities(
            Some(12),
            "Maize".to_string(),
            date(2024, 1, 1),
            date(2024, 4, 10),
            ScheduleStatus::Active,
            vec![
                activity("Land Preparation", 0, 0, ActivityStatus::Completed),
                activity("Land Preparation", 1, 1, ActivityStatus::Skipped),
                activity("Sowing", 0, 2, ActivityStatus::Pending),
                activity("Sowing", 1, 3, ActivityStatus::Completed),
                activity("Weeding", 0, 9, ActivityStatus::Pending),
            ],
        )
    }

    #[test]
    fn test_schedule_status_parsing() {
        assert_eq!("planning".parse::<ScheduleStatus>(), Ok(ScheduleStatus::Planning));
        assert_eq!("ACTIVE".parse::<ScheduleStatus>(), Ok(ScheduleStatus::Active));
        assert_eq!("completed".parse::<ScheduleStatus>(), Ok(ScheduleStatus::Completed));
        assert_eq!("canceled".parse::<ScheduleStatus>(), Ok(ScheduleStatus::Cancelled));
        assert!("archived".parse::<ScheduleStatus>().is_err());

        for status in [
            ScheduleStatus::Planning,
            ScheduleStatus::Active,
            ScheduleStatus::Completed,
            ScheduleStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<ScheduleStatus>(), Ok(status));
        }
        assert_eq!(ScheduleStatus::default(), ScheduleStatus::Planning);
    }

    #[test]
    fn test_activity_status_parsing() {
        assert_eq!("pending".parse::<ActivityStatus>(), Ok(ActivityStatus::Pending));
        assert_eq!("done".parse::<ActivityStatus>(), Ok(ActivityStatus::Completed));
        assert_eq!("Skipped".parse::<ActivityStatus>(), Ok(ActivityStatus::Skipped));
        assert!("in_progress".parse::<ActivityStatus>().is_err());
        assert_eq!(ActivityStatus::default(), ActivityStatus::Pending);
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ScheduleStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        assert_eq!(
            serde_json::from_str::<ActivityStatus>("\"skipped\"").unwrap(),
            ActivityStatus::Skipped
        );
    }

    #[test]
    fn test_from_activities_groups_consecutive_stages() {
        let schedule = create_test_schedule();

        let names: Vec<_> = schedule.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Land Preparation", "Sowing", "Weeding"]);
        assert_eq!(schedule.stages[0].activities.len(), 2);
        assert_eq!(schedule.activity_count(), 5);
        assert_eq!(schedule.activities().count(), 5);
    }

    #[test]
    fn test_schedule_lookup_and_counts() {
        let schedule = create_test_schedule();

        assert_eq!(
            schedule.activity("Sowing-1").map(|a| a.status),
            Some(ActivityStatus::Completed)
        );
        assert!(schedule.activity("Sowing-7").is_none());
        assert_eq!(schedule.count_with_status(ActivityStatus::Completed), 2);
        assert_eq!(schedule.count_with_status(ActivityStatus::Skipped), 1);
        assert_eq!(schedule.count_with_status(ActivityStatus::Pending), 2);
    }

    #[test]
    fn test_summary_from_schedule() {
        let schedule = create_test_schedule();
        let summary = ScheduleSummary::from_schedule(&schedule).unwrap();

        assert_eq!(summary.id, 12);
        assert_eq!(summary.crop_name, "Maize");
        assert_eq!(summary.status, ScheduleStatus::Active);
        assert_eq!(summary.progress_percentage, 40);

        let mut preview = schedule;
        preview.id = None;
        assert!(ScheduleSummary::from_schedule(&preview).is_none());
    }

    #[test]
    fn test_schedule_serializes_camel_case() {
        let json = serde_json::to_value(create_test_schedule()).unwrap();
        assert_eq!(json["cropName"], "Maize");
        assert_eq!(json["expectedHarvestDate"], "2024-04-10");
        assert_eq!(json["stages"][1]["activities"][0]["scheduledDate"], "2024-01-03");
        assert_eq!(json["stages"][1]["activities"][0]["stageName"], "Sowing");
    }

    #[test]
    fn test_template_field_names() {
        let template: CropTemplate = serde_json::from_str(
            r#"{
                "duration": { "min": 90, "max": 100 },
                "stages": [
                    { "name": "Sowing", "dayOffset": -3, "duration": 7,
                      "activities": [{ "task": "Drill seed", "day": 1 }] },
                    { "name": "Fallow", "dayOffset": 10, "duration": 5 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(template.crop_name, "");
        assert_eq!(template.duration.max_days, 100);
        assert_eq!(template.stages[0].day_offset, -3);
        assert_eq!(template.stages[0].activities[0].day_offset_within_stage, 1);
        assert!(template.stages[1].activities.is_empty());
        assert_eq!(template.activity_count(), 1);
    }
}
