use std::path::PathBuf;

use serde_json::json;

use crate::{
    admin::{
        drafts::{apply_drafts, draft_changes, is_well_formed_token, preview_link},
        resource::{Exams, Resource, Schedules},
        run_tool::merge_form,
        time_mask::{is_valid_time, normalize_time_field, to_backend, TimeMask},
    },
    viewer::{helpers::read_json, models::schedule_model::ScheduleItem},
};

use super::*;

fn fixture_schedules() -> Vec<ScheduleItem> {
    read_json(&PathBuf::from("tests/test.schedules.json")).unwrap()
}

fn valid_schedule_form() -> ScheduleForm {
    ScheduleForm {
        event_type: "Lecture".to_string(),
        start_time: "0830".to_string(),
        end_time: "10:00".to_string(),
        days: BTreeSet::from([Weekday::Monday]),
        academic_year: "2024-2025".to_string(),
        year: 2,
        status: ScheduleStatus::Published,
        subject_id: 11,
        instructor_id: 21,
        semester_id: 31,
        location_id: 41,
    }
}

fn typed(keys: &str) -> TimeMask {
    let mut mask = TimeMask::new();
    mask.input(keys);
    mask
}

fn fields(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|error| error.field).collect()
}

#[test]
fn mask_display_fills_progressively() {
    assert_eq!(typed("").display(), "");
    assert_eq!(typed("9").display(), "9-:--");
    assert_eq!(typed("93").display(), "93:--");
    assert_eq!(typed("930").display(), "93:0-");
    assert_eq!(typed("0930").display(), "09:30");
}

#[test]
fn mask_ignores_non_digits_and_extra_digits() {
    let mut mask = typed("1a2:3456");

    assert_eq!(mask.digits(), "1234");
    assert!(!mask.push('7'));
    mask.backspace();
    assert_eq!(mask.display(), "12:3-");
}

#[test]
fn blur_clamps_hour_and_minute() {
    assert_eq!(typed("2565").blur(), "23:59");
    assert_eq!(typed("9999").blur(), "23:59");
    assert_eq!(typed("1875").blur(), "18:59");
    assert_eq!(typed("0930").blur(), "09:30");
    assert_eq!(typed("0000").blur(), "00:00");
}

#[test]
fn blur_hands_partial_input_on_unchanged() {
    assert_eq!(typed("930").blur(), "93:0-");
    assert_eq!(typed("7").blur(), "7-:--");
    assert_eq!(typed("").blur(), "");
}

#[test]
fn mask_prefills_from_backend_time() {
    assert_eq!(TimeMask::from_value("09:30:00").blur(), "09:30");
    assert_eq!(TimeMask::from_value("23:05").display(), "23:05");
}

#[test]
fn backend_times_carry_seconds() {
    assert_eq!(to_backend("09:30"), "09:30:00");
    assert_eq!(to_backend("93:0-"), "93:0-");
    assert_eq!(normalize_time_field("2565"), "23:59:00");
    assert_eq!(normalize_time_field("08:15:00"), "08:15:00");
    assert_eq!(normalize_time_field("0815"), "08:15:00");
}

#[test]
fn time_validity() {
    assert!(is_valid_time("00:00"));
    assert!(is_valid_time("23:59:59"));
    assert!(!is_valid_time("24:00"));
    assert!(!is_valid_time("9:30"));
    assert!(!is_valid_time("93:0-"));
    assert!(!is_valid_time("09:30:00:00"));
}

#[test]
fn valid_schedule_form_passes_after_normalization() {
    let mut form = valid_schedule_form();

    form.normalize();

    assert_eq!(form.start_time, "08:30:00");
    assert_eq!(form.end_time, "10:00:00");
    assert!(form.validate().is_empty());
}

#[test]
fn three_digit_time_is_caught_by_validation() {
    let mut form = valid_schedule_form();
    form.start_time = "930".to_string();

    form.normalize();

    assert_eq!(form.start_time, "93:0-");
    assert_eq!(fields(&form.validate()), vec!["startTime"]);
}

#[test]
fn schedule_form_reports_every_problem() {
    let mut form = ScheduleForm {
        start_time: "1100".to_string(),
        end_time: "0900".to_string(),
        ..ScheduleForm::default()
    };

    form.normalize();
    let errors = form.validate();

    assert_eq!(
        fields(&errors),
        vec![
            "eventType",
            "academicYear",
            "endTime",
            "days",
            "year",
            "subjectId",
            "instructorId",
            "semesterId",
            "locationId"
        ]
    );
    assert_eq!(errors[2].to_string(), "endTime: must be after the start time");
}

#[test]
fn exam_form_requires_date_and_hour() {
    let mut form = ExamForm {
        event_type: "Exam".to_string(),
        academic_year: "2024-2025".to_string(),
        year: 2,
        afati_id: 1,
        subject_id: 11,
        instructor_id: 21,
        ..ExamForm::default()
    };

    form.normalize();

    assert_eq!(fields(&form.validate()), vec!["hour", "date"]);
}

#[test]
fn instructor_form_checks_names_and_email() {
    let form = InstructorForm {
        first_name: " ".to_string(),
        last_name: "Hopper".to_string(),
        title: None,
        email: Some("grace.example.com".to_string()),
    };

    assert_eq!(fields(&form.validate()), vec!["firstName", "email"]);
}

#[test]
fn missing_form_fields_fall_back_to_defaults() {
    let form: SemesterForm = serde_json::from_value(json!({})).unwrap();

    assert_eq!(fields(&form.validate()), vec!["name"]);
}

#[test]
fn schedule_prefill_shows_short_times() {
    let schedules = fixture_schedules();

    let form = Schedules::prefill(&schedules[0]);

    assert_eq!(form.start_time, "10:15");
    assert_eq!(form.end_time, "11:45");
    assert_eq!(form.days, BTreeSet::from([Weekday::Monday, Weekday::Wednesday]));
    assert_eq!(form.subject_id, 11);
    assert_eq!(Schedules::record_id(&schedules[0]), 1);
}

#[test]
fn exam_prefill_keeps_date() {
    let exams: Vec<crate::viewer::models::schedule_model::ExamItem> =
        read_json(&PathBuf::from("tests/test.exams.json")).unwrap();

    let form = Exams::prefill(&exams[0]);

    assert_eq!(form.date, Some(exams[0].date));
    assert_eq!(form.hour, "12:00");
    assert!(form.validate().is_empty());
}

#[test]
fn merge_form_overrides_only_given_fields() {
    let prefilled = InstructorForm {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        title: Some("Rear Admiral".to_string()),
        email: None,
    };

    let merged = merge_form(&prefilled, json!({ "email": "grace@navy.mil" })).unwrap();

    assert_eq!(merged.first_name, "Grace");
    assert_eq!(merged.title.as_deref(), Some("Rear Admiral"));
    assert_eq!(merged.email.as_deref(), Some("grace@navy.mil"));
}

#[test]
fn drafts_replace_published_records_with_the_same_id() {
    let schedules = fixture_schedules();
    let mut moved = schedules[1].clone();
    moved.start_time = "14:00:00".to_string();
    moved.status = ScheduleStatus::Draft;

    let applied = apply_drafts(&schedules[..2], &[moved.clone()]);

    assert_eq!(applied.len(), 2);
    assert_eq!(applied[1], moved);
}

#[test]
fn draft_changes_show_added_events() {
    let schedules = fixture_schedules();
    let drafts = schedules
        .iter()
        .filter(|item| item.status == ScheduleStatus::Draft)
        .cloned()
        .collect::<Vec<_>>();
    let monday = chrono::NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    let diff = draft_changes(&schedules, &drafts, monday).unwrap();

    assert!(diff.contains("+  12:00-13:30  [Lecture] Networks"));
    assert!(!diff.contains("-  08:30-10:00  [Lab] Databases"));
}

#[test]
fn no_drafts_no_changes() {
    let schedules = fixture_schedules();
    let monday = chrono::NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    assert_eq!(draft_changes(&schedules, &[], monday), None);
}

#[test]
fn preview_tokens_must_be_url_safe() {
    assert!(is_well_formed_token("a1B2-c3_d4"));
    assert!(!is_well_formed_token(""));
    assert!(!is_well_formed_token("../etc/passwd"));
    assert!(!is_well_formed_token("token with spaces"));
    assert!(!is_well_formed_token(&"x".repeat(300)));
}

#[test]
fn preview_link_joins_base_and_token() {
    assert_eq!(
        preview_link("https://uni.example/preview/", "abc"),
        "https://uni.example/preview/abc"
    );
}
