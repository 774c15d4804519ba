use chrono::{Duration, TimeZone, Utc};
use remindo_core::{format_reminder, has_passed, has_passed_at, Todo};

#[test]
fn passed_flag_is_strict_about_the_boundary_instant() {
    let at = Utc.with_ymd_and_hms(2025, 3, 10, 17, 45, 0).unwrap();

    assert!(!has_passed_at(&at, at - Duration::seconds(1)));
    assert!(!has_passed_at(&at, at));
    assert!(has_passed_at(&at, at + Duration::seconds(1)));
}

#[test]
fn morning_reminder_flips_between_earlier_and_later_evaluations() {
    let reminder = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();

    assert!(!has_passed_at(
        &reminder,
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
    ));
    assert!(has_passed_at(
        &reminder,
        Utc.with_ymd_and_hms(2025, 1, 1, 11, 0, 0).unwrap()
    ));
}

#[test]
fn stored_and_reloaded_reminders_evaluate_identically() {
    let todo = Todo::new("stretch", Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap()).unwrap();
    let reloaded: Todo = serde_json::from_str(&serde_json::to_string(&todo).unwrap()).unwrap();

    let now = Utc::now();
    assert_eq!(
        has_passed_at(&todo.reminder, now),
        has_passed_at(&reloaded.reminder, now)
    );
    assert!(has_passed(&reloaded.reminder));
}

// The local zone varies per machine, so assert the 12-hour shape instead of
// an exact value.
#[test]
fn display_rendering_has_twelve_hour_shape_in_any_zone() {
    let rendered = format_reminder(&Utc.with_ymd_and_hms(2025, 3, 10, 17, 45, 9).unwrap());

    assert_eq!(rendered.len(), 11, "unexpected rendering: {rendered}");
    assert_eq!(&rendered[2..3], ":");
    assert_eq!(&rendered[5..6], ":");
    assert!(
        rendered.ends_with(" AM") || rendered.ends_with(" PM"),
        "unexpected rendering: {rendered}"
    );
    let hour: u32 = rendered[0..2].parse().unwrap();
    assert!((1..=12).contains(&hour));
}
