use chrono::{NaiveDate, NaiveTime};
use hall_booking_backend::domain::models::booking::{Booking, NewBookingParams};
use hall_booking_backend::domain::services::availability::{find_conflicts, overlaps};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn booking(start: NaiveTime, end: NaiveTime) -> Booking {
    Booking::new(NewBookingParams {
        hall_id: "hall-1".to_string(),
        user_id: "user-1".to_string(),
        event_name: "Seminar".to_string(),
        booking_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        start_time: start,
        end_time: end,
        department: "CS".to_string(),
        faculty_incharge: None,
        expected_audience: 50,
        chairs_required: 40,
        needs_projector: false,
        needs_mic: false,
        needs_sound_system: false,
        additional_requirements: None,
    })
}

#[test]
fn overlap_truth_table() {
    // Partial overlap from the left and right
    assert!(overlaps(t(9, 0), t(10, 0), t(9, 30), t(10, 30)));
    assert!(overlaps(t(9, 30), t(10, 30), t(9, 0), t(10, 0)));

    // Containment both ways
    assert!(overlaps(t(9, 0), t(12, 0), t(10, 0), t(11, 0)));
    assert!(overlaps(t(10, 0), t(11, 0), t(9, 0), t(12, 0)));

    // Identical intervals
    assert!(overlaps(t(9, 0), t(10, 0), t(9, 0), t(10, 0)));

    // Fully disjoint
    assert!(!overlaps(t(8, 0), t(9, 0), t(10, 0), t(11, 0)));
    assert!(!overlaps(t(10, 0), t(11, 0), t(8, 0), t(9, 0)));
}

#[test]
fn touching_intervals_do_not_conflict() {
    // Half-open semantics: [9,10) and [10,11) share only the boundary point.
    assert!(!overlaps(t(9, 0), t(10, 0), t(10, 0), t(11, 0)));
    assert!(!overlaps(t(10, 0), t(11, 0), t(9, 0), t(10, 0)));
}

#[test]
fn scenario_single_morning_booking() {
    let existing = vec![booking(t(9, 0), t(10, 0))];

    let conflicts = find_conflicts(&existing, t(9, 30), t(10, 30), None);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].id, existing[0].id);

    assert!(find_conflicts(&existing, t(10, 0), t(11, 0), None).is_empty());
    assert!(find_conflicts(&existing, t(8, 0), t(9, 0), None).is_empty());
}

#[test]
fn empty_partition_yields_no_conflicts() {
    let conflicts = find_conflicts(&[], t(9, 0), t(17, 0), None);
    assert!(conflicts.is_empty());
}

#[test]
fn resolver_is_idempotent() {
    let existing = vec![
        booking(t(9, 0), t(10, 0)),
        booking(t(11, 0), t(12, 0)),
        booking(t(14, 0), t(16, 0)),
    ];

    let first = find_conflicts(&existing, t(9, 30), t(11, 30), None);
    let second = find_conflicts(&existing, t(9, 30), t(11, 30), None);

    let first_ids: Vec<&str> = first.iter().map(|b| b.id.as_str()).collect();
    let second_ids: Vec<&str> = second.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first.len(), 2);
}

#[test]
fn exclude_removes_exactly_that_booking() {
    let a = booking(t(9, 0), t(10, 0));
    let b = booking(t(9, 30), t(10, 30));
    let existing = vec![a.clone(), b.clone()];

    // Re-validating a's own slot against itself: only b remains in the way.
    let conflicts = find_conflicts(&existing, t(9, 0), t(10, 0), Some(&a.id));
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].id, b.id);

    // No exclusion excludes nothing.
    let conflicts = find_conflicts(&existing, t(9, 0), t(10, 0), None);
    assert_eq!(conflicts.len(), 2);

    // An id that matches nothing changes nothing.
    let conflicts = find_conflicts(&existing, t(9, 0), t(10, 0), Some("nonexistent"));
    assert_eq!(conflicts.len(), 2);
}
