//! End-to-end scenarios through the public API.

use chrono::{Duration, Locale, TimeZone, Utc};
use visitlog::policy::{CheckInRulesBuilder, Violation};
use visitlog::tracker::{FixedClock, SequentialIds};
use visitlog::view::EMPTY_HISTORY;
use visitlog::{Dashboard, TimeFormat, TrackerBuilder, TrackerError, VisitTracker};

#[test]
fn alice_visit_round_trip() {
    let mut tracker = VisitTracker::new();

    let alice = tracker.check_in("Alice").unwrap();
    assert_eq!(tracker.active_count(), 1);

    tracker.check_out(&alice.id).unwrap();
    assert_eq!(tracker.active_count(), 0);
    assert_eq!(tracker.history().len(), 1);
    assert_eq!(tracker.history().entries()[0].user_name, "Alice");

    assert!(tracker.search("zzz").is_empty());
    assert_eq!(tracker.search("ALICE").len(), 1);
}

#[test]
fn a_then_b_puts_b_first() {
    let mut tracker = VisitTracker::new();
    let a = tracker.check_in("A").unwrap();
    let b = tracker.check_in("B").unwrap();

    tracker.check_out(&a.id);
    tracker.check_out(&b.id);

    assert_eq!(tracker.history().entries()[0].user_name, "B");
}

#[test]
fn busy_morning_at_the_desk() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 10, 7, 9, 0, 0).unwrap());
    let rules = CheckInRulesBuilder::new()
        .require_pred(
            |ctx| ctx.trimmed_name() != "Mallory",
            "Borrowing privileges suspended".to_string(),
        )
        .build();
    let mut tracker = TrackerBuilder::new()
        .clock(clock.clone())
        .ids(SequentialIds::new("desk"))
        .rules(rules)
        .max_active(3)
        .history_limit(2)
        .build()
        .unwrap();

    let ada = tracker.check_in("Ada").unwrap();
    clock.advance(Duration::minutes(5));
    let alan = tracker.check_in("Alan").unwrap();
    let grace = tracker.check_in(" Grace ").unwrap();
    assert_eq!(grace.name, "Grace");

    // Full, and Mallory is refused on both counts
    match tracker.try_check_in("Mallory") {
        Err(TrackerError::Rejected { violations }) => {
            assert_eq!(violations.len(), 2);
            assert!(violations.contains(&Violation::CapacityReached { max: 3 }));
            assert!(violations.contains(&Violation::Custom {
                message: "Borrowing privileges suspended".to_string()
            }));
        }
        other => panic!("Expected rejection, got {other:?}"),
    }

    clock.advance(Duration::hours(1));
    let ada_visit = tracker.check_out(&ada.id).unwrap();
    assert_eq!(ada_visit.duration().as_secs(), 65 * 60);

    tracker.check_out(&alan.id).unwrap();
    tracker.check_out(&grace.id).unwrap();

    // Only the two newest visits survive
    let names: Vec<_> = tracker.history().iter().map(|e| e.user_name.as_str()).collect();
    assert_eq!(names, vec!["Grace", "Alan"]);
    assert_eq!(tracker.history().total_time().as_secs(), 2 * 60 * 60);

    let format = TimeFormat::new("%Y-%m-%d %H:%M:%S", "%H:%M:%S")
        .unwrap()
        .with_locale(Locale::POSIX);
    let dash = Dashboard::in_timezone(&tracker, "al", &format, &Utc);
    assert_eq!(dash.active_count, 0);
    assert_eq!(dash.history.len(), 1);
    assert_eq!(dash.history[0].user_name, "Alan");
    assert_eq!(dash.history[0].check_in, "2024-10-07 09:05:00");
    assert_eq!(dash.history[0].check_out, "2024-10-07 10:05:00");

    let nothing = Dashboard::in_timezone(&tracker, "zzz", &format, &Utc);
    assert!(nothing.to_string().contains(EMPTY_HISTORY));
}

#[test]
fn history_entry_outlives_the_user_record() {
    let mut tracker = VisitTracker::new();
    let user = tracker.check_in("Alice").unwrap();
    let entry = tracker.check_out(&user.id).unwrap();

    // A new user with the same name is a distinct visit
    let again = tracker.check_in("Alice").unwrap();
    assert_ne!(again.id, user.id);
    assert_eq!(tracker.history().latest(), Some(&entry));
    assert_eq!(tracker.search("alice").len(), 1);
}

#[test]
fn locale_defaults_render_per_locale() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 10, 7, 14, 30, 0).unwrap());
    let mut tracker = TrackerBuilder::new().clock(clock.clone()).build().unwrap();
    let ada = tracker.check_in("Ada").unwrap();
    clock.advance(Duration::minutes(20));
    tracker.check_out(&ada.id).unwrap();

    let de = Dashboard::in_timezone(&tracker, "", &TimeFormat::localized(Locale::de_DE), &Utc);
    let us = Dashboard::in_timezone(&tracker, "", &TimeFormat::localized(Locale::en_US), &Utc);

    assert!(de.history[0].check_out.starts_with("07.10.2024"));
    assert!(us.history[0].check_out.starts_with("10/07/2024"));
    assert_ne!(de.to_string(), us.to_string());
}
