use std::sync::Arc;
use std::time::Duration;

use crate::clock::impl_fake::ClockFake;
use crate::duration_tracker::core::{
    ClassDurationTracker, ClassObservation, TickOutcome, TrackerConfig,
};
use crate::duration_tracker::summary::{SnapshotEntry, SummaryFilter};

fn obs(class_name: &str, probability: f32) -> ClassObservation {
    ClassObservation {
        class_name: class_name.to_string(),
        probability,
        tick_index: 0,
    }
}

fn tracker_with(config: TrackerConfig) -> (ClassDurationTracker, ClockFake) {
    let clock = ClockFake::new();
    let mut tracker = ClassDurationTracker::new(config, Arc::new(clock.clone()));
    tracker.start();
    (tracker, clock)
}

fn tracker() -> (ClassDurationTracker, ClockFake) {
    tracker_with(TrackerConfig::default())
}

fn durations(tracker: &ClassDurationTracker) -> Vec<(String, f64)> {
    tracker
        .snapshot()
        .into_iter()
        .map(|entry| (entry.class_name, entry.accumulated_seconds))
        .collect()
}

#[test]
fn test_below_threshold_changes_nothing() {
    let (mut tracker, _) = tracker();
    tracker.register_classes(&["Sit".to_string(), "Stand".to_string()]);

    let outcome = tracker.observe(&[obs("Sit", 0.79), obs("Stand", 0.5)]);

    assert_eq!(outcome, TickOutcome::NoClassMetThreshold);
    assert_eq!(
        durations(&tracker),
        vec![("Sit".to_string(), 0.0), ("Stand".to_string(), 0.0)]
    );
    assert_eq!(tracker.tick_count(), 1);
}

#[test]
fn test_threshold_is_inclusive() {
    let (mut tracker, _) = tracker();

    let outcome = tracker.observe(&[obs("Sit", 0.8)]);

    assert_eq!(
        outcome,
        TickOutcome::Credited {
            class_name: "Sit".to_string(),
            probability: 0.8
        }
    );
}

#[test]
fn test_single_winner_per_tick() {
    let (mut tracker, _) = tracker();

    tracker.observe(&[obs("Sit", 0.85), obs("Stand", 0.95), obs("Lie", 0.9)]);

    assert_eq!(
        durations(&tracker),
        vec![
            ("Stand".to_string(), 1.0),
            // credited classes only enter the map when they win
        ]
    );
}

#[test]
fn test_tie_goes_to_first_observation() {
    let (mut tracker, _) = tracker();

    let outcome = tracker.observe(&[obs("Stand", 0.9), obs("Sit", 0.9)]);

    assert_eq!(
        outcome,
        TickOutcome::Credited {
            class_name: "Stand".to_string(),
            probability: 0.9
        }
    );
    assert!(tracker.record("Sit").is_none());
}

#[test]
fn test_durations_never_decrease() {
    let (mut tracker, _) = tracker();
    let ticks = vec![
        vec![obs("A", 0.9)],
        vec![obs("B", 0.99), obs("A", 0.1)],
        vec![],
        vec![obs("A", 0.2)],
        vec![obs("A", 0.81)],
    ];

    let mut previous = 0.0;
    for tick in ticks {
        tracker.observe(&tick);
        let current = tracker
            .record("A")
            .map(|r| r.accumulated.as_secs_f64())
            .unwrap_or_default();
        assert!(current >= previous);
        previous = current;
    }
    assert_eq!(previous, 2.0);
}

#[test]
fn test_nan_and_out_of_range_probabilities() {
    let (mut tracker, _) = tracker();

    assert_eq!(
        tracker.observe(&[obs("A", f32::NAN)]),
        TickOutcome::NoClassMetThreshold
    );
    assert_eq!(
        tracker.observe(&[obs("A", 0.9), obs("B", 1.5)]),
        TickOutcome::Credited {
            class_name: "B".to_string(),
            probability: 1.5
        }
    );
}

#[test]
fn test_reset_clears_state() {
    let (mut tracker, clock) = tracker();
    tracker.observe(&[obs("Sit", 0.9)]);
    clock.advance(Duration::from_secs(5));

    tracker.reset();

    assert!(tracker.snapshot().is_empty());
    assert_eq!(tracker.tick_count(), 0);
    assert_eq!(tracker.total_elapsed(), 0.0);

    tracker.start();
    clock.advance(Duration::from_secs(2));
    assert_eq!(tracker.total_elapsed(), 2.0);
}

#[test]
fn test_reset_is_idempotent() {
    let (mut tracker, _) = tracker();
    tracker.reset();
    tracker.reset();
    assert!(tracker.snapshot().is_empty());
    assert!(!tracker.is_running());
}

#[test]
fn test_example_run() {
    let (mut tracker, clock) = tracker();

    clock.advance(Duration::from_secs(1));
    tracker.observe(&[obs("Sit", 0.9)]);
    assert_eq!(durations(&tracker), vec![("Sit".to_string(), 1.0)]);

    clock.advance(Duration::from_secs(1));
    tracker.observe(&[obs("Sit", 0.75), obs("Stand", 0.85)]);
    assert_eq!(
        durations(&tracker),
        vec![("Sit".to_string(), 1.0), ("Stand".to_string(), 1.0)]
    );

    clock.advance(Duration::from_secs(1));
    tracker.observe(&[obs("Sit", 0.3), obs("Stand", 0.4)]);
    assert_eq!(
        durations(&tracker),
        vec![("Sit".to_string(), 1.0), ("Stand".to_string(), 1.0)]
    );

    assert_eq!(tracker.total_elapsed(), 3.0);
}

#[test]
fn test_snapshot_orders_longest_first() {
    let (mut tracker, _) = tracker();
    tracker.register_classes(&["A".to_string(), "B".to_string(), "C".to_string()]);

    tracker.observe(&[obs("C", 0.9)]);
    tracker.observe(&[obs("C", 0.9)]);
    tracker.observe(&[obs("B", 0.9)]);

    assert_eq!(
        durations(&tracker),
        vec![
            ("C".to_string(), 2.0),
            ("B".to_string(), 1.0),
            ("A".to_string(), 0.0)
        ]
    );
}

#[test]
fn test_meaningful_filter_drops_short_classes() {
    let (mut tracker, _) = tracker_with(TrackerConfig {
        tick_interval: Duration::from_millis(100),
        summary_filter: SummaryFilter::meaningful(),
        ..TrackerConfig::default()
    });
    tracker.register_classes(&["Sit".to_string(), "Stand".to_string()]);

    for _ in 0..8 {
        tracker.observe(&[obs("Sit", 0.9)]);
    }
    for _ in 0..3 {
        tracker.observe(&[obs("Stand", 0.9)]);
    }

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].class_name, "Sit");
    assert!((snapshot[0].accumulated_seconds - 0.8).abs() < 1e-9);
}

#[test]
fn test_average_confidence() {
    let (mut tracker, _) = tracker();

    tracker.observe(&[obs("Sit", 0.9)]);
    tracker.observe(&[obs("Sit", 0.8)]);

    let snapshot = tracker.snapshot();
    let average = snapshot[0].average_confidence.unwrap();
    assert!((average - 85.0).abs() < 1e-4);
}

#[test]
fn test_confidence_not_tracked() {
    let (mut tracker, _) = tracker_with(TrackerConfig {
        track_confidence: false,
        ..TrackerConfig::default()
    });

    tracker.observe(&[obs("Sit", 0.9)]);

    assert_eq!(
        tracker.snapshot(),
        vec![SnapshotEntry {
            class_name: "Sit".to_string(),
            accumulated_seconds: 1.0,
            average_confidence: None,
        }]
    );
}

#[test]
fn test_stop_freezes_elapsed() {
    let (mut tracker, clock) = tracker();
    clock.advance(Duration::from_secs(4));
    tracker.stop();
    clock.advance(Duration::from_secs(10));

    assert_eq!(tracker.total_elapsed(), 4.0);
    assert!(!tracker.is_running());
}

#[test]
fn test_summarize() {
    let (mut tracker, clock) = tracker();
    tracker.observe(&[obs("Sit", 0.95)]);
    tracker.observe(&[]);
    clock.advance(Duration::from_secs(2));
    tracker.stop();

    let summary = tracker.summarize(1, 2);

    assert_eq!(summary.ticks_observed, 2);
    assert_eq!(summary.ticks_credited, 1);
    assert_eq!(summary.ticks_skipped, 1);
    assert_eq!(summary.ticks_failed, 2);
    assert_eq!(summary.total_elapsed_seconds, 2.0);
    assert_eq!(summary.entries.len(), 1);
    assert!(summary.to_display_lines()[1].starts_with("Sit: 1.0s"));
}
