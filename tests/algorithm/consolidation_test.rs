//! Tests for temporal consolidation

use crate::utils::{date, dated, record};
use pato_episodes::algorithm::consolidate_patient;
use pato_episodes::{MergePolicy, PreferByRecency, PreferNonNull, consolidate};

#[test]
fn test_records_within_window_merge() {
    let records = vec![
        dated("X", date(2021, 1, 1)),
        dated("X", date(2021, 1, 20)),
        dated("X", date(2021, 4, 1)),
    ];

    let episodes = consolidate(records, 60, &PreferNonNull, "; ");
    assert_eq!(episodes.len(), 2);

    assert_eq!(episodes[0].first_date, date(2021, 1, 1));
    assert_eq!(episodes[0].date, date(2021, 1, 20));
    assert_eq!(episodes[0].record_count, 2);
    assert_eq!(episodes[0].span_days(), 19);

    assert_eq!(episodes[1].first_date, date(2021, 4, 1));
    assert_eq!(episodes[1].date, date(2021, 4, 1));
    assert_eq!(episodes[1].record_count, 1);
}

#[test]
fn test_window_slides_with_last_absorbed_record() {
    // Each gap is 50 days; the span is 150 days
    let records = vec![
        dated("X", date(2021, 1, 1)),
        dated("X", date(2021, 2, 20)),
        dated("X", date(2021, 4, 11)),
        dated("X", date(2021, 5, 31)),
    ];

    let episodes = consolidate(records, 60, &PreferNonNull, "; ");
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].record_count, 4);
    assert_eq!(episodes[0].span_days(), 150);
}

#[test]
fn test_gap_equal_to_window_splits() {
    let records = vec![dated("X", date(2021, 1, 1)), dated("X", date(2021, 3, 2))];
    assert_eq!((date(2021, 3, 2) - date(2021, 1, 1)).num_days(), 60);

    let episodes = consolidate(records, 60, &PreferNonNull, "; ");
    assert_eq!(episodes.len(), 2);
}

#[test]
fn test_zero_window_never_merges() {
    let records = vec![dated("X", date(2021, 1, 1)), dated("X", date(2021, 1, 1))];
    assert_eq!(consolidate(records, 0, &PreferNonNull, "; ").len(), 2);
}

#[test]
fn test_unordered_input_is_sorted() {
    let records = vec![
        dated("X", date(2021, 4, 1)),
        dated("X", date(2021, 1, 1)),
        dated("X", date(2021, 1, 20)),
    ];

    let episodes = consolidate(records, 60, &PreferNonNull, "; ");
    let dates: Vec<_> = episodes.iter().map(|e| (e.first_date, e.date)).collect();
    assert_eq!(
        dates,
        vec![
            (date(2021, 1, 1), date(2021, 1, 20)),
            (date(2021, 4, 1), date(2021, 4, 1)),
        ]
    );
}

#[test]
fn test_prefer_newest_and_oldest() {
    let records = || {
        vec![
            record("X", date(2021, 1, 1), &[("TStage", Some("pT1")), ("NStage", None)], ""),
            record("X", date(2021, 1, 10), &[("TStage", Some("pT2")), ("NStage", Some("pN0"))], ""),
            record("X", date(2021, 1, 20), &[("TStage", None), ("NStage", Some("pN1"))], ""),
        ]
    };

    let newest = consolidate(
        records(),
        60,
        &PreferByRecency {
            prefer_newest: true,
        },
        "; ",
    );
    assert_eq!(newest[0].field("TStage"), Some("pT2"));
    assert_eq!(newest[0].field("NStage"), Some("pN1"));

    let oldest = consolidate(
        records(),
        60,
        &PreferByRecency {
            prefer_newest: false,
        },
        "; ",
    );
    assert_eq!(oldest[0].field("TStage"), Some("pT1"));
    assert_eq!(oldest[0].field("NStage"), Some("pN0"));

    let non_null = consolidate(records(), 60, &MergePolicy::PreferNonNull, "; ");
    assert_eq!(non_null[0].field("TStage"), Some("pT1"));
    assert_eq!(non_null[0].field("NStage"), Some("pN0"));
}

#[test]
fn test_remainders_are_joined() {
    let records = vec![
        record("X", date(2021, 1, 1), &[], "biopsi"),
        record("X", date(2021, 1, 2), &[], ""),
        record("X", date(2021, 1, 3), &[], "resektat"),
    ];

    let episodes = consolidate(records, 60, &PreferNonNull, " | ");
    assert_eq!(episodes[0].remainder, "biopsi | resektat");
}

#[test]
fn test_patients_are_consolidated_independently() {
    let records = vec![
        dated("A", date(2021, 1, 1)),
        dated("B", date(2021, 1, 5)),
        dated("A", date(2021, 1, 10)),
        dated("B", date(2021, 6, 1)),
    ];

    let episodes = consolidate(records, 60, &PreferNonNull, "; ");
    let summary: Vec<_> = episodes
        .iter()
        .map(|e| (e.patient_id.as_str(), e.record_count))
        .collect();
    assert_eq!(summary, vec![("A", 2), ("B", 1), ("B", 1)]);
}

#[test]
fn test_window_properties_hold() {
    let offsets = [0, 3, 70, 71, 130, 200, 259, 400, 401, 402];
    let start = date(2020, 1, 1);
    let records = offsets
        .iter()
        .map(|days| dated("X", start + chrono::Duration::days(*days)))
        .collect::<Vec<_>>();
    let window = 60;

    let episodes = consolidate_patient(records, window, &PreferNonNull, "; ");

    // Never more episodes than records, and every record is absorbed exactly once
    assert!(episodes.len() <= offsets.len());
    assert_eq!(
        episodes.iter().map(|e| e.record_count).sum::<usize>(),
        offsets.len()
    );

    // Consecutive episodes are separated by at least the window
    for pair in episodes.windows(2) {
        assert!((pair[1].first_date - pair[0].date).num_days() >= window);
    }
    assert_eq!(episodes.len(), 4);
}

#[test]
fn test_empty_input() {
    assert!(consolidate(Vec::new(), 60, &PreferNonNull, "; ").is_empty());
}
