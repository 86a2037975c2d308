//! Tests for initial/recurrence classification

use crate::utils::{date, dated};
use pato_episodes::{Episode, PreferNonNull, classify, consolidate};

fn episode(patient: &str, year: i32, month: u32, day: u32) -> Episode {
    Episode::from_record(dated(patient, date(year, month, day)))
}

#[test]
fn test_earliest_episode_is_initial() {
    let classification = classify(vec![episode("X", 2021, 4, 1), episode("X", 2021, 1, 1)]);

    assert_eq!(classification.initial.len(), 1);
    assert_eq!(classification.initial[0].date, date(2021, 1, 1));
    assert_eq!(classification.recurrence.len(), 1);
    assert_eq!(classification.recurrence[0].date, date(2021, 4, 1));
}

#[test]
fn test_shared_minimum_date_gives_two_initials() {
    let classification = classify(vec![
        episode("X", 2021, 1, 1),
        episode("X", 2021, 1, 1),
        episode("X", 2021, 5, 1),
    ]);

    assert_eq!(classification.initial_for("X").len(), 2);
    assert_eq!(classification.recurrences_for("X").len(), 1);
}

#[test]
fn test_partition_per_patient() {
    let episodes = vec![
        episode("A", 2020, 3, 1),
        episode("B", 2019, 1, 1),
        episode("A", 2020, 1, 1),
        episode("B", 2022, 1, 1),
        episode("C", 2018, 7, 7),
    ];
    let total = episodes.len();

    let classification = classify(episodes);
    assert_eq!(classification.len(), total);

    for patient in ["A", "B", "C"] {
        let initial = classification.initial_for(patient);
        assert!(!initial.is_empty());
        let min = initial.iter().map(|e| e.date).min().unwrap();
        assert!(initial.iter().all(|e| e.date == min));
        assert!(
            classification
                .recurrences_for(patient)
                .iter()
                .all(|e| e.date > min)
        );
    }

    // Input order is kept within a partition
    let initial_ids: Vec<_> = classification
        .initial
        .iter()
        .map(|e| e.patient_id.as_str())
        .collect();
    assert_eq!(initial_ids, vec!["B", "A", "C"]);
}

#[test]
fn test_classify_consolidated_episodes() {
    let records = vec![
        dated("X", date(2021, 1, 1)),
        dated("X", date(2021, 1, 20)),
        dated("X", date(2021, 4, 1)),
    ];
    let classification = classify(consolidate(records, 60, &PreferNonNull, "; "));

    assert_eq!(classification.initial.len(), 1);
    assert_eq!(classification.initial[0].first_date, date(2021, 1, 1));
    assert_eq!(classification.recurrence.len(), 1);
}

#[test]
fn test_empty_classification() {
    let classification = classify(Vec::new());
    assert!(classification.is_empty());
}
