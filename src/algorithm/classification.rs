//! Initial vs. recurrence classification

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::models::{Episode, EpisodeClassification};

/// Split episodes into initial diagnoses and recurrences
///
/// An episode is initial when its date equals the earliest episode date of its
/// patient. Several episodes sharing that date are all initial. Input order is
/// kept within both partitions.
#[must_use]
pub fn classify(episodes: Vec<Episode>) -> EpisodeClassification {
    let mut earliest: FxHashMap<String, NaiveDate> = FxHashMap::default();
    for episode in &episodes {
        earliest
            .entry(episode.patient_id.clone())
            .and_modify(|date| *date = (*date).min(episode.date))
            .or_insert(episode.date);
    }

    let (initial, recurrence): (Vec<Episode>, Vec<Episode>) = episodes
        .into_iter()
        .partition(|episode| earliest.get(&episode.patient_id) == Some(&episode.date));

    EpisodeClassification {
        initial,
        recurrence,
    }
}
