//! Temporal consolidation of structured records into episodes
//!
//! Records of one patient are sorted by received date and clustered greedily:
//! an episode keeps absorbing the next record while the gap to the most
//! recently absorbed record is below the window. The window therefore slides
//! with the episode; a chain of records each 50 days apart forms one episode
//! under a 60 day window however long the chain is.

use std::fmt::Debug;

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::models::{Episode, StructuredRecord};

/// Resolves a field when a record is absorbed into an episode
///
/// Records are absorbed in ascending date order, so `incoming` is never older
/// than `existing`.
pub trait MergeRule: Debug + Send + Sync {
    /// Merged value of one field
    fn merge(&self, existing: Option<String>, incoming: Option<String>) -> Option<String>;
}

/// Keeps the existing value unless it is missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferNonNull;

impl MergeRule for PreferNonNull {
    fn merge(&self, existing: Option<String>, incoming: Option<String>) -> Option<String> {
        existing.or(incoming)
    }
}

/// Takes the newest (or oldest) value when both are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferByRecency {
    /// Prefer the value of the more recent record
    pub prefer_newest: bool,
}

impl Default for PreferByRecency {
    fn default() -> Self {
        Self {
            prefer_newest: true,
        }
    }
}

impl MergeRule for PreferByRecency {
    fn merge(&self, existing: Option<String>, incoming: Option<String>) -> Option<String> {
        match (existing, incoming) {
            (Some(existing), Some(incoming)) => {
                Some(if self.prefer_newest { incoming } else { existing })
            }
            (existing, incoming) => existing.or(incoming),
        }
    }
}

/// Merge rule selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MergePolicy {
    /// See [`PreferNonNull`]
    PreferNonNull,
    /// See [`PreferByRecency`]
    PreferByRecency {
        /// Prefer the value of the more recent record
        prefer_newest: bool,
    },
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self::PreferByRecency {
            prefer_newest: true,
        }
    }
}

impl MergeRule for MergePolicy {
    fn merge(&self, existing: Option<String>, incoming: Option<String>) -> Option<String> {
        match *self {
            Self::PreferNonNull => PreferNonNull.merge(existing, incoming),
            Self::PreferByRecency { prefer_newest } => {
                PreferByRecency { prefer_newest }.merge(existing, incoming)
            }
        }
    }
}

/// Consolidate records of any number of patients
///
/// Patients are consolidated independently and emitted in order of first
/// appearance; each patient's episodes are in ascending date order.
#[must_use]
pub fn consolidate(
    records: Vec<StructuredRecord>,
    window_days: i64,
    rule: &dyn MergeRule,
    separator: &str,
) -> Vec<Episode> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<StructuredRecord>> = Vec::new();

    for record in records {
        match index.get(&record.patient_id) {
            Some(&slot) => groups[slot].push(record),
            None => {
                index.insert(record.patient_id.clone(), groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups
        .into_iter()
        .flat_map(|group| consolidate_patient(group, window_days, rule, separator))
        .collect()
}

/// Consolidate the records of a single patient
///
/// # Arguments
/// * `records` - The patient's records in any order
/// * `window_days` - A record joins the current episode when it was received
///   fewer than this many days after the episode's latest record
/// * `rule` - Merge rule for field values
/// * `separator` - Joins non-empty remainder texts
#[must_use]
pub fn consolidate_patient(
    mut records: Vec<StructuredRecord>,
    window_days: i64,
    rule: &dyn MergeRule,
    separator: &str,
) -> Vec<Episode> {
    // Stable: same-day records keep their section order
    records.sort_by_key(|record| record.received_date);

    let mut records = records.into_iter();
    let Some(first) = records.next() else {
        return Vec::new();
    };

    let mut episodes = Vec::new();
    let mut current = Episode::from_record(first);

    for record in records {
        let gap = (record.received_date - current.date).num_days();
        if gap < window_days {
            absorb(&mut current, record, rule, separator);
        } else {
            episodes.push(std::mem::replace(&mut current, Episode::from_record(record)));
        }
    }
    episodes.push(current);

    if let Some(episode) = episodes.first() {
        debug!(
            "Patient {}: {} episode(s) from records spanning {} to {}",
            episode.patient_id,
            episodes.len(),
            episode.first_date,
            episodes.last().map_or(episode.date, |last| last.date)
        );
    }
    episodes
}

fn absorb(episode: &mut Episode, record: StructuredRecord, rule: &dyn MergeRule, separator: &str) {
    for (category, incoming) in record.fields {
        let existing = episode.fields.take(&category);
        episode.fields.set(&category, rule.merge(existing, incoming));
    }

    if !record.remainder.is_empty() {
        if !episode.remainder.is_empty() {
            episode.remainder.push_str(separator);
        }
        episode.remainder.push_str(&record.remainder);
    }

    episode.date = record.received_date;
    episode.record_count += 1;
}
