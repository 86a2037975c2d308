//! Episode algorithms
//!
//! Temporal consolidation of a patient's structured records into episodes,
//! classification of episodes into initial diagnoses and recurrences, and the
//! earliest-occurrence selection used before parsing.

pub mod classification;
pub mod consolidation;
pub mod selection;

pub use classification::classify;
pub use consolidation::{
    MergePolicy, MergeRule, PreferByRecency, PreferNonNull, consolidate, consolidate_patient,
};
pub use selection::select_earliest_per_anchor;
