//! Diagnosis episodes and their initial/recurrence classification

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::record::{ExtractedFields, StructuredRecord};

/// Consolidated clinical event for one patient
///
/// Built from one or more [`StructuredRecord`]s whose received dates lie
/// within the clustering window of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Patient identifier (CPR)
    pub patient_id: String,
    /// Date of the most recently absorbed record
    pub date: NaiveDate,
    /// Date of the record the episode started from
    pub first_date: NaiveDate,
    /// Number of records absorbed, including the first
    pub record_count: usize,
    /// Resolved field values
    pub fields: ExtractedFields,
    /// Remainder texts of the absorbed records, joined
    pub remainder: String,
}

impl Episode {
    /// Start an episode from a single record
    #[must_use]
    pub fn from_record(record: StructuredRecord) -> Self {
        Self {
            patient_id: record.patient_id,
            date: record.received_date,
            first_date: record.received_date,
            record_count: 1,
            fields: record.fields,
            remainder: record.remainder,
        }
    }

    /// Days between the first and the last absorbed record
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.date - self.first_date).num_days()
    }

    /// Value of a resolved category
    #[must_use]
    pub fn field(&self, category: &str) -> Option<&str> {
        self.fields.get(category)
    }
}

/// Partition of episodes into initial diagnoses and recurrences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeClassification {
    /// Episodes carrying their patient's earliest date
    ///
    /// A patient has more than one initial episode when several episodes
    /// share the earliest date.
    pub initial: Vec<Episode>,
    /// All other episodes
    pub recurrence: Vec<Episode>,
}

impl EpisodeClassification {
    /// Total number of classified episodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.initial.len() + self.recurrence.len()
    }

    /// Whether no episodes were classified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.initial.is_empty() && self.recurrence.is_empty()
    }

    /// Initial episodes of one patient
    #[must_use]
    pub fn initial_for(&self, patient_id: &str) -> Vec<&Episode> {
        self.initial
            .iter()
            .filter(|e| e.patient_id == patient_id)
            .collect()
    }

    /// Recurrence episodes of one patient
    #[must_use]
    pub fn recurrences_for(&self, patient_id: &str) -> Vec<&Episode> {
        self.recurrence
            .iter()
            .filter(|e| e.patient_id == patient_id)
            .collect()
    }
}
