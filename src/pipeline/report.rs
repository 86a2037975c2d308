//! Run report: per-patient issues and cohort counts

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PatoError;

/// Kind of problem found in a patient's data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// A required column is missing from the row
    MissingColumn,
    /// Sibling list columns differ in length
    Integrity,
    /// A received date could not be parsed
    DateParse,
    /// Any other per-patient failure
    Other,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingColumn => "missing column",
            Self::Integrity => "integrity violation",
            Self::DateParse => "unparseable date",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// One problem found in one patient's data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    /// Patient the row belongs to
    pub patient_id: String,
    /// Column involved, if known
    pub column: Option<String>,
    /// Raw value involved, if any
    pub raw_value: Option<String>,
    /// Problem kind
    pub kind: IssueKind,
    /// Human readable description
    pub message: String,
}

impl RowIssue {
    /// Build an issue from a pipeline error
    #[must_use]
    pub fn from_error(patient_id: &str, error: &PatoError) -> Self {
        let (kind, raw_value) = match error {
            PatoError::ColumnNotFound { .. } => (IssueKind::MissingColumn, None),
            PatoError::Integrity { .. } => (IssueKind::Integrity, None),
            PatoError::DateParse { value, .. } => (IssueKind::DateParse, Some(value.clone())),
            _ => (IssueKind::Other, None),
        };
        Self {
            patient_id: patient_id.to_string(),
            column: error.column().map(str::to_string),
            raw_value,
            kind,
            message: error.to_string(),
        }
    }

    /// Whether the issue stopped the patient from being processed
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            IssueKind::MissingColumn | IssueKind::Integrity | IssueKind::Other
        )
    }
}

/// Counts gathered while processing one patient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientCounts {
    /// Observations (list positions) in the row
    pub observations: usize,
    /// Observations left after filtering
    pub observations_kept: usize,
    /// Sections turned into structured records
    pub sections_parsed: usize,
    /// Sections skipped for having too few lines
    pub sections_skipped: usize,
    /// Observations skipped for an unparseable date
    pub dates_failed: usize,
    /// Episodes after consolidation
    pub episodes: usize,
}

impl std::ops::AddAssign for PatientCounts {
    fn add_assign(&mut self, other: Self) {
        self.observations += other.observations;
        self.observations_kept += other.observations_kept;
        self.sections_parsed += other.sections_parsed;
        self.sections_skipped += other.sections_skipped;
        self.dates_failed += other.dates_failed;
        self.episodes += other.episodes;
    }
}

/// Summary of a cohort run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Patients (rows) processed
    pub patients: usize,
    /// Patients that could not be processed at all
    pub patients_failed: usize,
    /// Totals over all patients
    pub counts: PatientCounts,
    /// Initial episodes
    pub initial_episodes: usize,
    /// Recurrence episodes
    pub recurrence_episodes: usize,
    /// Every issue found, in patient order
    pub issues: Vec<RowIssue>,
}

impl RunReport {
    /// Number of issues of one kind
    #[must_use]
    pub fn issue_count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }

    /// Whether the run found no issues
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Printable multi-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Pathology Episode Summary:\n");
        summary.push_str(&format!("  Patients: {}\n", self.patients));
        summary.push_str(&format!("  Patients Failed: {}\n", self.patients_failed));
        summary.push_str(&format!(
            "  Observations Kept: {} of {}\n",
            self.counts.observations_kept, self.counts.observations
        ));
        summary.push_str(&format!(
            "  Sections Parsed: {}\n",
            self.counts.sections_parsed
        ));
        summary.push_str(&format!(
            "  Sections Skipped (fewer than 3 lines): {}\n",
            self.counts.sections_skipped
        ));
        summary.push_str(&format!(
            "  Unparseable Dates: {}\n",
            self.counts.dates_failed
        ));
        summary.push_str(&format!(
            "  Integrity Violations: {}\n",
            self.issue_count(IssueKind::Integrity)
        ));
        summary.push_str(&format!(
            "  Missing Columns: {}\n",
            self.issue_count(IssueKind::MissingColumn)
        ));
        summary.push_str(&format!("  Episodes: {}\n", self.counts.episodes));
        summary.push_str(&format!("  Initial Episodes: {}\n", self.initial_episodes));
        summary.push_str(&format!(
            "  Recurrence Episodes: {}\n",
            self.recurrence_episodes
        ));

        if self.patients > 0 {
            let avg_episodes = self.counts.episodes as f64 / self.patients as f64;
            summary.push_str(&format!("  Average Episodes per Patient: {avg_episodes:.2}\n"));
        }

        summary
    }
}
