//! Per-patient processing
//!
//! Filter the patient's co-indexed columns, parse every kept diagnosis text
//! and consolidate the resulting records into episodes. Nothing here touches
//! another patient's data, so patients can be processed on any thread.

use log::debug;

use crate::algorithm::{consolidate_patient, select_earliest_per_anchor};
use crate::error::{PatoError, Result};
use crate::filter::{filter_parallel, keep_earliest};
use crate::models::{Episode, ParallelRecord, Row, StructuredRecord};
use crate::pipeline::PipelineContext;
use crate::pipeline::report::{PatientCounts, RowIssue};
use crate::utils::date::parse_date_string;
use crate::utils::logging::log_patient_issue;

/// Result of processing one patient
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientOutcome {
    /// Patient identifier
    pub patient_id: String,
    /// Consolidated episodes in date order
    pub episodes: Vec<Episode>,
    /// Processing counts
    pub counts: PatientCounts,
    /// Problems found; the patient has no episodes if one of them is fatal
    pub issues: Vec<RowIssue>,
}

impl PatientOutcome {
    fn failed(patient_id: &str, counts: PatientCounts, error: &PatoError) -> Self {
        let issue = RowIssue::from_error(patient_id, error);
        log::warn!("Patient {patient_id} skipped: {}", issue.message);
        Self {
            patient_id: patient_id.to_string(),
            episodes: Vec::new(),
            counts,
            issues: vec![issue],
        }
    }

    /// Whether the patient could not be processed
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.issues.iter().any(RowIssue::is_fatal)
    }
}

/// Process one patient row
///
/// Failures are captured in the outcome rather than returned, so one bad row
/// never stops the cohort.
#[must_use]
pub fn process_patient(row: &Row, ctx: &PipelineContext) -> PatientOutcome {
    let mut counts = PatientCounts::default();
    let mut issues = Vec::new();

    let record = match select_observations(row, ctx, &mut counts, &mut issues) {
        Ok(record) => record,
        Err(error) => return PatientOutcome::failed(&row.id, counts, &error),
    };

    let records = match parse_observations(&record, ctx, &mut counts, &mut issues) {
        Ok(records) => records,
        Err(error) => return PatientOutcome::failed(&row.id, counts, &error),
    };

    let config = &ctx.config;
    let episodes = consolidate_patient(
        records,
        config.window_days,
        &config.merge_policy,
        &config.remainder_separator,
    );
    counts.episodes = episodes.len();

    PatientOutcome {
        patient_id: row.id.clone(),
        episodes,
        counts,
        issues,
    }
}

/// Build the patient's parallel record and apply the configured filters
///
/// The earliest-date selections cannot place an observation without a date,
/// so when one of them is enabled such observations are reported and removed
/// first.
fn select_observations(
    row: &Row,
    ctx: &PipelineContext,
    counts: &mut PatientCounts,
    issues: &mut Vec<RowIssue>,
) -> Result<ParallelRecord> {
    let config = &ctx.config;
    let driver = config.diagnosis_column.as_str();

    let mut columns = vec![config.date_column.as_str()];
    for dependent in config.dependent_column_refs() {
        if row.contains(dependent) {
            columns.push(dependent);
        } else {
            debug!("Patient {}: no '{dependent}' column, not tracked", row.id);
        }
    }

    let record = ParallelRecord::from_row(row, driver, &columns)?;
    counts.observations = record.len();

    let mut record = filter_parallel(record, driver, &columns, &ctx.keep)?;
    if config.keep_earliest_only || config.earliest_per_anchor {
        let undated: Vec<usize> = record
            .require_column(&config.date_column)?
            .iter()
            .enumerate()
            .filter(|(_, raw)| parse_date_string(raw, &config.date_formats).is_none())
            .map(|(position, raw)| {
                record_date_failure(record.row_id(), &config.date_column, raw, counts, issues);
                position
            })
            .collect();
        record.remove_positions(&undated);
    }
    if config.keep_earliest_only {
        record = keep_earliest(record, &config.date_column, &config.date_formats)?;
    }
    if config.earliest_per_anchor {
        record = select_earliest_per_anchor(
            record,
            driver,
            &config.date_column,
            &ctx.anchor_codes,
            &config.date_formats,
        )?;
    }

    counts.observations_kept = record.len();
    Ok(record)
}

/// Parse every kept diagnosis text into structured records
fn parse_observations(
    record: &ParallelRecord,
    ctx: &PipelineContext,
    counts: &mut PatientCounts,
    issues: &mut Vec<RowIssue>,
) -> Result<Vec<StructuredRecord>> {
    let config = &ctx.config;
    let texts = record.require_column(&config.diagnosis_column)?;
    let dates = record.require_column(&config.date_column)?;
    let parser = ctx.parser();

    let mut records = Vec::new();
    for (text, raw_date) in texts.iter().zip(dates) {
        let Some(received_date) = parse_date_string(raw_date, &config.date_formats) else {
            record_date_failure(record.row_id(), &config.date_column, raw_date, counts, issues);
            continue;
        };

        let outcome = parser.parse(text, record.row_id(), received_date);
        counts.sections_parsed += outcome.records.len();
        counts.sections_skipped += outcome.skipped_sections;
        records.extend(outcome.records);
    }

    Ok(records)
}

/// Log and count an observation skipped for an unparseable date
fn record_date_failure(
    patient_id: &str,
    column: &str,
    raw: &str,
    counts: &mut PatientCounts,
    issues: &mut Vec<RowIssue>,
) {
    log_patient_issue(patient_id, column, raw, "unparseable date, observation skipped");
    issues.push(RowIssue::from_error(
        patient_id,
        &PatoError::DateParse {
            value: raw.to_string(),
            column: column.to_string(),
        },
    ));
    counts.dates_failed += 1;
}
