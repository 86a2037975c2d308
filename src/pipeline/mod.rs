//! Cohort pipeline
//!
//! Raw patient rows → filtered parallel records → structured records →
//! episodes per patient → initial/recurrence classification across the
//! cohort. Patients are processed independently on a rayon pool and the
//! results are concatenated in input order.

pub mod patient;
pub mod report;

use std::time::Instant;

use indicatif::ParallelProgressIterator;
use log::info;
use rayon::prelude::*;

use crate::algorithm::classify;
use crate::config::PipelineConfig;
use crate::error::{PatoError, Result};
use crate::filter::ContainsAnyCode;
use crate::mapping::CodeMapping;
use crate::models::{EpisodeClassification, Table};
use crate::parser::{DiagnosisParser, PatternExtractor};
use crate::utils::logging::{create_cohort_progress_bar, finish_progress_bar};

pub use patient::{PatientOutcome, process_patient};
pub use report::{IssueKind, PatientCounts, RowIssue, RunReport};

/// Read-only state shared by all workers
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Run configuration
    pub config: PipelineConfig,
    /// Category mapping table
    pub mapping: CodeMapping,
    /// Remainder-text extractors
    pub extractors: Vec<PatternExtractor>,
    /// Predicate on the diagnosis column
    pub keep: ContainsAnyCode,
    /// Codes for the earliest-per-anchor selection
    pub anchor_codes: Vec<String>,
}

impl PipelineContext {
    /// Resolve mapping, extractors and codes from a configuration
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the mapping file
    /// cannot be loaded
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let mapping = config.load_mapping()?;
        let extractors = config.preset.extractors()?;
        let keep = ContainsAnyCode::new(config.effective_keep_codes());
        let anchor_codes = config.effective_anchor_codes();

        Ok(Self {
            config,
            mapping,
            extractors,
            keep,
            anchor_codes,
        })
    }

    /// Parser over this context's mapping and extractors
    #[must_use]
    pub fn parser(&self) -> DiagnosisParser<'_> {
        DiagnosisParser::new(&self.mapping, &self.extractors)
    }

    /// Output field names: mapping categories, then extractor categories
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.parser().field_names()
    }
}

/// Classified episodes and the report of a cohort run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Initial and recurrence episodes
    pub classification: EpisodeClassification,
    /// Counts and issues
    pub report: RunReport,
}

/// Process every patient of a table
///
/// # Errors
/// Returns an error only if the worker pool cannot be built; per-patient
/// problems end up in the report.
pub fn run_cohort(table: &Table, ctx: &PipelineContext) -> Result<PipelineOutput> {
    let start = Instant::now();

    let outcomes = match ctx.config.num_threads {
        Some(num_threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| PatoError::config(format!("Failed to build worker pool: {e}")))?;
            info!("Processing {} patients on {num_threads} threads", table.len());
            pool.install(|| process_all(table, ctx))
        }
        None => {
            info!(
                "Processing {} patients on {} threads",
                table.len(),
                rayon::current_num_threads()
            );
            process_all(table, ctx)
        }
    };

    let output = assemble(outcomes);
    info!(
        "Classified {} episodes ({} initial, {} recurrence) in {:?}",
        output.classification.len(),
        output.report.initial_episodes,
        output.report.recurrence_episodes,
        start.elapsed()
    );
    Ok(output)
}

fn process_all(table: &Table, ctx: &PipelineContext) -> Vec<PatientOutcome> {
    let pb = create_cohort_progress_bar(
        table.len() as u64,
        Some("Extracting episodes"),
        ctx.config.show_progress,
    );

    let outcomes: Vec<PatientOutcome> = table
        .rows()
        .par_iter()
        .progress_with(pb.clone())
        .map(|row| process_patient(row, ctx))
        .collect();

    finish_progress_bar(&pb, Some("Extraction complete"));
    outcomes
}

/// Merge per-patient outcomes, in order, into the classified output
fn assemble(outcomes: Vec<PatientOutcome>) -> PipelineOutput {
    let mut report = RunReport {
        patients: outcomes.len(),
        ..RunReport::default()
    };
    let mut episodes = Vec::new();

    for outcome in outcomes {
        if outcome.is_failed() {
            report.patients_failed += 1;
        }
        report.counts += outcome.counts;
        report.issues.extend(outcome.issues);
        episodes.extend(outcome.episodes);
    }

    let classification = classify(episodes);
    report.initial_episodes = classification.initial.len();
    report.recurrence_episodes = classification.recurrence.len();

    PipelineOutput {
        classification,
        report,
    }
}
