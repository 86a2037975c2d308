//! Extraction of coded findings from pathology diagnosis text and their
//! consolidation into per-patient diagnosis episodes.
//!
//! The pipeline runs per patient: the co-indexed pathology columns are
//! filtered on the diagnosis text, every kept text is parsed into structured
//! records, records close in time are merged into episodes, and finally each
//! patient's earliest episodes are marked initial and the rest recurrences.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod mapping;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;

// Core types
pub use config::{PipelineConfig, Preset};
pub use error::{PatoError, Result};
pub use mapping::{Category, CodeMapping};
pub use models::{
    Cell, Episode, EpisodeClassification, ExtractedFields, ParallelRecord, Row, StructuredRecord,
    Table,
};

// Parsing and filtering
pub use filter::{ContainsAnyCode, KeepPredicate, StartsWithAnyPrefix, filter_parallel, filter_row};
pub use parser::{DiagnosisParser, ParseOutcome, PatternExtractor};

// Episode algorithms
pub use algorithm::{MergePolicy, MergeRule, PreferByRecency, PreferNonNull, classify, consolidate};

// Cohort processing
pub use pipeline::{PipelineContext, PipelineOutput, RunReport, process_patient, run_cohort};
