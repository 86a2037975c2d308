//! Logging utilities for pipeline output and progress tracking
//!
//! This module provides consistent log lines for table files, mapping tables and
//! per-patient data problems, and progress bars for cohort processing.

pub mod log;
pub mod progress;

pub use self::log::{log_mapping_warning, log_patient_issue, log_table_complete, log_table_start};
pub use self::progress::{create_cohort_progress_bar, create_spinner, finish_progress_bar};
