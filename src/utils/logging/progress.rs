//! Progress reporting utilities for long-running operations
//!
//! This module provides standardized progress reporting functionality
//! for cohort processing, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Default style for the cohort progress bar
pub const DEFAULT_COHORT_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} patients ({per_sec}) {msg}";

/// Create a progress bar counting processed patients
///
/// Returns a hidden bar when `visible` is false, so callers can tick it
/// unconditionally.
#[must_use]
pub fn create_cohort_progress_bar(patients: u64, description: Option<&str>, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(patients);
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_COHORT_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Create a spinner progress bar for operations without a known length
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {elapsed_precise} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);

    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }

    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Finish a progress bar with a completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish_and_clear();
    }
}
