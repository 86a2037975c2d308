//! Log lines for table files, mapping tables and patient data problems

use std::path::Path;
use std::time::Duration;

/// Log that a cohort or episode table is about to be read or written
///
/// `table` names the rows, e.g. `cohort` or `episode`.
pub fn log_table_start(verb: &str, table: &str, path: &Path) {
    log::info!("{verb} {table} table {}", path.display());
}

/// Log the row count and duration of a finished table read or write
///
/// For the cohort `rows` counts patients after folding; for episode files it
/// counts episodes.
pub fn log_table_complete(verb: &str, table: &str, path: &Path, rows: usize, elapsed: Duration) {
    log::info!(
        "{verb} {rows} {table} rows ({}) in {:.2?}",
        path.display(),
        elapsed
    );
}

/// Log a problem with one category of a loaded mapping table
pub fn log_mapping_warning(category: &str, message: &str) {
    log::warn!("Mapping category '{category}': {message}");
}

/// Log a data problem for one patient with enough context for manual triage
///
/// # Arguments
/// * `patient_id` - Patient the offending value belongs to
/// * `column` - Column the value was read from
/// * `raw_value` - The raw cell value, shortened for the log line
/// * `message` - What went wrong
pub fn log_patient_issue(patient_id: &str, column: &str, raw_value: &str, message: &str) {
    const MAX_VALUE_CHARS: usize = 80;

    let shown: String = raw_value.chars().take(MAX_VALUE_CHARS).collect();
    let ellipsis = if raw_value.chars().count() > MAX_VALUE_CHARS {
        "..."
    } else {
        ""
    };
    log::warn!("Patient {patient_id}, column '{column}': {message} (value: '{shown}{ellipsis}')");
}
