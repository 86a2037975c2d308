//! Core filtering of parallel records

use chrono::NaiveDate;
use log::{debug, warn};

use crate::error::Result;
use crate::filter::predicate::KeepPredicate;
use crate::models::{ParallelRecord, Row};
use crate::utils::date::{DateFormatConfig, parse_date_string};
use crate::utils::logging::log_patient_issue;

/// Remove every position whose driver value fails the predicate
///
/// # Arguments
/// * `record` - The record to filter
/// * `driver` - Column whose values the predicate is evaluated on
/// * `dependents` - Columns that must be present alongside the driver
/// * `keep` - The keep predicate
///
/// # Returns
/// The record with the failing positions removed from every column. Retained
/// positions keep their relative order.
///
/// # Errors
/// Returns `ColumnNotFound` if the driver or a dependent column is missing
pub fn filter_parallel<P>(
    mut record: ParallelRecord,
    driver: &str,
    dependents: &[&str],
    keep: &P,
) -> Result<ParallelRecord>
where
    P: KeepPredicate + ?Sized,
{
    for dependent in dependents {
        record.require_column(dependent)?;
    }

    let drop: Vec<usize> = record
        .require_column(driver)?
        .iter()
        .enumerate()
        .filter(|(_, value)| !keep.keep(value))
        .map(|(position, _)| position)
        .collect();

    if !drop.is_empty() {
        debug!(
            "Row {}: dropping {} of {} positions on '{driver}'",
            record.row_id(),
            drop.len(),
            record.len()
        );
    }
    record.remove_positions(&drop);
    Ok(record)
}

/// Filter the driver and dependent columns of a row in place
///
/// Columns not named are left untouched.
///
/// # Errors
/// Returns `ColumnNotFound` for a missing column and `Integrity` when the
/// named columns differ in length
pub fn filter_row<P>(row: &mut Row, driver: &str, dependents: &[&str], keep: &P) -> Result<()>
where
    P: KeepPredicate + ?Sized,
{
    let record = ParallelRecord::from_row(row, driver, dependents)?;
    let filtered = filter_parallel(record, driver, dependents, keep)?;
    filtered.write_to_row(row);
    Ok(())
}

/// Keep only the positions carrying the earliest date
///
/// Positions whose date equals the minimum parseable date are all kept;
/// positions with an unparseable date are dropped and logged. A record with no
/// parseable date at all is returned unchanged.
///
/// # Errors
/// Returns `ColumnNotFound` if `date_column` is missing
pub fn keep_earliest(
    mut record: ParallelRecord,
    date_column: &str,
    formats: &DateFormatConfig,
) -> Result<ParallelRecord> {
    let dates: Vec<Option<NaiveDate>> = record
        .require_column(date_column)?
        .iter()
        .map(|raw| {
            let parsed = parse_date_string(raw, formats);
            if parsed.is_none() && !raw.trim().is_empty() {
                log_patient_issue(record.row_id(), date_column, raw, "unparseable date");
            }
            parsed
        })
        .collect();

    let Some(earliest) = dates.iter().flatten().min().copied() else {
        warn!(
            "Row {}: no parseable date in '{date_column}', keeping all positions",
            record.row_id()
        );
        return Ok(record);
    };

    record.retain_positions(|position| dates[position] == Some(earliest));
    Ok(record)
}
