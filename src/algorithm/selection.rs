//! Earliest occurrence per anchor code

use chrono::NaiveDate;
use log::debug;

use crate::error::Result;
use crate::models::ParallelRecord;
use crate::utils::date::{DateFormatConfig, parse_date_string};

/// Keep, for every anchor code, the earliest position whose driver contains it
///
/// Positions with an unparseable date never qualify. Among positions sharing
/// the earliest date the first one wins. A position selected by several
/// anchors is kept once, and retained positions keep their order; positions
/// no anchor selects are removed from every column.
///
/// # Errors
/// Returns `ColumnNotFound` if the driver or date column is missing
pub fn select_earliest_per_anchor(
    mut record: ParallelRecord,
    driver: &str,
    date_column: &str,
    anchor_codes: &[String],
    formats: &DateFormatConfig,
) -> Result<ParallelRecord> {
    let texts = record.require_column(driver)?;
    let dates: Vec<Option<NaiveDate>> = record
        .require_column(date_column)?
        .iter()
        .map(|raw| parse_date_string(raw, formats))
        .collect();

    let undated = dates.iter().filter(|date| date.is_none()).count();
    if undated > 0 {
        debug!(
            "Row {}: {undated} positions without a parseable '{date_column}' cannot be selected",
            record.row_id()
        );
    }

    let mut selected = vec![false; texts.len()];
    for code in anchor_codes {
        let earliest = texts
            .iter()
            .zip(&dates)
            .enumerate()
            .filter(|(_, (text, _))| text.contains(code.as_str()))
            .filter_map(|(position, (_, date))| date.map(|date| (date, position)))
            .min();

        if let Some((date, position)) = earliest {
            debug!(
                "Row {}: anchor {code} first seen {date} at position {position}",
                record.row_id()
            );
            selected[position] = true;
        }
    }

    record.retain_positions(|position| selected[position]);
    Ok(record)
}
