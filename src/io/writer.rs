//! Episode writer

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;

use crate::error::{PatoError, Result};
use crate::models::Episode;
use crate::utils::logging::{log_table_complete, log_table_start};

/// Days from 0001-01-01 to the Unix epoch
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn to_date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Schema of an episode table with one nullable text column per category
#[must_use]
pub fn episode_schema(categories: &[String]) -> Schema {
    let mut fields = vec![
        Field::new("patient_id", DataType::Utf8, false),
        Field::new("diagnosis_date", DataType::Date32, false),
        Field::new("first_date", DataType::Date32, false),
        Field::new("record_count", DataType::UInt64, false),
    ];
    fields.extend(
        categories
            .iter()
            .map(|category| Field::new(category, DataType::Utf8, true)),
    );
    fields.push(Field::new("remainder", DataType::Utf8, false));
    Schema::new(fields)
}

/// Build a record batch from episodes
///
/// # Errors
/// Returns an error if a category is named like a fixed column or the batch
/// cannot be assembled
pub fn episodes_to_record_batch(episodes: &[Episode], categories: &[String]) -> Result<RecordBatch> {
    const FIXED: [&str; 5] = [
        "patient_id",
        "diagnosis_date",
        "first_date",
        "record_count",
        "remainder",
    ];
    if let Some(clash) = categories.iter().find(|c| FIXED.contains(&c.as_str())) {
        return Err(PatoError::config(format!(
            "Category '{clash}' clashes with a fixed episode column"
        )));
    }

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            episodes.iter().map(|e| e.patient_id.as_str()),
        )),
        Arc::new(Date32Array::from_iter_values(
            episodes.iter().map(|e| to_date32(e.date)),
        )),
        Arc::new(Date32Array::from_iter_values(
            episodes.iter().map(|e| to_date32(e.first_date)),
        )),
        Arc::new(UInt64Array::from_iter_values(
            episodes.iter().map(|e| e.record_count as u64),
        )),
    ];
    for category in categories {
        let values: StringArray = episodes.iter().map(|e| e.field(category)).collect();
        columns.push(Arc::new(values));
    }
    columns.push(Arc::new(StringArray::from_iter_values(
        episodes.iter().map(|e| e.remainder.as_str()),
    )));

    Ok(RecordBatch::try_new(
        Arc::new(episode_schema(categories)),
        columns,
    )?)
}

/// Write episodes to a Parquet file
///
/// # Errors
/// Returns an error if the batch cannot be built or the file cannot be written
pub fn write_episodes(path: &Path, episodes: &[Episode], categories: &[String]) -> Result<()> {
    let start = std::time::Instant::now();
    log_table_start("Writing", "episode", path);

    let batch = episodes_to_record_batch(episodes, categories)?;
    let file = File::create(path).map_err(|e| {
        PatoError::file(path, format!("Failed to create episode file ({e})"))
    })?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    log_table_complete("Wrote", "episode", path, episodes.len(), start.elapsed());
    Ok(())
}
