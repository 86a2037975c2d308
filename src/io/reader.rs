//! Cohort reader
//!
//! Two layouts are accepted and may be mixed:
//!
//! * one row per patient with `List<Utf8>` columns (or Utf8 columns holding
//!   string-encoded list literals such as `['a', 'b']`), and
//! * one row per observation with scalar columns.
//!
//! Rows sharing a patient id are folded together by appending their values,
//! so a patient's sequences stay co-indexed in file order.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, ListArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rustc_hash::FxHashMap;

use crate::config::PipelineConfig;
use crate::error::util::safe_open_file;
use crate::error::{PatoError, Result};
use crate::models::{Cell, Row, Table};
use crate::utils::list_literal::{is_list_literal, parse_list_literal};
use crate::utils::logging::{log_table_complete, log_table_start};

/// Read a pathology extract into one row per patient
///
/// # Arguments
/// * `path` - Parquet file to read
/// * `config` - Supplies the patient id column
///
/// # Errors
/// Returns an error if the file cannot be read or lacks the patient column
pub fn read_cohort(path: &Path, config: &PipelineConfig) -> Result<Table> {
    let start = Instant::now();
    log_table_start("Reading", "cohort", path);

    let file = safe_open_file(path, "cohort file")?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows: Vec<Row> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for batch in reader {
        let batch = batch?;
        for row in record_batch_to_rows(&batch, &config.patient_column)? {
            match index.get(&row.id) {
                Some(&slot) => append_row(&mut rows[slot], row),
                None => {
                    index.insert(row.id.clone(), rows.len());
                    rows.push(row);
                }
            }
        }
    }

    log_table_complete("Read", "patient", path, rows.len(), start.elapsed());
    Ok(Table::from_rows(rows))
}

/// Convert one record batch into rows keyed by the patient column
///
/// Rows are returned in batch order; rows of the same patient are not folded.
/// Rows with a null patient id are skipped.
pub fn record_batch_to_rows(batch: &RecordBatch, patient_column: &str) -> Result<Vec<Row>> {
    let schema = batch.schema();
    let patient_idx = schema.index_of(patient_column).map_err(|_| {
        PatoError::config(format!(
            "Input has no patient column '{patient_column}'"
        ))
    })?;

    let ids = as_strings(batch.column(patient_idx))?;
    let columns: Vec<(String, ColumnValues)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != patient_idx)
        .map(|(idx, field)| -> Result<(String, ColumnValues)> {
            Ok((field.name().clone(), ColumnValues::new(batch.column(idx))?))
        })
        .collect::<Result<_>>()?;

    let mut rows = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        if ids.is_null(i) {
            log::debug!("Skipping row {i} without a patient id");
            continue;
        }

        let mut row = Row::new(ids.value(i));
        for (name, values) in &columns {
            row.insert(name, values.cell(i));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Column values normalized to strings
enum ColumnValues {
    Scalar(StringArray),
    List(ListArray),
}

impl ColumnValues {
    fn new(array: &ArrayRef) -> Result<Self> {
        match array.data_type() {
            DataType::List(_) | DataType::LargeList(_) => {
                let item = Arc::new(Field::new("item", DataType::Utf8, true));
                let cast_array = cast(array, &DataType::List(item))?;
                let list = cast_array
                    .as_any()
                    .downcast_ref::<ListArray>()
                    .ok_or_else(|| PatoError::Other("List column did not cast to a list".into()))?
                    .clone();
                Ok(Self::List(list))
            }
            _ => Ok(Self::Scalar(as_strings(array)?)),
        }
    }

    fn cell(&self, i: usize) -> Cell {
        match self {
            Self::List(list) => {
                if list.is_null(i) {
                    return Cell::Null;
                }
                let values = list.value(i);
                let Some(strings) = values.as_any().downcast_ref::<StringArray>() else {
                    return Cell::Null;
                };
                Cell::List(
                    (0..strings.len())
                        .map(|j| {
                            if strings.is_null(j) {
                                String::new()
                            } else {
                                strings.value(j).to_string()
                            }
                        })
                        .collect(),
                )
            }
            Self::Scalar(strings) => {
                // Nulls stay positional so flat rows keep their columns aligned
                if strings.is_null(i) {
                    return Cell::Text(String::new());
                }
                let value = strings.value(i);
                if is_list_literal(value) {
                    if let Some(values) = parse_list_literal(value) {
                        return Cell::List(values);
                    }
                }
                Cell::Text(value.to_string())
            }
        }
    }
}

fn as_strings(array: &ArrayRef) -> Result<StringArray> {
    let cast_array = cast(array, &DataType::Utf8)?;
    cast_array
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| PatoError::Other(format!("Cannot read {} as text", array.data_type())))
}

fn append_row(target: &mut Row, incoming: Row) {
    for name in incoming.column_names().to_vec() {
        let Some(cell) = incoming.get(&name) else {
            continue;
        };
        let merged = match target.get(&name) {
            Some(existing) => {
                let mut values = existing.to_sequence();
                values.extend(cell.to_sequence());
                Cell::List(values)
            }
            None => cell.clone(),
        };
        target.insert(&name, merged);
    }
}
