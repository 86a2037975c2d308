//! Parquet round trips for the cohort reader and the episode writer

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, Date32Array, ListBuilder, StringArray, StringBuilder, UInt64Array,
};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::utils::{bladder_config, bladder_section, date, record};
use pato_episodes::io::{episodes_to_record_batch, read_cohort, write_episodes};
use pato_episodes::models::Cell;
use pato_episodes::{Episode, PipelineContext, run_cohort};

fn write_batch(path: &Path, batch: &RecordBatch) {
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(batch).unwrap();
    writer.close().unwrap();
}

fn list_column(rows: &[&[&str]]) -> ArrayRef {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for values in rows {
        for value in *values {
            builder.values().append_value(value);
        }
        builder.append(true);
    }
    Arc::new(builder.finish())
}

fn list_cohort() -> RecordBatch {
    let a1 = bladder_section("T74000", "urinblære", "biopsi af slimhinde");
    let a2 = bladder_section("T74000", "urinblære", "karcinom");
    let b1 = bladder_section("T75000", "urethra", "biopsi");

    RecordBatch::try_from_iter(vec![
        (
            "cpr",
            Arc::new(StringArray::from(vec!["A", "B"])) as ArrayRef,
        ),
        (
            "pato_diagnoses",
            list_column(&[&[a1.as_str(), a2.as_str()], &[b1.as_str()]]),
        ),
        (
            "pato_received_date",
            list_column(&[&["01.01.2021", "01.06.2021"], &["15.03.2020"]]),
        ),
        (
            "pato_conclusion",
            list_column(&[&["k1", "k2"], &["k3"]]),
        ),
    ])
    .unwrap()
}

#[test]
fn test_read_list_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cohort.parquet");
    write_batch(&path, &list_cohort());

    let table = read_cohort(&path, &bladder_config()).unwrap();
    assert_eq!(table.len(), 2);

    let a = table.row("A").unwrap();
    assert_eq!(
        a.get("pato_received_date"),
        Some(&Cell::List(vec![
            "01.01.2021".to_string(),
            "01.06.2021".to_string()
        ]))
    );
    assert!(!a.contains("cpr"));
    assert_eq!(
        table.row("B").unwrap().get("pato_conclusion"),
        Some(&Cell::List(vec!["k3".to_string()]))
    );
}

#[test]
fn test_flat_rows_are_folded_per_patient() {
    let batch = RecordBatch::try_from_iter(vec![
        (
            "cpr",
            Arc::new(StringArray::from(vec!["A", "B", "A"])) as ArrayRef,
        ),
        (
            "pato_diagnoses",
            Arc::new(StringArray::from(vec!["d1", "d2", "d3"])) as ArrayRef,
        ),
        (
            "pato_received_date",
            Arc::new(StringArray::from(vec![Some("01.01.2021"), Some("02.01.2021"), None]))
                as ArrayRef,
        ),
    ])
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.parquet");
    write_batch(&path, &batch);

    let table = read_cohort(&path, &bladder_config()).unwrap();
    let ids: Vec<_> = table.rows().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);

    let a = table.row("A").unwrap();
    assert_eq!(
        a.get("pato_diagnoses"),
        Some(&Cell::List(vec!["d1".to_string(), "d3".to_string()]))
    );
    // The null date keeps its position
    assert_eq!(
        a.get("pato_received_date"),
        Some(&Cell::List(vec!["01.01.2021".to_string(), String::new()]))
    );
    assert_eq!(
        table.row("B").unwrap().get("pato_diagnoses"),
        Some(&Cell::Text("d2".to_string()))
    );
}

#[test]
fn test_list_literal_cells() {
    let batch = RecordBatch::try_from_iter(vec![
        ("cpr", Arc::new(StringArray::from(vec!["A"])) as ArrayRef),
        (
            "pato_received_date",
            Arc::new(StringArray::from(vec!["['01.01.2021', nan]"])) as ArrayRef,
        ),
    ])
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("literal.parquet");
    write_batch(&path, &batch);

    let table = read_cohort(&path, &bladder_config()).unwrap();
    assert_eq!(
        table.row("A").unwrap().get("pato_received_date"),
        Some(&Cell::List(vec!["01.01.2021".to_string(), String::new()]))
    );
}

#[test]
fn test_flat_diagnosis_ending_in_bracket_stays_scalar() {
    let noted = "[1]\nT74000 urinblære, trigonum\nbiopsi [se note]";
    let batch = RecordBatch::try_from_iter(vec![
        (
            "cpr",
            Arc::new(StringArray::from(vec!["A", "A"])) as ArrayRef,
        ),
        (
            "pato_diagnoses",
            Arc::new(StringArray::from(vec![
                noted.to_string(),
                bladder_section("T74000", "urinblære", "karcinom"),
            ])) as ArrayRef,
        ),
        (
            "pato_received_date",
            Arc::new(StringArray::from(vec!["01.01.2021", "01.06.2021"])) as ArrayRef,
        ),
        (
            "pato_conclusion",
            Arc::new(StringArray::from(vec!["k1", "k2"])) as ArrayRef,
        ),
    ])
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat_noted.parquet");
    write_batch(&path, &batch);

    let ctx = PipelineContext::from_config(bladder_config()).unwrap();
    let table = read_cohort(&path, &ctx.config).unwrap();
    let a = table.row("A").unwrap();
    assert_eq!(
        a.get("pato_diagnoses").map(Cell::sequence_len),
        Some(2)
    );
    assert_eq!(
        a.get("pato_diagnoses").unwrap().to_sequence()[0],
        noted
    );

    let output = run_cohort(&table, &ctx).unwrap();
    assert_eq!(output.report.patients_failed, 0);
    assert_eq!(output.classification.len(), 2);
}

#[test]
fn test_missing_patient_column() {
    let batch = RecordBatch::try_from_iter(vec![(
        "id",
        Arc::new(StringArray::from(vec!["A"])) as ArrayRef,
    )])
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_cpr.parquet");
    write_batch(&path, &batch);

    assert!(read_cohort(&path, &bladder_config()).is_err());
    assert!(read_cohort(&dir.path().join("missing.parquet"), &bladder_config()).is_err());
}

#[test]
fn test_episode_batch_layout() {
    let episode = Episode::from_record(record(
        "A",
        date(1970, 1, 11),
        &[("SampleSite", Some("urinblære")), ("Histology", None)],
        "biopsi",
    ));
    let categories = vec!["SampleSite".to_string(), "Histology".to_string()];

    let batch = episodes_to_record_batch(&[episode], &categories).unwrap();
    let schema = batch.schema();
    let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec![
            "patient_id",
            "diagnosis_date",
            "first_date",
            "record_count",
            "SampleSite",
            "Histology",
            "remainder",
        ]
    );

    let dates = batch
        .column(1)
        .as_any()
        .downcast_ref::<Date32Array>()
        .unwrap();
    assert_eq!(dates.value(0), 10);
    let counts = batch
        .column(3)
        .as_any()
        .downcast_ref::<UInt64Array>()
        .unwrap();
    assert_eq!(counts.value(0), 1);
    let histology = batch
        .column(5)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert!(histology.is_null(0));

    let clash = vec!["remainder".to_string()];
    assert!(episodes_to_record_batch(&[], &clash).is_err());
}

#[test]
fn test_cohort_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cohort.parquet");
    write_batch(&input, &list_cohort());

    let ctx = PipelineContext::from_config(bladder_config()).unwrap();
    let table = read_cohort(&input, &ctx.config).unwrap();
    let output = run_cohort(&table, &ctx).unwrap();
    assert_eq!(output.classification.initial.len(), 2);
    assert_eq!(output.classification.recurrence.len(), 1);

    let categories = ctx.field_names();
    let initial_path = dir.path().join("initial.parquet");
    write_episodes(&initial_path, &output.classification.initial, &categories).unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&initial_path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<RecordBatch> = reader.map(|batch| batch.unwrap()).collect();
    let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    assert_eq!(rows, 2);

    let batch = &batches[0];
    let site_idx = batch.schema().index_of("SampleSite").unwrap();
    let sites = batch
        .column(site_idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(sites.value(0), "urinblære");
    assert_eq!(sites.value(1), "urethra");
}
