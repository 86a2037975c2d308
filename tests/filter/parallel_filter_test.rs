//! Tests for the parallel-sequence filter

use pato_episodes::filter::{keep_earliest, ContainsAnyCode, StartsWithAnyPrefix};
use pato_episodes::models::Cell;
use pato_episodes::utils::DateFormatConfig;
use pato_episodes::{filter_parallel, filter_row, ParallelRecord, PatoError, Row};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn sample_record() -> ParallelRecord {
    ParallelRecord::try_new(
        "p1",
        vec![
            ("sample".to_string(), strings(&["Blod", "Spyt", "Urin"])),
            (
                "date".to_string(),
                strings(&["01-01-2020", "02-01-2020", "03-01-2020"]),
            ),
        ],
    )
    .unwrap()
}

#[test]
fn test_prefix_filter_keeps_columns_in_step() {
    let filtered = filter_parallel(
        sample_record(),
        "sample",
        &["date"],
        &StartsWithAnyPrefix::new(["Blod", "Urin"]),
    )
    .unwrap();

    assert_eq!(filtered.column("sample").unwrap(), ["Blod", "Urin"]);
    assert_eq!(
        filtered.column("date").unwrap(),
        ["01-01-2020", "03-01-2020"]
    );
}

#[test]
fn test_filtered_length_matches_kept_count() {
    let texts = strings(&[
        "[1]\nT74000 urinblære\nx",
        "[1]\nT71000 nyre\nx",
        "",
        "T75000 urethra",
        "T74000 og T75000",
        "ingen kode",
    ]);
    let others: Vec<String> = (0..texts.len()).map(|i| i.to_string()).collect();
    let predicate = ContainsAnyCode::new(["T74000", "T75000"]);
    let expected = texts
        .iter()
        .filter(|text| text.contains("T74000") || text.contains("T75000"))
        .count();

    let record = ParallelRecord::try_new(
        "p1",
        vec![
            ("diag".to_string(), texts),
            ("index".to_string(), others.clone()),
            ("copy".to_string(), others),
        ],
    )
    .unwrap();
    let filtered = filter_parallel(record, "diag", &["index", "copy"], &predicate).unwrap();

    assert_eq!(filtered.len(), expected);
    for name in filtered.column_names() {
        assert_eq!(filtered.column(name).unwrap().len(), expected);
    }
    // Retained positions keep their order
    assert_eq!(filtered.column("index").unwrap(), ["0", "3", "4"]);
}

#[test]
fn test_filter_everything_and_nothing() {
    let none = filter_parallel(sample_record(), "sample", &["date"], &|_: &str| false).unwrap();
    assert!(none.is_empty());
    assert_eq!(none.column("date").unwrap().len(), 0);

    let all = filter_parallel(sample_record(), "sample", &["date"], &|_: &str| true).unwrap();
    assert_eq!(all, sample_record());
}

#[test]
fn test_length_mismatch_is_an_integrity_error() {
    let result = ParallelRecord::try_new(
        "p7",
        vec![
            ("diag".to_string(), strings(&["a", "b"])),
            ("date".to_string(), strings(&["01.01.2020"])),
        ],
    );

    match result {
        Err(PatoError::Integrity {
            row,
            driver,
            column,
            expected,
            actual,
        }) => {
            assert_eq!(row, "p7");
            assert_eq!(driver, "diag");
            assert_eq!(column, "date");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected integrity error, got {other:?}"),
    }
}

#[test]
fn test_missing_column_is_reported() {
    let result = filter_parallel(
        sample_record(),
        "sample",
        &["date", "nope"],
        &StartsWithAnyPrefix::new(["Blod"]),
    );
    assert!(matches!(
        result,
        Err(PatoError::ColumnNotFound { ref column, .. }) if column == "nope"
    ));
}

#[test]
fn test_filter_row_writes_back_and_leaves_other_columns() {
    let mut row = Row::new("p1")
        .with_cell("sample", vec!["Blod", "Spyt", "Urin"])
        .with_cell("date", vec!["01-01-2020", "02-01-2020", "03-01-2020"])
        .with_cell("note", "uberørt");

    filter_row(
        &mut row,
        "sample",
        &["date"],
        &StartsWithAnyPrefix::new(["Spyt"]),
    )
    .unwrap();

    assert_eq!(row.get("sample"), Some(&Cell::List(strings(&["Spyt"]))));
    assert_eq!(row.get("date"), Some(&Cell::List(strings(&["02-01-2020"]))));
    assert_eq!(row.get("note"), Some(&Cell::Text("uberørt".to_string())));
}

#[test]
fn test_filter_row_rejects_uneven_row() {
    let mut row = Row::new("p2")
        .with_cell("sample", vec!["Blod", "Urin"])
        .with_cell("date", vec!["01-01-2020"]);
    let before = row.clone();

    let result = filter_row(&mut row, "sample", &["date"], &StartsWithAnyPrefix::new(["Blod"]));
    assert!(matches!(result, Err(PatoError::Integrity { .. })));
    assert_eq!(row, before);
}

#[test]
fn test_scalar_cells_are_single_element_sequences() {
    let row = Row::new("p3")
        .with_cell("sample", "Blod")
        .with_cell("date", "01-01-2020")
        .with_cell("empty", Cell::Null);

    let record = ParallelRecord::from_row(&row, "sample", &["date"]).unwrap();
    assert_eq!(record.len(), 1);

    let result = ParallelRecord::from_row(&row, "sample", &["empty"]);
    assert!(matches!(result, Err(PatoError::Integrity { .. })));
}

#[test]
fn test_keep_earliest_keeps_all_ties() {
    let record = ParallelRecord::try_new(
        "p1",
        vec![
            ("diag".to_string(), strings(&["a", "b", "c", "d"])),
            (
                "date".to_string(),
                strings(&["03.01.2020", "01.01.2020", "01.01.2020", "ukendt"]),
            ),
        ],
    )
    .unwrap();

    let earliest = keep_earliest(record, "date", &DateFormatConfig::default()).unwrap();
    assert_eq!(earliest.column("diag").unwrap(), ["b", "c"]);
    assert_eq!(earliest.column("date").unwrap(), ["01.01.2020", "01.01.2020"]);
}

#[test]
fn test_keep_earliest_without_dates_keeps_record() {
    let record = ParallelRecord::try_new(
        "p1",
        vec![
            ("diag".to_string(), strings(&["a", "b"])),
            ("date".to_string(), strings(&["", "nan"])),
        ],
    )
    .unwrap();

    let kept = keep_earliest(record.clone(), "date", &DateFormatConfig::default()).unwrap();
    assert_eq!(kept, record);
}

#[test]
fn test_remove_positions_ignores_duplicates_and_out_of_range() {
    let mut record = sample_record();
    record.remove_positions(&[2, 0, 2, 99]);
    assert_eq!(record.column("sample").unwrap(), ["Spyt"]);
    assert_eq!(record.column("date").unwrap(), ["02-01-2020"]);
}
