//! Tests for the code mapping tables

use pato_episodes::mapping::{bladder, renal};
use pato_episodes::{Category, CodeMapping};

#[test]
fn test_renal_categories_in_order() {
    let mapping = CodeMapping::renal();
    assert_eq!(
        mapping.category_names(),
        vec![
            "Subtype",
            "LeibovichScore",
            "ResectionRange",
            "FuhrmanGrade",
            "WHOScore",
            "ISUPGrade",
            "Sarkomatoid",
            "TStage",
            "NStage",
            "MStage",
            "Nekroser",
        ]
    );
}

#[test]
fn test_bladder_categories_in_order() {
    let mapping = CodeMapping::bladder();
    assert_eq!(
        mapping.category_names(),
        vec!["SampleSite", "MalignancyGrade", "SampleType", "Variant", "Histology"]
    );
    assert_eq!(bladder::SITE_CODES.len(), 12);
}

#[test]
fn test_lookup_finds_code_and_description() {
    let mapping = CodeMapping::renal();
    assert_eq!(
        mapping.lookup("TStage", "ÆF1852 pT3b"),
        Some(("ÆF1852", "pT3b"))
    );
    assert_eq!(
        mapping.lookup("Subtype", "foo\nM83103 clear cell adenokarcinom\nbar"),
        Some(("M83103", "clear cell adenokarcinom"))
    );
    assert!(renal::KIDNEY_SITE_CODES.contains(&"T71000"));
}

#[test]
fn test_lookup_misses() {
    let mapping = CodeMapping::bladder();
    assert_eq!(mapping.lookup("SampleSite", "T71000 nyre"), None);
    assert_eq!(mapping.lookup("NoSuchCategory", "T74000 urinblære"), None);
    // Matching is case-sensitive
    assert_eq!(mapping.lookup("SampleSite", "t74000 urinblære"), None);
}

#[test]
fn test_first_entry_wins_over_longer_code() {
    let mapping = CodeMapping::new().with_category(Category::from_pairs(
        "Site",
        &[("T74", "short"), ("T74000", "long")],
    ));
    assert_eq!(mapping.lookup("Site", "T74000"), Some(("T74", "short")));
}

#[test]
fn test_with_category_replaces_in_place() {
    let mapping = CodeMapping::new()
        .with_category(Category::from_pairs("A", &[("a", "1")]))
        .with_category(Category::from_pairs("B", &[("b", "2")]))
        .with_category(Category::from_pairs("A", &[("x", "3")]));

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.category_names(), vec!["A", "B"]);
    assert_eq!(mapping.lookup("A", "a"), None);
    assert_eq!(mapping.lookup("A", "x"), Some(("x", "3")));
}

#[test]
fn test_mapping_from_json() {
    let json = r#"[
        {"name": "SampleSite", "entries": [["T74000", "urinblære"], ["T75000", "urethra"]]},
        {"name": "Empty", "entries": []}
    ]"#;
    let mapping = CodeMapping::from_json_str(json).unwrap();
    assert_eq!(mapping.len(), 2);
    assert_eq!(
        mapping.lookup("SampleSite", "T75000 urethra"),
        Some(("T75000", "urethra"))
    );
    assert_eq!(
        mapping.category("SampleSite").and_then(|c| c.describe("T74000")),
        Some("urinblære")
    );

    assert!(CodeMapping::from_json_str("{").is_err());
}
