//! Bladder and urethra pathology categories

use super::{Category, CodeMapping};

/// Bladder and urethra site codes used to select relevant diagnosis entries
pub const SITE_CODES: &[&str] = &[
    "T74940", "T74000", "T74950", "T74010", "T74030", "T7432A", "T7432B", "T75000", "T75050",
    "T75060", "T75010", "T75110",
];

/// Sample site
pub const SAMPLE_SITE: &[(&str, &str)] = &[
    ("T74940", "urinblære, prostata og vesicula seminalis"),
    ("T74000", "urinblære"),
    ("T74950", "urinblære, vagina, uterus og adnexa"),
    ("T74010", "urinblæreslimhinde"),
    ("T74030", "urinblære, detrusor"),
    ("T7432A", "ureterostium, højre"),
    ("T7432B", "ureterostium, venstre"),
    ("T75000", "urethra"),
    ("T75050", "urethra, mand"),
    ("T75060", "urethra, kvinde"),
    ("T75010", "urethraslimhinde"),
    ("T75110", "urethra pars prostatica"),
];

/// Malignancy grade
pub const MALIGNANCY_GRADE: &[(&str, &str)] = &[
    ("ÆYY111", "lav malignitetsgrad"),
    ("ÆYY113", "høj malignitetsgrad"),
];

/// Sample (procedure) type
pub const SAMPLE_TYPE: &[(&str, &str)] = &[
    ("P30611", "ekscisionsbiopsi"),
    ("P30615", "endoskopisk biopsi"),
    ("P30619", "randombiopsi"),
    ("P30625", "spånresektat"),
    ("P306x0", "ektomipræparat"),
    ("P306x4", "tumorektomi"),
];

/// Urothelial carcinoma variant
pub const VARIANT: &[(&str, &str)] = &[
    ("ÆYYY0R", "nested inkl. large nested type"),
    ("ÆYYY0S", "mikrocystisk type"),
    ("ÆYYY0U", "plasmacytoid/signetringscelle/diffus type"),
    ("ÆYYY0X", "lipidrig type"),
];

/// Histology
pub const HISTOLOGY: &[(&str, &str)] = &[
    ("M80133", "storcellet neuroendokrint karcinom"),
    ("M80203", "udifferentieret karcinom"),
    ("M80403", "småcellet karcinom"),
    ("M80702", "planocellulært karcinom in situ"),
    ("M80703", "planocellulært karcinom"),
    ("M80823", "lymfoepitelialt karcinom"),
    ("M81200", "urotelialt papillom"),
    ("M81202", "urotelialt karcinom in situ"),
    ("M81203", "urotelialt"),
    ("M81300", "inverteret urotelialt papillom"),
    ("M81233", "sarkomatoidt urotelialt karcinom"),
    ("M81313", "mikropapillært urotelialt karcinom"),
    ("M81301", "papillær urotelial tumor med minimalt malignitetspotentiale"),
    ("M81302", "ikkeinvasiv papillær urotelial tumor"),
    ("M81403", "adenokarcinom"),
    ("M81402", "adenokarcinom in situ"),
    ("M81303", "urotelial tumor"),
    ("M69760", "malignitetssuspekte celler"),
];

/// Build the bladder mapping in lookup order
#[must_use]
pub fn mapping() -> CodeMapping {
    [
        ("SampleSite", SAMPLE_SITE),
        ("MalignancyGrade", MALIGNANCY_GRADE),
        ("SampleType", SAMPLE_TYPE),
        ("Variant", VARIANT),
        ("Histology", HISTOLOGY),
    ]
    .into_iter()
    .fold(CodeMapping::new(), |mapping, (name, pairs)| {
        mapping.with_category(Category::from_pairs(name, pairs))
    })
}
