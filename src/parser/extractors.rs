//! Fixed-pattern extractors for the remainder text
//!
//! After the category lookup, the text left in a section still carries a few
//! findings that are written as fixed phrases or measurements rather than as a
//! `code description` pair from the mapping table. Each [`PatternExtractor`]
//! pulls one of them out and consumes every occurrence of its match.

use itertools::Itertools;
use regex::Regex;

use crate::error::{PatoError, Result};

/// One `(category, pattern) → value` extractor
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    category: String,
    code: String,
    regex: Regex,
    group: usize,
}

impl PatternExtractor {
    /// Create an extractor from a regular expression
    ///
    /// `group` selects the capture group used as the extracted value; group 0
    /// is the whole match.
    pub fn new(category: &str, code: &str, pattern: &str, group: usize) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        if group >= regex.captures_len() {
            return Err(PatoError::config(format!(
                "Extractor '{category}/{code}' selects group {group} but pattern '{pattern}' has {} groups",
                regex.captures_len() - 1
            )));
        }

        Ok(Self {
            category: category.to_string(),
            code: code.to_string(),
            regex,
            group,
        })
    }

    /// Create an extractor matching a literal phrase
    pub fn literal(category: &str, code: &str, phrase: &str) -> Result<Self> {
        Self::new(category, code, &regex::escape(phrase), 0)
    }

    /// Category this extractor fills
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Code the pattern is keyed by
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Apply the extractor to `text`
    ///
    /// Returns the value of the first match and the text with every match
    /// removed, or `None` when the pattern does not occur.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<(String, String)> {
        let captures = self.regex.captures(text)?;
        let value = captures.get(self.group)?.as_str().to_string();
        let consumed = self.regex.replace_all(text, "").into_owned();
        Some((value, consumed))
    }
}

/// Apply extractors in order, filling at most one value per category
///
/// The first extractor of a category that matches sets the value; later
/// extractors of the same category still consume their matches but never
/// replace or clear it. Returns the extracted pairs in the order found and
/// the consumed text.
#[must_use]
pub fn apply_all(extractors: &[PatternExtractor], text: &str) -> (Vec<(String, String)>, String) {
    let mut found: Vec<(String, String)> = Vec::new();
    let mut working = text.to_string();

    for extractor in extractors {
        if let Some((value, consumed)) = extractor.apply(&working) {
            working = consumed;
            if !found.iter().any(|(category, _)| category == extractor.category()) {
                found.push((extractor.category().to_string(), value));
            }
        }
    }

    (found, working)
}

/// Extractors for renal pathology remainder text, in application order
pub fn renal_extractors() -> Result<Vec<PatternExtractor>> {
    const LITERALS: &[(&str, &str, &str)] = &[
        ("Side", "T71010", "T71010 Højre nyre"),
        ("Side", "T71020", "T71020 Venstre nyre"),
        ("Karination", "M09420", "M09420 karinvasion ikke påvist"),
        ("Karination", "M09421", "M09421 karinvasion påvist"),
        ("PapellerTumorType", "ÆYYY41", "ÆYYY41 type 1"),
        ("PapellerTumorType", "ÆYYY42", "ÆYYY42 type 2"),
        ("OperationType", "P306X4", "P306X4 tumorektomi"),
        ("OperationType", "P306X0", "P306X0 ektomipraeparat"),
        ("Biopsi", "P30990", "P30990 nålebiopsi"),
        ("Lymphadenectomy", "ÆLY007", "ÆLY007 lymfeknuder"),
        ("Lymphadenectomy", "T0857", "T0857"),
        ("Lymphadenectomy", "T0858", "T0858"),
        ("LymphnodesMetastasis", "ÆLX001", "ÆLX001 lymfeknudemetastaser"),
        ("Rhabdoid", "ÆYYY0Z", "ÆYYY0Z rhabdoid"),
    ];

    let mut extractors = Vec::with_capacity(LITERALS.len() + 1);
    extractors.push(PatternExtractor::new(
        "TumorSize",
        "ÆTD",
        r"ÆTD(\d{3})\s*tumordiameter (\d+ mm)",
        1,
    )?);
    for (category, code, phrase) in LITERALS {
        extractors.push(PatternExtractor::literal(category, code, phrase)?);
    }
    Ok(extractors)
}

/// Category names the extractors fill, in first-seen order
#[must_use]
pub fn extractor_categories(extractors: &[PatternExtractor]) -> Vec<String> {
    extractors
        .iter()
        .map(|extractor| extractor.category().to_string())
        .unique()
        .collect()
}
