//! Diagnosis text parser
//!
//! A pathology diagnosis field holds one or more bracketed sections:
//!
//! ```text
//! [1]
//! T74000 urinblære
//! biopsi af slimhinde
//! ```
//!
//! The first line of a section is its label, the second the code line and the
//! rest supporting text. Each section with at least three lines becomes one
//! [`StructuredRecord`]; shorter sections carry too little structure and are
//! skipped without error.

pub mod extractors;

use chrono::NaiveDate;
use log::debug;

use crate::mapping::CodeMapping;
use crate::models::{ExtractedFields, StructuredRecord};

pub use extractors::{PatternExtractor, apply_all, extractor_categories, renal_extractors};

/// Minimum number of lines a section needs to be parsed
pub const MIN_SECTION_LINES: usize = 3;

/// Records parsed from one diagnosis field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// One record per parsed section, in text order
    pub records: Vec<StructuredRecord>,
    /// Number of sections dropped for having too few lines
    pub skipped_sections: usize,
}

/// Parser over a shared mapping table and extractor list
#[derive(Debug, Clone, Copy)]
pub struct DiagnosisParser<'a> {
    mapping: &'a CodeMapping,
    extractors: &'a [PatternExtractor],
}

impl<'a> DiagnosisParser<'a> {
    /// Create a parser
    #[must_use]
    pub fn new(mapping: &'a CodeMapping, extractors: &'a [PatternExtractor]) -> Self {
        Self {
            mapping,
            extractors,
        }
    }

    /// Mapping table used for category lookup
    #[must_use]
    pub fn mapping(&self) -> &'a CodeMapping {
        self.mapping
    }

    /// All field names a record can carry: mapping categories first, then
    /// extractor categories not already named by the mapping
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        let mut names = self.mapping.category_names();
        for category in extractor_categories(self.extractors) {
            if !names.contains(&category) {
                names.push(category);
            }
        }
        names
    }

    /// Parse one diagnosis field
    #[must_use]
    pub fn parse(&self, raw: &str, patient_id: &str, received_date: NaiveDate) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        let field_names = self.field_names();

        for section in segment_sections(raw) {
            let lines: Vec<&str> = section.lines().collect();
            if lines.len() < MIN_SECTION_LINES {
                debug!(
                    "Skipping section with {} line(s) for patient {patient_id}: {:?}",
                    lines.len(),
                    section
                );
                outcome.skipped_sections += 1;
                continue;
            }

            let record = self.parse_section(&lines, patient_id, received_date, &field_names);
            outcome.records.push(record);
        }

        outcome
    }

    fn parse_section(
        &self,
        lines: &[&str],
        patient_id: &str,
        received_date: NaiveDate,
        field_names: &[String],
    ) -> StructuredRecord {
        let label = lines[0].trim();
        let code_line = lines[1];
        let section_code = code_line.split_whitespace().next().map(str::to_string);

        let mut working = format!("{code_line}\n{}", lines[2..].join("\n"));
        let mut fields = ExtractedFields::with_categories(field_names.iter().cloned());

        for category in self.mapping.categories() {
            if let Some((code, description)) = category.find_in(&working) {
                let description = description.to_string();
                working = working.replace(code, "").replace(description.as_str(), "");
                fields.set(&category.name, Some(description));
            }
        }

        let mut remainder = normalize_remainder(&working);
        if !self.extractors.is_empty() {
            let (found, consumed) = apply_all(self.extractors, &remainder);
            for (category, value) in found {
                // Mapping matches take precedence over pattern matches
                if fields.get(&category).is_none() {
                    fields.set(&category, Some(value));
                }
            }
            remainder = normalize_remainder(&consumed);
        }

        StructuredRecord {
            patient_id: patient_id.to_string(),
            received_date,
            section_label: (!label.is_empty()).then(|| label.to_string()),
            section_code,
            fields,
            remainder,
        }
    }
}

/// Split a diagnosis field on `[` and drop blank sections
///
/// Bracket nesting is not validated; an opening bracket with nothing after it
/// yields a blank section, which is dropped.
#[must_use]
pub fn segment_sections(raw: &str) -> Vec<&str> {
    raw.split('[')
        .map(str::trim)
        .filter(|section| !section.is_empty())
        .collect()
}

/// Trim every line and drop the empty ones
#[must_use]
pub fn normalize_remainder(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
