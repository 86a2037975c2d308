//! Structured diagnosis records
//!
//! A [`StructuredRecord`] is what the parser produces from one bracketed
//! section of a pathology diagnosis field: the patient, the date the sample
//! was received, the coded fields found in the section and whatever text was
//! left over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Extracted field values keyed by category, in category order
///
/// Every tracked category is present; a category without a match holds `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    entries: Vec<(String, Option<String>)>,
}

impl ExtractedFields {
    /// Create fields for the given categories, all unset
    #[must_use]
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = Self::default();
        for category in categories {
            fields.track(category.into());
        }
        fields
    }

    /// Start tracking a category if it is not tracked yet
    pub fn track(&mut self, category: String) {
        if !self.entries.iter().any(|(name, _)| *name == category) {
            self.entries.push((category, None));
        }
    }

    /// Set a category's value, tracking the category if needed
    pub fn set(&mut self, category: &str, value: Option<String>) {
        if let Some((_, slot)) = self.entries.iter_mut().find(|(name, _)| name == category) {
            *slot = value;
        } else {
            self.entries.push((category.to_string(), value));
        }
    }

    /// Value of a category; `None` when unset or untracked
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether the category is tracked (set or not)
    #[must_use]
    pub fn is_tracked(&self, category: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == category)
    }

    /// Categories with their values, in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Tracked category names, in order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of categories holding a value
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.entries.iter().filter(|(_, value)| value.is_some()).count()
    }

    /// Take the value out of a category, leaving it unset
    pub fn take(&mut self, category: &str) -> Option<String> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == category)
            .and_then(|(_, value)| value.take())
    }
}

impl IntoIterator for ExtractedFields {
    type Item = (String, Option<String>);
    type IntoIter = std::vec::IntoIter<(String, Option<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// One diagnosis section extracted for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRecord {
    /// Patient identifier (CPR)
    pub patient_id: String,
    /// Date the sample was received
    pub received_date: NaiveDate,
    /// Text before the first line break of the section, e.g. `1]`
    pub section_label: Option<String>,
    /// First token of the section's code line
    pub section_code: Option<String>,
    /// Values found per category
    pub fields: ExtractedFields,
    /// Section text left after all extraction
    pub remainder: String,
}

impl StructuredRecord {
    /// Create a record with no extracted values
    #[must_use]
    pub fn new(patient_id: impl Into<String>, received_date: NaiveDate) -> Self {
        Self {
            patient_id: patient_id.into(),
            received_date,
            section_label: None,
            section_code: None,
            fields: ExtractedFields::default(),
            remainder: String::new(),
        }
    }

    /// Set the extracted fields
    #[must_use]
    pub fn with_fields(mut self, fields: ExtractedFields) -> Self {
        self.fields = fields;
        self
    }

    /// Set the remainder text
    #[must_use]
    pub fn with_remainder(mut self, remainder: impl Into<String>) -> Self {
        self.remainder = remainder.into();
        self
    }

    /// Value of an extracted category
    #[must_use]
    pub fn field(&self, category: &str) -> Option<&str> {
        self.fields.get(category)
    }
}
