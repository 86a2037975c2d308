//! Code mapping tables
//!
//! A [`CodeMapping`] is an ordered set of named categories, each mapping short
//! pathology codes (SNOMED-style `T`/`M`/`P`/`Æ` codes) to the description that
//! follows the code in report text. The table is read-only once built and is
//! shared by reference across worker threads.
//!
//! Lookup is case-sensitive substring containment. Within a category the first
//! entry (in insertion order) whose code occurs in the text wins; there is no
//! other priority between overlapping codes.

pub mod bladder;
pub mod renal;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::logging::log_mapping_warning;

/// One named category of code → description entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category (output column) name, e.g. `TStage`
    pub name: String,
    /// Code/description pairs in lookup order
    pub entries: Vec<(String, String)>,
}

impl Category {
    /// Create a category from static code/description pairs
    #[must_use]
    pub fn from_pairs(name: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            entries: pairs
                .iter()
                .map(|(code, description)| ((*code).to_string(), (*description).to_string()))
                .collect(),
        }
    }

    /// First entry whose code occurs in `text`
    #[must_use]
    pub fn find_in(&self, text: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|(code, _)| text.contains(code.as_str()))
            .map(|(code, description)| (code.as_str(), description.as_str()))
    }

    /// Description for an exact code
    #[must_use]
    pub fn describe(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, description)| description.as_str())
    }
}

/// Ordered collection of code categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeMapping {
    categories: Vec<Category>,
}

impl CodeMapping {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category, replacing any existing category with the same name
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.insert(category);
        self
    }

    /// Add a category, replacing any existing category with the same name
    ///
    /// A replaced category keeps its original position.
    pub fn insert(&mut self, category: Category) {
        if let Some(existing) = self.categories.iter_mut().find(|c| c.name == category.name) {
            *existing = category;
        } else {
            self.categories.push(category);
        }
    }

    /// Look up the first code of `category` contained in `text`
    ///
    /// Returns `None` when the category is unknown or no code matches.
    #[must_use]
    pub fn lookup(&self, category: &str, text: &str) -> Option<(&str, &str)> {
        self.category(category)?.find_in(text)
    }

    /// Get a category by name
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Categories in lookup order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Category names in lookup order
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the mapping has no categories
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Load a mapping from JSON
    ///
    /// The format is an array of `{"name": ..., "entries": [[code, description], ...]}`
    /// objects. Empty categories are kept but logged, since they can never match.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mapping: Self = serde_json::from_str(json)?;
        for category in &mapping.categories {
            if category.entries.is_empty() {
                log_mapping_warning(&category.name, "no entries, it can never match");
            }
        }
        Ok(mapping)
    }

    /// The renal tumour pathology categories
    #[must_use]
    pub fn renal() -> Self {
        renal::mapping()
    }

    /// The bladder and urethra pathology categories
    #[must_use]
    pub fn bladder() -> Self {
        bladder::mapping()
    }
}
