//! Configuration for the extraction pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithm::MergePolicy;
use crate::error::util::safe_read_to_string;
use crate::error::{PatoError, Result};
use crate::mapping::{CodeMapping, bladder, renal};
use crate::parser::{PatternExtractor, renal_extractors};
use crate::utils::date::DateFormatConfig;

/// Built-in mapping and extractor set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Renal tumour categories with the remainder-text extractors
    #[default]
    Renal,
    /// Bladder and urethra categories, no extractors
    Bladder,
}

impl Preset {
    /// Mapping table of the preset
    #[must_use]
    pub fn mapping(self) -> CodeMapping {
        match self {
            Self::Renal => renal::mapping(),
            Self::Bladder => bladder::mapping(),
        }
    }

    /// Remainder-text extractors of the preset
    pub fn extractors(self) -> Result<Vec<PatternExtractor>> {
        match self {
            Self::Renal => renal_extractors(),
            Self::Bladder => Ok(Vec::new()),
        }
    }

    /// Site codes a diagnosis must contain to be kept
    #[must_use]
    pub fn site_codes(self) -> Vec<String> {
        let codes = match self {
            Self::Renal => renal::KIDNEY_SITE_CODES,
            Self::Bladder => bladder::SITE_CODES,
        };
        codes.iter().map(|code| (*code).to_string()).collect()
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Built-in mapping, extractors and site codes
    pub preset: Preset,
    /// JSON mapping table replacing the preset's mapping
    pub mapping_file: Option<PathBuf>,
    /// Records closer than this many days join the same episode
    pub window_days: i64,
    /// How field values are merged within an episode
    pub merge_policy: MergePolicy,
    /// Joins the remainder texts of merged records
    pub remainder_separator: String,
    /// Column holding the patient id in flat input files
    pub patient_column: String,
    /// List column with the diagnosis texts (the filter driver)
    pub diagnosis_column: String,
    /// List column with the received dates
    pub date_column: String,
    /// Other list columns kept in step with the diagnosis column
    pub dependent_columns: Vec<String>,
    /// Codes a diagnosis must contain to be kept; `None` uses the preset's site codes
    pub keep_codes: Option<Vec<String>>,
    /// Keep only the observations carrying a patient's earliest date
    pub keep_earliest_only: bool,
    /// Keep only the earliest observation per anchor code
    pub earliest_per_anchor: bool,
    /// Anchor codes; empty uses the keep codes
    pub anchor_codes: Vec<String>,
    /// Formats tried when parsing received dates
    pub date_formats: DateFormatConfig,
    /// Worker threads; `None` uses the global rayon pool
    pub num_threads: Option<usize>,
    /// Show a progress bar while processing the cohort
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            mapping_file: None,
            window_days: 60,
            merge_policy: MergePolicy::default(),
            remainder_separator: "; ".to_string(),
            patient_column: "cpr".to_string(),
            diagnosis_column: "pato_diagnoses".to_string(),
            date_column: "pato_received_date".to_string(),
            dependent_columns: [
                "pato_service_provider",
                "pato_request_number",
                "pato_category",
                "pato_material_description_of_smple",
                "pato_conclusion",
                "pato_microscopy",
                "pato_other_investigations",
                "pato_macroscopy",
                "pato_clinical_information",
            ]
            .iter()
            .map(|column| (*column).to_string())
            .collect(),
            keep_codes: None,
            keep_earliest_only: false,
            earliest_per_anchor: false,
            anchor_codes: Vec::new(),
            date_formats: DateFormatConfig::default(),
            num_threads: None,
            show_progress: true,
        }
    }
}

impl PipelineConfig {
    /// Default configuration for a preset
    #[must_use]
    pub fn for_preset(preset: Preset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = safe_read_to_string(path, "pipeline configuration")?;
        Self::from_json_str(&json)
    }

    /// Load a configuration from JSON; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.window_days < 0 {
            return Err(PatoError::config(format!(
                "window_days must not be negative, got {}",
                self.window_days
            )));
        }
        if self.num_threads == Some(0) {
            return Err(PatoError::config("num_threads must be at least 1"));
        }
        if self.diagnosis_column == self.date_column {
            return Err(PatoError::config(
                "diagnosis_column and date_column must be different columns",
            ));
        }
        Ok(())
    }

    /// Set the preset
    #[must_use]
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Set the clustering window
    #[must_use]
    pub fn with_window_days(mut self, window_days: i64) -> Self {
        self.window_days = window_days;
        self
    }

    /// Set the merge policy
    #[must_use]
    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    /// Set the remainder separator
    #[must_use]
    pub fn with_remainder_separator(mut self, separator: impl Into<String>) -> Self {
        self.remainder_separator = separator.into();
        self
    }

    /// Set the dependent columns
    #[must_use]
    pub fn with_dependent_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependent_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the keep codes
    #[must_use]
    pub fn with_keep_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep_codes = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    /// Keep only the earliest-dated observations of each patient
    #[must_use]
    pub fn with_keep_earliest_only(mut self, enabled: bool) -> Self {
        self.keep_earliest_only = enabled;
        self
    }

    /// Keep only the earliest observation per anchor code
    #[must_use]
    pub fn with_earliest_per_anchor<I, S>(mut self, anchor_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.earliest_per_anchor = true;
        self.anchor_codes = anchor_codes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the number of worker threads
    #[must_use]
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Show or hide the progress bar
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Load a mapping table from a JSON file instead of the preset's
    #[must_use]
    pub fn with_mapping_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_file = Some(path.into());
        self
    }

    /// The effective keep codes
    #[must_use]
    pub fn effective_keep_codes(&self) -> Vec<String> {
        self.keep_codes
            .clone()
            .unwrap_or_else(|| self.preset.site_codes())
    }

    /// The effective anchor codes
    #[must_use]
    pub fn effective_anchor_codes(&self) -> Vec<String> {
        if self.anchor_codes.is_empty() {
            self.effective_keep_codes()
        } else {
            self.anchor_codes.clone()
        }
    }

    /// The mapping table: the mapping file if set, else the preset's
    pub fn load_mapping(&self) -> Result<CodeMapping> {
        match &self.mapping_file {
            Some(path) => {
                let json = safe_read_to_string(path, "mapping table")?;
                CodeMapping::from_json_str(&json)
            }
            None => Ok(self.preset.mapping()),
        }
    }

    /// Number of worker threads the run will use
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get)
    }

    /// Dependent columns as string slices, without the driver
    #[must_use]
    pub fn dependent_column_refs(&self) -> Vec<&str> {
        self.dependent_columns
            .iter()
            .map(String::as_str)
            .filter(|column| *column != self.diagnosis_column)
            .collect()
    }
}
