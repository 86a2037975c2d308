//! Date parsing for received dates and other date-valued cells.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Configuration for date format handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// List of date format strings to try when parsing dates
    pub date_formats: Vec<String>,
    /// Date-time formats to try; only the date part is kept
    pub datetime_formats: Vec<String>,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                // Two-digit years first: %Y would accept "23" as year 0023
                "%d.%m.%y".to_string(), // Short year: 15.01.23
                "%d-%m-%y".to_string(), // Short year: 15-01-23
                "%d.%m.%Y".to_string(), // Danish: 15.01.2023
                "%d-%m-%Y".to_string(), // European: 15-01-2023
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
            ],
            datetime_formats: vec![
                "%Y-%m-%d %H:%M:%S".to_string(), // Spreadsheet export: 2023-01-15 00:00:00
                "%Y-%m-%dT%H:%M:%S".to_string(), // Arrow timestamp cast to text
                "%d-%m-%y %H:%M".to_string(),    // Lab export: 15-01-23 08:00
                "%d.%m.%Y %H:%M".to_string(),
            ],
            enable_format_detection: true,
        }
    }
}

/// Parse a date string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    for format in &config.datetime_formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect the date format based on string patterns
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    // YYYY-MM-DD
    if s.len() == 10 && s.chars().nth(4) == Some('-') && s.chars().nth(7) == Some('-') {
        return Some("%Y-%m-%d");
    }

    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 {
            if parts[0].len() == 4 {
                return Some("%Y/%m/%d");
            } else if parts[2].len() == 4 {
                // Day first; these records come from Danish systems
                return Some("%d/%m/%Y");
            }
        }
    }

    // YYYYMMDD
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d");
    }

    None
}
