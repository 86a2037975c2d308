//! Utility functions for error handling
//!
//! Path checks that produce errors carrying the path and the purpose the
//! path was needed for.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PatoError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(PatoError::file(
            path,
            format!("File not found (needed for: {purpose})"),
        ));
    }

    if !path.is_file() {
        return Err(PatoError::file(
            path,
            format!("Path is not a file (expected a file for: {purpose})"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for {purpose}: {e}"),
        };
        PatoError::file(path, message)
    })
}

/// Check that a directory exists, creating it when `create` is set
pub fn ensure_directory(path: &Path, purpose: &str, create: bool) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    if path.exists() {
        return Err(PatoError::file(
            path,
            format!("Path is not a directory (expected a directory for: {purpose})"),
        ));
    }

    if create {
        fs::create_dir_all(path).map_err(|e| {
            PatoError::file(path, format!("Failed to create directory for {purpose}: {e}"))
        })
    } else {
        Err(PatoError::file(
            path,
            format!("Directory not found (needed for: {purpose})"),
        ))
    }
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let message = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file content for {purpose}: {e}"),
            };
            Err(PatoError::file(path, message))
        }
    }
}
