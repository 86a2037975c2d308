//! Co-indexed sequence columns
//!
//! A [`ParallelRecord`] holds several named sequences of equal length where
//! position `i` in every sequence describes the same observation. The
//! equal-length invariant is checked on construction and every mutation acts
//! on the same positions in all sequences, so it holds for the lifetime of
//! the value.

use smallvec::SmallVec;

use crate::error::{PatoError, Result};
use crate::models::table::{Cell, Row};

/// Named, co-indexed sequences for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelRecord {
    row_id: String,
    names: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl ParallelRecord {
    /// Build a record from named sequences
    ///
    /// The first sequence is the reference for the length check; any sequence
    /// of a different length is reported as an integrity violation naming the
    /// row and both columns.
    pub fn try_new(row_id: impl Into<String>, columns: Vec<(String, Vec<String>)>) -> Result<Self> {
        let row_id = row_id.into();

        if let Some((first_name, first)) = columns.first() {
            let expected = first.len();
            if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != expected) {
                return Err(PatoError::Integrity {
                    row: row_id,
                    driver: first_name.clone(),
                    column: name.clone(),
                    expected,
                    actual: values.len(),
                });
            }
        }

        let (names, columns) = columns.into_iter().unzip();
        Ok(Self {
            row_id,
            names,
            columns,
        })
    }

    /// Build a record from a row's driver column and dependent columns
    ///
    /// Every named column must be present in the row.
    pub fn from_row(row: &Row, driver: &str, dependents: &[&str]) -> Result<Self> {
        let mut columns: Vec<(String, Vec<String>)> = Vec::with_capacity(dependents.len() + 1);
        for name in std::iter::once(driver).chain(dependents.iter().copied()) {
            if columns.iter().any(|(existing, _)| existing == name) {
                continue;
            }
            let cell = row.get(name).ok_or_else(|| PatoError::ColumnNotFound {
                row: row.id.clone(),
                column: name.to_string(),
            })?;
            columns.push((name.to_string(), cell.to_sequence()));
        }
        Self::try_new(row.id.clone(), columns)
    }

    /// Write the sequences back into a row as list cells
    pub fn write_to_row(&self, row: &mut Row) {
        for (name, values) in self.names.iter().zip(&self.columns) {
            row.insert(name, Cell::List(values.clone()));
        }
    }

    /// Row identifier
    #[must_use]
    pub fn row_id(&self) -> &str {
        &self.row_id
    }

    /// Number of positions (shared by all sequences)
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Whether the record has no positions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in order
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// A sequence by column name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.index_of(name).map(|idx| self.columns[idx].as_slice())
    }

    /// A sequence by column name, or a `ColumnNotFound` error
    pub fn require_column(&self, name: &str) -> Result<&[String]> {
        self.column(name).ok_or_else(|| PatoError::ColumnNotFound {
            row: self.row_id.clone(),
            column: name.to_string(),
        })
    }

    /// Value at one position of a column
    #[must_use]
    pub fn value(&self, name: &str, position: usize) -> Option<&str> {
        self.column(name)?.get(position).map(String::as_str)
    }

    /// Remove the given positions from every sequence
    ///
    /// Positions are removed from the highest to the lowest so earlier
    /// removals never shift later ones. Out-of-range and duplicate positions
    /// are ignored.
    pub fn remove_positions(&mut self, positions: &[usize]) {
        let len = self.len();
        let mut sorted: SmallVec<[usize; 8]> =
            positions.iter().copied().filter(|&p| p < len).collect();
        sorted.sort_unstable();
        sorted.dedup();

        for &position in sorted.iter().rev() {
            for column in &mut self.columns {
                column.remove(position);
            }
        }
    }

    /// Keep only the positions for which `keep` returns true
    pub fn retain_positions(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let drop: SmallVec<[usize; 8]> = (0..self.len()).filter(|&i| !keep(i)).collect();
        self.remove_positions(&drop);
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
