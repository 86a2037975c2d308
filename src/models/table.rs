//! Tabular input rows
//!
//! The loading layer hands the core one [`Row`] per patient. A cell is either
//! a scalar or an ordered list; list cells of one row are co-indexed, so
//! position `i` in every list describes the same pathology observation.

use rustc_hash::FxHashMap;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Missing value
    Null,
    /// Scalar text (dates are kept as text until parsed)
    Text(String),
    /// Ordered list of scalars
    List(Vec<String>),
}

impl Cell {
    /// View the cell as a sequence
    ///
    /// A scalar is a one-element sequence and a null is an empty one.
    #[must_use]
    pub fn to_sequence(&self) -> Vec<String> {
        match self {
            Self::Null => Vec::new(),
            Self::Text(value) => vec![value.clone()],
            Self::List(values) => values.clone(),
        }
    }

    /// Number of elements the cell holds as a sequence
    #[must_use]
    pub fn sequence_len(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Text(_) => 1,
            Self::List(values) => values.len(),
        }
    }

    /// Scalar text, if the cell is a scalar
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for Cell {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for Cell {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// One patient's row with named cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Row identifier (the patient id)
    pub id: String,
    cells: FxHashMap<String, Cell>,
    order: Vec<String>,
}

impl Row {
    /// Create an empty row
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Add or replace a cell
    #[must_use]
    pub fn with_cell(mut self, column: &str, cell: impl Into<Cell>) -> Self {
        self.insert(column, cell.into());
        self
    }

    /// Add or replace a cell
    pub fn insert(&mut self, column: &str, cell: Cell) {
        if self.cells.insert(column.to_string(), cell).is_none() {
            self.order.push(column.to_string());
        }
    }

    /// Get a cell
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, column: &str) -> Option<&mut Cell> {
        self.cells.get_mut(column)
    }

    /// Whether the row has a column
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Column names in insertion order
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.order
    }
}

/// Ordered collection of patient rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Append a row
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Rows in order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Find a row by id
    #[must_use]
    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
