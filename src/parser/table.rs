//! Tabular view of one transcript section.

use serde::{Deserialize, Serialize};

/// Which block of a section a row was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// Solid phase (mineral) row
    Solid,
    /// Gas or fluid phase row
    Fluid,
    /// Stable phase from a section that does not split solids and fluids
    Phase,
    /// Aggregate row closing a block (`total`, `total:`)
    Total,
}

/// One data row: a phase name plus cells aligned to the table header.
///
/// `values[i]` belongs to `header[i + 1]`; blank cells are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub name: String,
    pub kind: RowKind,
    pub values: Vec<Option<f64>>,
}

impl Row {
    pub fn new(name: impl Into<String>, kind: RowKind, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Dense numeric view, blanks read as zero.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.unwrap_or(0.0)).collect()
    }
}

/// Ordered rows under a header whose first column is `Phase`.
///
/// A table with no rows means "no data" (section missing or empty).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new<S: AsRef<str>>(header: &[S]) -> Self {
        Self {
            header: header.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating its cells to the header width.
    pub fn push(&mut self, mut row: Row) {
        let width = self.header.len().saturating_sub(1);
        row.values.resize(width, None);
        self.rows.push(row);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Column names after `Phase`.
    pub fn columns(&self) -> &[String] {
        self.header.get(1..).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index into `Row::values` for a column name.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns().iter().position(|c| c == column)
    }

    /// First row with exactly this name.
    pub fn row(&self, name: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Rows whose name starts with `prefix`, totals excluded.
    pub fn rows_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Row> {
        self.rows
            .iter()
            .filter(move |r| r.kind != RowKind::Total && r.name.starts_with(prefix))
    }

    pub fn total(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.kind == RowKind::Total)
    }

    /// Cell lookup by row name and column name.
    pub fn value(&self, name: &str, column: &str) -> Option<f64> {
        let index = self.column_index(column)?;
        self.row(name)?.values.get(index).copied().flatten()
    }
}
