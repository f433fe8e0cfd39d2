//! Typed summary tables.
//!
//! A table knows its columns from its row type, so an empty table is still
//! a complete value the formatter can describe.

use serde::Serialize;

/// One printable cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Amount(f64),
}

impl Cell {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }

    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(n) => n.to_string(),
            Cell::Amount(v) => format!("{v:.2}"),
        }
    }
}

/// A row of some summary view
pub trait SummaryRow {
    /// Column headers, in cell order
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryTable<R> {
    rows: Vec<R>,
}

impl<R> Default for SummaryTable<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: SummaryRow> SummaryTable<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<'a, R> IntoIterator for &'a SummaryTable<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
