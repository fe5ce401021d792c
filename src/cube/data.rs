//! Tabular source data.
//!
//! The crate never parses CSV input itself; callers hand over the table as
//! in-memory columns. A cell that is `None`, empty or whitespace-only is a
//! missing value.

use std::collections::BTreeSet;

/// Column-oriented access to source data.
pub trait DataSource {
    /// Cells of the column titled `title`, in row order.
    fn column_values(&self, title: &str) -> Option<&[Option<String>]>;

    fn row_count(&self) -> usize;

    /// Distinct non-missing values of a column.
    fn distinct_values(&self, title: &str) -> BTreeSet<String> {
        self.column_values(title)
            .map(|cells| cells.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }

    /// 0-based indices of rows whose cell in `title` is missing.
    fn missing_rows(&self, title: &str) -> Vec<usize> {
        self.column_values(title)
            .map(|cells| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_none())
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// An in-memory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    headers: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Empty cells become missing values.
    pub fn with_column<I, S>(mut self, title: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.headers.push(title.into());
        self.columns
            .push(cells.into_iter().map(|c| normalize_cell(c.as_ref())).collect());
        self
    }

    /// Build from a header row and data rows; short rows are padded with
    /// missing values.
    pub fn from_rows<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> Self {
        let columns = (0..headers.len())
            .map(|i| {
                rows.iter()
                    .map(|row| row.get(i).and_then(|c| normalize_cell(c.as_ref())))
                    .collect()
            })
            .collect();
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            columns,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Cells of row `index` in header order.
    pub fn row(&self, index: usize) -> Vec<Option<&str>> {
        self.columns
            .iter()
            .map(|col| col.get(index).and_then(|c| c.as_deref()))
            .collect()
    }
}

impl DataSource for DataTable {
    fn column_values(&self, title: &str) -> Option<&[Option<String>]> {
        self.headers
            .iter()
            .position(|h| h == title)
            .map(|i| self.columns[i].as_slice())
    }

    fn row_count(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }
}

fn normalize_cell(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}
