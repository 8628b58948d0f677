// DataFrame implementation module
pub mod apply;
pub mod join;
pub mod query;
pub mod transform;

use std::cmp::Ordering;
use std::fmt;

use crate::column::Column;
use crate::config;
use crate::error::{Error, Result};
use crate::value::Value;

// Re-exports for convenience
pub use apply::{ApplyExt, Row};
pub use join::{JoinExt, JoinType};
pub use query::{QueryEngine, QueryExt};
pub use transform::{StackOptions, TransformExt};

/// DataFrame: an ordered collection of equally long named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<(String, Column)>,
    row_count: usize,
}

impl DataFrame {
    /// Create a new empty DataFrame
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a DataFrame from `(name, column)` pairs
    pub fn from_columns<S, C>(columns: Vec<(S, C)>) -> Result<Self>
    where
        S: Into<String>,
        C: Into<Column>,
    {
        let mut df = Self::new();
        for (name, column) in columns {
            df.add_column(name, column)?;
        }
        Ok(df)
    }

    /// Add a column
    ///
    /// Fails if the name is already used or the length differs from the
    /// existing columns.
    pub fn add_column<S, C>(&mut self, name: S, column: C) -> Result<()>
    where
        S: Into<String>,
        C: Into<Column>,
    {
        let name = name.into();
        if self.contains_column(&name) {
            return Err(Error::DuplicateColumnName(name));
        }
        self.push_column(name, column.into())
    }

    /// Add or replace a column
    pub fn set_column<S, C>(&mut self, name: S, column: C) -> Result<()>
    where
        S: Into<String>,
        C: Into<Column>,
    {
        let name = name.into();
        let column = column.into();
        match self.position(&name) {
            Some(pos) => {
                self.check_length(&column)?;
                self.columns[pos].1 = column;
                Ok(())
            }
            None => self.push_column(name, column),
        }
    }

    // Appends without the uniqueness check; used where repeated names are a
    // legitimate result (selecting the same column twice).
    pub(crate) fn push_column(&mut self, name: String, column: Column) -> Result<()> {
        self.check_length(&column)?;
        if self.columns.is_empty() {
            self.row_count = column.len();
        }
        self.columns.push((name, column));
        Ok(())
    }

    fn check_length(&self, column: &Column) -> Result<()> {
        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    /// Whether the DataFrame has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Check if a column exists
    pub fn contains_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get a column by name (the first one if the name repeats)
    pub fn get_column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Iterate over `(name, column)` pairs
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Get a single cell
    pub fn get_value(&self, row: usize, column: &str) -> Result<Value> {
        self.get_column(column)?.get(row)
    }

    /// Select columns to create a new DataFrame
    ///
    /// Columns are returned in the requested order; a name requested twice
    /// appears twice.
    pub fn select_columns<S: AsRef<str>>(&self, columns: &[S]) -> Result<Self> {
        let mut df = Self::new();
        df.row_count = self.row_count;
        for name in columns {
            let name = name.as_ref();
            let column = self.get_column(name)?;
            df.columns.push((name.to_string(), column.clone()));
        }
        if df.columns.is_empty() {
            df.row_count = 0;
        }
        Ok(df)
    }

    /// Drop the named columns; unknown names are an error
    pub fn drop_columns<S: AsRef<str>>(&self, columns: &[S]) -> Result<Self> {
        for name in columns {
            self.get_column(name.as_ref())?;
        }
        let keep: Vec<&str> = self
            .columns
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| !columns.iter().any(|c| c.as_ref() == *n))
            .collect();
        self.select_columns(&keep)
    }

    /// Rename columns with `(old, new)` pairs; unknown old names are ignored
    pub fn rename_columns<S: AsRef<str>, T: AsRef<str>>(&self, mapping: &[(S, T)]) -> Self {
        let mut df = self.clone();
        for (name, _) in df.columns.iter_mut() {
            if let Some((_, new)) = mapping.iter().find(|(old, _)| old.as_ref() == name) {
                *name = new.as_ref().to_string();
            }
        }
        df
    }

    /// Replace every column name at once
    pub fn set_column_names<S: Into<String>>(&self, names: Vec<S>) -> Result<Self> {
        if names.len() != self.columns.len() {
            return Err(Error::InvalidInput(format!(
                "Number of columns provided ({}) does not match the number of columns in the DataFrame ({})",
                names.len(),
                self.columns.len()
            )));
        }
        let mut df = self.clone();
        for ((name, _), new) in df.columns.iter_mut().zip(names) {
            *name = new.into();
        }
        Ok(df)
    }

    /// Select rows by position, in the given order
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        let mut df = Self::new();
        for (name, column) in &self.columns {
            df.columns.push((name.clone(), column.take(indices)?));
        }
        df.row_count = if df.columns.is_empty() { 0 } else { indices.len() };
        Ok(df)
    }

    /// Select rows using a mask
    pub fn filter_by_mask(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: mask.len(),
            });
        }
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| if keep { Some(i) } else { None })
            .collect();
        self.take_rows(&indices)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Result<Self> {
        let indices: Vec<usize> = (0..n.min(self.row_count)).collect();
        self.take_rows(&indices)
    }

    /// Row positions ordered by the given `(column, ascending)` keys
    ///
    /// The sort is stable and missing values go last regardless of the
    /// direction.
    pub fn sorted_indices(&self, by: &[(&str, bool)]) -> Result<Vec<usize>> {
        let keys: Vec<(Vec<Value>, bool)> = by
            .iter()
            .map(|(name, ascending)| Ok((self.get_column(name)?.to_values(), *ascending)))
            .collect::<Result<_>>()?;

        let mut indices: Vec<usize> = (0..self.row_count).collect();
        indices.sort_by(|&a, &b| {
            for (values, ascending) in &keys {
                let (va, vb) = (&values[a], &values[b]);
                let ordering = match (va.is_null(), vb.is_null()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) if *ascending => va.cmp(vb),
                    (false, false) => vb.cmp(va),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
        Ok(indices)
    }

    /// Sort rows by one or more columns
    pub fn sort_values(&self, by: &[&str], ascending: bool) -> Result<Self> {
        let keys: Vec<(&str, bool)> = by.iter().map(|c| (*c, ascending)).collect();
        let indices = self.sorted_indices(&keys)?;
        self.take_rows(&indices)
    }

    /// Row view at `index`
    pub fn row(&self, index: usize) -> Result<Row<'_>> {
        if index >= self.row_count {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.row_count,
            });
        }
        Ok(Row::new(self, index))
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.row_count).map(move |i| Row::new(self, i))
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_rows = config::global().display_max_rows;
        let shown = self.row_count.min(max_rows);

        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.columns.len());
        for (name, column) in &self.columns {
            let mut col = vec![name.clone()];
            col.extend(column.iter().take(shown).map(|v| v.to_string()));
            cells.push(col);
        }
        let widths: Vec<usize> = cells
            .iter()
            .map(|c| c.iter().map(|s| s.chars().count()).max().unwrap_or(0))
            .collect();

        for line in 0..=shown {
            let rendered: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(col, w)| format!("{:>width$}", col[line], width = *w))
                .collect();
            writeln!(f, "{}", rendered.join("  "))?;
        }
        if shown < self.row_count {
            writeln!(f, "... {} more rows", self.row_count - shown)?;
        }
        write!(f, "[{} rows x {} columns]", self.row_count, self.columns.len())
    }
}
