use crate::column::Column;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// Borrowed view of one DataFrame row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    df: &'a DataFrame,
    index: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(df: &'a DataFrame, index: usize) -> Self {
        Self { df, index }
    }

    /// Position of the row in its DataFrame
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of `column` in this row
    pub fn get(&self, column: &str) -> Result<Value> {
        self.df.get_value(self.index, column)
    }

    /// Numeric value of `column`; `None` when missing
    pub fn get_f64(&self, column: &str) -> Result<Option<f64>> {
        let value = self.get(column)?;
        match value {
            Value::Null => Ok(None),
            _ => value.as_f64().map(Some).ok_or_else(|| {
                Error::Cast(format!("Column '{}' is not numeric", column))
            }),
        }
    }

    /// All values of the row, in column order
    pub fn values(&self) -> Vec<Value> {
        self.df
            .columns()
            .map(|(_, column)| column.get(self.index).unwrap_or(Value::Null))
            .collect()
    }
}

/// Row-wise function application for DataFrames
pub trait ApplyExt {
    /// Evaluate `f` on every row and collect the results into a column
    fn apply_rows<F>(&self, f: F) -> Result<Column>
    where
        F: Fn(&Row<'_>) -> Result<Value>;

    /// Evaluate a boolean condition on every row
    fn mask_rows<F>(&self, f: F) -> Result<Vec<bool>>
    where
        F: Fn(&Row<'_>) -> Result<bool>;

    /// Add (or replace) the column `name` computed row by row
    fn with_row_column<F>(&self, name: &str, f: F) -> Result<Self>
    where
        Self: Sized,
        F: Fn(&Row<'_>) -> Result<Value>;
}

impl ApplyExt for DataFrame {
    fn apply_rows<F>(&self, f: F) -> Result<Column>
    where
        F: Fn(&Row<'_>) -> Result<Value>,
    {
        let values = self.rows().map(|row| f(&row)).collect::<Result<Vec<_>>>()?;
        Ok(Column::from_values(values))
    }

    fn mask_rows<F>(&self, f: F) -> Result<Vec<bool>>
    where
        F: Fn(&Row<'_>) -> Result<bool>,
    {
        self.rows().map(|row| f(&row)).collect()
    }

    fn with_row_column<F>(&self, name: &str, f: F) -> Result<Self>
    where
        F: Fn(&Row<'_>) -> Result<Value>,
    {
        let column = self.apply_rows(f)?;
        let mut df = self.clone();
        if df.is_empty() {
            // A frame without columns has no rows to evaluate
            df.add_column(name, Column::empty(column.column_type()))?;
        } else {
            df.set_column(name, column)?;
        }
        Ok(df)
    }
}
