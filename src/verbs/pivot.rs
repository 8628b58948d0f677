use crate::dataframe::{DataFrame, StackOptions, TransformExt};
use crate::error::Result;
use crate::pivot::PivotWider;
use crate::selectors::{resolve, ColumnSpec};
use crate::value::Value;

/// Options for [`pivot_longer`]
#[derive(Debug, Clone, PartialEq)]
pub struct PivotLongerOptions {
    /// Column receiving the former column names
    pub names_to: String,
    /// Column receiving the values
    pub values_to: String,
    /// Drop rows whose value is missing
    pub drop_na: bool,
    /// The selected columns are the ones to keep, every other column is
    /// stacked
    pub cols_are_index: bool,
}

impl Default for PivotLongerOptions {
    fn default() -> Self {
        Self {
            names_to: "name".to_string(),
            values_to: "value".to_string(),
            drop_na: true,
            cols_are_index: false,
        }
    }
}

/// Options for [`pivot_wider`]
#[derive(Debug, Clone, PartialEq)]
pub struct PivotWiderOptions {
    pub names_from: String,
    pub values_from: Vec<String>,
    pub fill_value: Option<Value>,
    /// Name new columns `{value}_{name}` even with a single value column
    pub prefix_names: bool,
}

impl Default for PivotWiderOptions {
    fn default() -> Self {
        Self {
            names_from: "name".to_string(),
            values_from: vec!["value".to_string()],
            fill_value: None,
            prefix_names: false,
        }
    }
}

/// Reshape wide to long
///
/// The columns picked by `spec` are stacked into name/value pairs and the
/// other columns repeated for each of them (or the reverse with
/// `cols_are_index`). Output is row-major: all stacked columns of the first
/// row, then of the second, and so on.
pub fn pivot_longer(
    df: &DataFrame,
    spec: &[ColumnSpec],
    options: PivotLongerOptions,
) -> Result<DataFrame> {
    let picked = resolve(&df.column_names(), spec)?;
    for name in &picked {
        df.get_column(name)?;
    }
    let (index, stacked): (Vec<String>, Vec<String>) = if options.cols_are_index {
        // Index columns keep the order they were picked in
        let mut index: Vec<String> = Vec::with_capacity(picked.len());
        for name in picked.iter() {
            if !index.contains(name) {
                index.push(name.clone());
            }
        }
        let stacked = df
            .column_names()
            .into_iter()
            .filter(|c| !index.contains(c))
            .collect();
        (index, stacked)
    } else {
        df.column_names()
            .into_iter()
            .partition(|c| !picked.contains(c))
    };

    let index: Vec<&str> = index.iter().map(String::as_str).collect();
    let stacked: Vec<&str> = stacked.iter().map(String::as_str).collect();
    let long = df.stack(
        &index,
        &stacked,
        &StackOptions {
            var_name: options.names_to,
            value_name: options.values_to.clone(),
            dropna: false,
        },
    )?;

    if options.drop_na {
        let values = long.get_column(&options.values_to)?;
        let mask: Vec<bool> = (0..long.row_count()).map(|i| !values.is_null(i)).collect();
        long.filter_by_mask(&mask)
    } else {
        Ok(long)
    }
}

/// Reshape long to wide
///
/// See [`PivotWider`] for ordering and naming of the new columns.
pub fn pivot_wider(df: &DataFrame, options: PivotWiderOptions) -> Result<DataFrame> {
    let values_from: Vec<&str> = options.values_from.iter().map(String::as_str).collect();
    PivotWider::new(df, &options.names_from, &values_from)?
        .fill_value(options.fill_value)
        .prefix_names(options.prefix_names)
        .execute()
}
