use crate::config;
use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::groupby::DataFrameGroupBy;
use crate::selectors::{resolve, ColumnSpec};

/// Options for [`count`]
#[derive(Debug, Clone, PartialEq)]
pub struct CountOptions {
    /// Largest groups first instead of key order
    pub sort: bool,
    /// Name of the count column
    pub name: String,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            sort: false,
            name: config::global().count_name,
        }
    }
}

/// Count the rows of each combination of the `spec` columns
///
/// The result holds the key columns and the count column, ordered by key,
/// or by descending count when `sort` is set (ties keep key order).
pub fn count(df: &DataFrame, spec: &[ColumnSpec], options: CountOptions) -> Result<DataFrame> {
    let keys = resolve(&df.column_names(), spec)?;
    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    let grouped = DataFrameGroupBy::new(df, &keys)?;
    let counts = grouped.size().rename(options.name.as_str()).to_dataframe()?;
    if options.sort {
        counts.sort_values(&[options.name.as_str()], false)
    } else {
        Ok(counts)
    }
}
