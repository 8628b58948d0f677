//! Wide reshaping: spread the values of one column across new columns

use std::collections::{BTreeMap, BTreeSet};

use crate::column::Column;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// Builder for a wide pivot
///
/// Every distinct value of `names_from` becomes a column holding the
/// matching `values_from` entries; the remaining columns identify the
/// output rows. Rows and new columns come out in
/// ascending order.
#[derive(Debug, Clone)]
pub struct PivotWider<'a> {
    df: &'a DataFrame,
    index: Vec<String>,
    names_from: String,
    values_from: Vec<String>,
    fill_value: Option<Value>,
    prefix_names: bool,
}

impl<'a> PivotWider<'a> {
    /// Create a pivot of `df`; every other column becomes the index
    pub fn new(df: &'a DataFrame, names_from: &str, values_from: &[&str]) -> Result<Self> {
        df.get_column(names_from)?;
        if values_from.is_empty() {
            return Err(Error::InvalidInput(
                "At least one value column is required".to_string(),
            ));
        }
        for name in values_from {
            df.get_column(name)?;
        }
        let index = df
            .column_names()
            .into_iter()
            .filter(|c| c != names_from && !values_from.contains(&c.as_str()))
            .collect();

        Ok(Self {
            df,
            index,
            names_from: names_from.to_string(),
            values_from: values_from.iter().map(|s| s.to_string()).collect(),
            fill_value: None,
            prefix_names: false,
        })
    }

    /// Value written into empty cells, both those with no matching input
    /// row and missing input values
    pub fn fill_value(mut self, value: Option<Value>) -> Self {
        self.fill_value = value;
        self
    }

    /// Always name new columns `{value column}_{name}`
    pub fn prefix_names(mut self, prefix: bool) -> Self {
        self.prefix_names = prefix;
        self
    }

    /// Run the pivot
    pub fn execute(&self) -> Result<DataFrame> {
        let names_column = self.df.get_column(&self.names_from)?;
        let index_columns: Vec<&Column> = self
            .index
            .iter()
            .map(|c| self.df.get_column(c))
            .collect::<Result<_>>()?;

        // index key -> first source row, and (index key, name) -> source row
        let mut rows: BTreeMap<Vec<Value>, usize> = BTreeMap::new();
        let mut cells: BTreeMap<(Vec<Value>, Value), usize> = BTreeMap::new();
        let mut names: BTreeSet<Value> = BTreeSet::new();
        for row in 0..self.df.row_count() {
            let key: Vec<Value> = index_columns
                .iter()
                .map(|c| c.get(row))
                .collect::<Result<_>>()?;
            let name = names_column.get(row)?;
            rows.entry(key.clone()).or_insert(row);
            names.insert(name.clone());
            if cells.insert((key.clone(), name.clone()), row).is_some() {
                return Err(Error::InvalidOperation(format!(
                    "Index contains duplicate entries for {:?} and '{}', cannot reshape",
                    key, name
                )));
            }
        }

        let first_rows: Vec<usize> = rows.values().copied().collect();
        let mut result = DataFrame::new();
        for (name, column) in self.index.iter().zip(&index_columns) {
            result.push_column(name.clone(), column.take(&first_rows)?)?;
        }

        let prefix = self.prefix_names || self.values_from.len() > 1;
        for value_name in &self.values_from {
            let source = self.df.get_column(value_name)?;
            for name in &names {
                let values: Vec<Value> = rows
                    .keys()
                    .map(|key| match cells.get(&(key.clone(), name.clone())) {
                        Some(&row) => source.get(row),
                        None => Ok(Value::Null),
                    })
                    .collect::<Result<_>>()?;
                let mut column = Column::from_values_as(values, source.column_type())?;
                if let Some(fill) = &self.fill_value {
                    column = column.fill_null(fill);
                }
                let column_name = if prefix {
                    format!("{}_{}", value_name, name)
                } else {
                    name.to_string()
                };
                result.push_column(column_name, column)?;
            }
        }

        log::trace!(
            "pivot_wider on '{}': {} rows, {} new columns",
            self.names_from,
            result.row_count(),
            names.len() * self.values_from.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long() -> DataFrame {
        DataFrame::from_columns(vec![
            ("id", Column::from(vec![2i64, 1, 1, 2])),
            ("key", Column::from(vec!["b", "b", "a", "a"])),
            ("val", Column::from(vec![4i64, 2, 1, 3])),
        ])
        .unwrap()
    }

    #[test]
    fn test_pivot_sorts_rows_and_names() {
        let wide = PivotWider::new(&long(), "key", &["val"]).unwrap().execute().unwrap();
        assert_eq!(wide.column_names(), vec!["id", "a", "b"]);
        assert_eq!(wide.get_column("id").unwrap(), &Column::from(vec![1i64, 2]));
        assert_eq!(wide.get_column("a").unwrap(), &Column::from(vec![1i64, 3]));
        assert_eq!(wide.get_column("b").unwrap(), &Column::from(vec![2i64, 4]));
    }

    #[test]
    fn test_fill_value_and_prefix() {
        let df = long().head(3).unwrap();
        let wide = PivotWider::new(&df, "key", &["val"])
            .unwrap()
            .fill_value(Some(Value::Int64(0)))
            .prefix_names(true)
            .execute()
            .unwrap();
        assert_eq!(wide.column_names(), vec!["id", "val_a", "val_b"]);
        assert_eq!(wide.get_column("val_a").unwrap(), &Column::from(vec![1i64, 0]));
    }

    #[test]
    fn test_duplicate_entries() {
        let df = DataFrame::from_columns(vec![
            ("key", Column::from(vec!["a", "a"])),
            ("val", Column::from(vec![1i64, 2])),
        ])
        .unwrap();
        let result = PivotWider::new(&df, "key", &["val"]).unwrap().execute();
        assert!(matches!(result, Err(Error::InvalidOperation(_))));
    }
}
