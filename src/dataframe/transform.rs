use crate::column::Column;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// DataFrame shape transformation options - stack operation
#[derive(Debug, Clone)]
pub struct StackOptions {
    /// Name of the column receiving the stacked column names
    pub var_name: String,
    /// Name of the column receiving the stacked values
    pub value_name: String,
    /// Whether to drop rows whose stacked value is missing
    pub dropna: bool,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            var_name: "variable".to_string(),
            value_name: "value".to_string(),
            dropna: false,
        }
    }
}

/// Shape transformations for DataFrames
pub trait TransformExt {
    /// Stack `value_vars` into name/value pairs, keeping `id_vars`
    ///
    /// Output is row-major: every input row contributes one output row per
    /// value column, in column order.
    fn stack(&self, id_vars: &[&str], value_vars: &[&str], options: &StackOptions)
        -> Result<DataFrame>;
}

impl TransformExt for DataFrame {
    fn stack(
        &self,
        id_vars: &[&str],
        value_vars: &[&str],
        options: &StackOptions,
    ) -> Result<DataFrame> {
        for name in [options.var_name.as_str(), options.value_name.as_str()] {
            if id_vars.contains(&name) {
                return Err(Error::InvalidInput(format!(
                    "Output column '{}' clashes with an identifier column",
                    name
                )));
            }
        }

        let id_columns: Vec<&Column> = id_vars
            .iter()
            .map(|c| self.get_column(c))
            .collect::<Result<_>>()?;
        let value_columns: Vec<&Column> = value_vars
            .iter()
            .map(|c| self.get_column(c))
            .collect::<Result<_>>()?;

        let mut source_rows = Vec::new();
        let mut names = Vec::new();
        let mut values = Vec::new();
        for row in 0..self.row_count() {
            for (name, column) in value_vars.iter().zip(&value_columns) {
                let value = column.get(row)?;
                if options.dropna && value.is_null() {
                    continue;
                }
                source_rows.push(row);
                names.push(Value::from(*name));
                values.push(value);
            }
        }

        let mut result = DataFrame::new();
        for (name, column) in id_vars.iter().zip(id_columns) {
            result.push_column(name.to_string(), column.take(&source_rows)?)?;
        }
        let var_column = if names.is_empty() {
            Column::empty(crate::column::ColumnType::String)
        } else {
            Column::from_values(names)
        };
        result.push_column(options.var_name.clone(), var_column)?;

        let value_types: Vec<_> = value_columns.iter().map(|c| c.column_type()).collect();
        let value_column = match value_types.first() {
            Some(first) if value_types.iter().all(|t| t == first) => {
                Column::from_values_as(values.clone(), *first)
                    .unwrap_or_else(|_| Column::from_values(values))
            }
            _ => Column::from_values(values),
        };
        result.push_column(options.value_name.clone(), value_column)?;
        Ok(result)
    }
}
