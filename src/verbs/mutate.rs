use crate::dataframe::{ApplyExt, DataFrame, Row};
use crate::error::Result;
use crate::value::Value;

/// A new (or replaced) column computed row by row
pub struct Mutation<'f> {
    name: String,
    definition: Box<dyn Fn(&Row<'_>) -> Result<Value> + 'f>,
}

impl<'f> Mutation<'f> {
    pub fn new<F>(name: &str, definition: F) -> Self
    where
        F: Fn(&Row<'_>) -> Result<Value> + 'f,
    {
        Self {
            name: name.to_string(),
            definition: Box::new(definition),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Mutation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutation").field("name", &self.name).finish()
    }
}

/// Add or replace columns, in order
///
/// Each mutation sees the columns created by the ones before it.
pub fn mutate(df: &DataFrame, mutations: &[Mutation<'_>]) -> Result<DataFrame> {
    let mut result = df.clone();
    for mutation in mutations {
        result = result.with_row_column(&mutation.name, |row| (mutation.definition)(row))?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    #[test]
    fn test_later_mutations_see_earlier_ones() {
        let df = DataFrame::from_columns(vec![("x", Column::from(vec![1i64, 2, 3]))]).unwrap();
        let result = mutate(
            &df,
            &[
                Mutation::new("y", |row| Ok(Value::Int64(row.get("x")?.as_i64().unwrap_or(0) * 10))),
                Mutation::new("x", |row| Ok(Value::Float64(row.get_f64("y")?.unwrap_or(0.0) / 2.0))),
            ],
        )
        .unwrap();
        assert_eq!(result.column_names(), vec!["x", "y"]);
        assert_eq!(result.get_column("x").unwrap(), &Column::from(vec![5.0, 10.0, 15.0]));
    }
}
