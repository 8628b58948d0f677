//! Typed, nullable column storage
//!
//! A [`Column`] is the unit of storage of a [`DataFrame`](crate::DataFrame).
//! Missing entries are `None`; a floating point `NaN` is treated as missing
//! when a column is built.

use crate::error::{Error, Result};
use crate::value::Value;

// An f64 holds at most 17 significant decimal digits
const MAX_ROUND_DECIMALS: u32 = 17;

/// Enum to identify the type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int64,
    Float64,
    String,
    Boolean,
}

impl ColumnType {
    /// Name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::String => "string",
            ColumnType::Boolean => "boolean",
        }
    }

    /// Whether arithmetic aggregations apply to this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int64 | ColumnType::Float64)
    }
}

/// Enum representing a column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    String(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
}

impl Column {
    /// Create an empty column of the given type
    pub fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int64 => Column::Int64(Vec::new()),
            ColumnType::Float64 => Column::Float64(Vec::new()),
            ColumnType::String => Column::String(Vec::new()),
            ColumnType::Boolean => Column::Boolean(Vec::new()),
        }
    }

    /// Create a column of `len` missing values
    pub fn nulls(column_type: ColumnType, len: usize) -> Self {
        match column_type {
            ColumnType::Int64 => Column::Int64(vec![None; len]),
            ColumnType::Float64 => Column::Float64(vec![None; len]),
            ColumnType::String => Column::String(vec![None; len]),
            ColumnType::Boolean => Column::Boolean(vec![None; len]),
        }
    }

    /// Build a column from loose values, inferring the narrowest type
    ///
    /// All-null input becomes `Float64`. Integers mixed with floats become
    /// `Float64`. Any other mix of types is stored as `String`.
    pub fn from_values(values: Vec<Value>) -> Self {
        let mut has_int = false;
        let mut has_float = false;
        let mut has_bool = false;
        let mut has_string = false;
        for value in &values {
            match value {
                Value::Null => {}
                Value::Int64(_) => has_int = true,
                Value::Float64(_) => has_float = true,
                Value::Boolean(_) => has_bool = true,
                Value::String(_) => has_string = true,
            }
        }

        let numeric = has_int || has_float;
        if has_string || (has_bool && numeric) {
            Column::String(
                values
                    .into_iter()
                    .map(|v| if v.is_null() { None } else { Some(v.to_string()) })
                    .collect(),
            )
        } else if has_bool {
            Column::Boolean(values.iter().map(Value::as_bool).collect())
        } else if has_int && !has_float {
            Column::Int64(values.iter().map(Value::as_i64).collect())
        } else {
            Column::Float64(
                values
                    .iter()
                    .map(|v| v.as_f64().filter(|f| !f.is_nan()))
                    .collect(),
            )
        }
    }

    /// Build a column of a fixed type from loose values
    pub fn from_values_as(values: Vec<Value>, column_type: ColumnType) -> Result<Self> {
        fn mismatch(value: &Value, column_type: ColumnType) -> Error {
            Error::Cast(format!(
                "Cannot store {:?} in a {} column",
                value,
                column_type.name()
            ))
        }

        let column = match column_type {
            ColumnType::Int64 => Column::Int64(
                values
                    .iter()
                    .map(|v| match v {
                        Value::Null => Ok(None),
                        _ => v.as_i64().map(Some).ok_or_else(|| mismatch(v, column_type)),
                    })
                    .collect::<Result<_>>()?,
            ),
            ColumnType::Float64 => Column::Float64(
                values
                    .iter()
                    .map(|v| match v {
                        Value::Null => Ok(None),
                        _ => v
                            .as_f64()
                            .map(|f| if f.is_nan() { None } else { Some(f) })
                            .ok_or_else(|| mismatch(v, column_type)),
                    })
                    .collect::<Result<_>>()?,
            ),
            ColumnType::Boolean => Column::Boolean(
                values
                    .iter()
                    .map(|v| match v {
                        Value::Null => Ok(None),
                        _ => v.as_bool().map(Some).ok_or_else(|| mismatch(v, column_type)),
                    })
                    .collect::<Result<_>>()?,
            ),
            ColumnType::String => Column::String(
                values
                    .into_iter()
                    .map(|v| if v.is_null() { None } else { Some(v.to_string()) })
                    .collect(),
            ),
        };
        Ok(column)
    }

    /// Get the length of the column
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::String(v) => v.len(),
            Column::Boolean(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the type of the column
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int64(_) => ColumnType::Int64,
            Column::Float64(_) => ColumnType::Float64,
            Column::String(_) => ColumnType::String,
            Column::Boolean(_) => ColumnType::Boolean,
        }
    }

    /// Get the value at `index`
    pub fn get(&self, index: usize) -> Result<Value> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(self.value_unchecked(index))
    }

    // Callers guarantee `index < self.len()`
    fn value_unchecked(&self, index: usize) -> Value {
        match self {
            Column::Int64(v) => v[index].into(),
            Column::Float64(v) => v[index].into(),
            Column::String(v) => v[index].clone().into(),
            Column::Boolean(v) => v[index].into(),
        }
    }

    /// Whether the entry at `index` is missing
    pub fn is_null(&self, index: usize) -> bool {
        match self {
            Column::Int64(v) => v.get(index).map_or(true, Option::is_none),
            Column::Float64(v) => v.get(index).map_or(true, Option::is_none),
            Column::String(v) => v.get(index).map_or(true, Option::is_none),
            Column::Boolean(v) => v.get(index).map_or(true, Option::is_none),
        }
    }

    /// Count of missing entries
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }

    /// Iterate over the column as loose values
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(move |i| self.value_unchecked(i))
    }

    /// Collect the column into loose values
    pub fn to_values(&self) -> Vec<Value> {
        self.iter().collect()
    }

    /// Numeric view of the column; fails for non-numeric columns
    pub fn to_f64(&self) -> Result<Vec<Option<f64>>> {
        match self {
            Column::Int64(v) => Ok(v.iter().map(|x| x.map(|x| x as f64)).collect()),
            Column::Float64(v) => Ok(v.clone()),
            other => Err(Error::InvalidOperation(format!(
                "Expected a numeric column, found {}",
                other.column_type().name()
            ))),
        }
    }

    /// Gather rows by position
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(Error::IndexOutOfBounds {
                index: bad,
                size: self.len(),
            });
        }
        Ok(match self {
            Column::Int64(v) => Column::Int64(indices.iter().map(|&i| v[i]).collect()),
            Column::Float64(v) => Column::Float64(indices.iter().map(|&i| v[i]).collect()),
            Column::String(v) => Column::String(indices.iter().map(|&i| v[i].clone()).collect()),
            Column::Boolean(v) => Column::Boolean(indices.iter().map(|&i| v[i]).collect()),
        })
    }

    /// Gather rows by position, producing a missing value for `None`
    pub fn take_optional(&self, indices: &[Option<usize>]) -> Result<Self> {
        if let Some(bad) = indices.iter().flatten().find(|&&i| i >= self.len()) {
            return Err(Error::IndexOutOfBounds {
                index: *bad,
                size: self.len(),
            });
        }
        Ok(match self {
            Column::Int64(v) => Column::Int64(indices.iter().map(|i| i.and_then(|i| v[i])).collect()),
            Column::Float64(v) => {
                Column::Float64(indices.iter().map(|i| i.and_then(|i| v[i])).collect())
            }
            Column::String(v) => {
                Column::String(indices.iter().map(|i| i.and_then(|i| v[i].clone())).collect())
            }
            Column::Boolean(v) => {
                Column::Boolean(indices.iter().map(|i| i.and_then(|i| v[i])).collect())
            }
        })
    }

    /// Round a float column to `decimals` places; integer columns are
    /// returned unchanged
    pub fn round(&self, decimals: u32) -> Result<Self> {
        match self {
            // Beyond f64 precision there is nothing left to round
            Column::Float64(_) if decimals >= MAX_ROUND_DECIMALS => Ok(self.clone()),
            Column::Float64(v) => {
                let factor = 10f64.powi(decimals as i32);
                Ok(Column::Float64(
                    v.iter()
                        .map(|x| {
                            x.map(|x| {
                                let rounded = (x * factor).round() / factor;
                                if rounded.is_finite() {
                                    rounded
                                } else {
                                    x
                                }
                            })
                        })
                        .collect(),
                ))
            }
            Column::Int64(_) => Ok(self.clone()),
            other => Err(Error::InvalidOperation(format!(
                "Cannot round a {} column",
                other.column_type().name()
            ))),
        }
    }

    /// Replace missing entries with `fill`
    ///
    /// The column keeps its type when `fill` fits it, otherwise the values
    /// are re-inferred.
    pub fn fill_null(&self, fill: &Value) -> Self {
        let values: Vec<Value> = self
            .iter()
            .map(|v| if v.is_null() { fill.clone() } else { v })
            .collect();
        Column::from_values_as(values.clone(), self.column_type())
            .unwrap_or_else(|_| Column::from_values(values))
    }

    /// Concatenate columns end to end
    pub fn concat(columns: &[&Column]) -> Self {
        let values: Vec<Value> = columns.iter().flat_map(|c| c.iter()).collect();
        match columns.first() {
            Some(first) if columns.iter().all(|c| c.column_type() == first.column_type()) => {
                Column::from_values_as(values.clone(), first.column_type())
                    .unwrap_or_else(|_| Column::from_values(values))
            }
            _ => Column::from_values(values),
        }
    }
}

impl From<Vec<i64>> for Column {
    fn from(v: Vec<i64>) -> Self {
        Column::Int64(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<i32>> for Column {
    fn from(v: Vec<i32>) -> Self {
        Column::Int64(v.into_iter().map(|x| Some(x as i64)).collect())
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Column::Float64(
            v.into_iter()
                .map(|x| if x.is_nan() { None } else { Some(x) })
                .collect(),
        )
    }
}

impl From<Vec<bool>> for Column {
    fn from(v: Vec<bool>) -> Self {
        Column::Boolean(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self {
        Column::String(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for Column {
    fn from(v: Vec<&str>) -> Self {
        Column::String(v.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<Option<i64>>> for Column {
    fn from(v: Vec<Option<i64>>) -> Self {
        Column::Int64(v)
    }
}

impl From<Vec<Option<f64>>> for Column {
    fn from(v: Vec<Option<f64>>) -> Self {
        Column::Float64(v.into_iter().map(|x| x.filter(|f| !f.is_nan())).collect())
    }
}

impl From<Vec<Option<String>>> for Column {
    fn from(v: Vec<Option<String>>) -> Self {
        Column::String(v)
    }
}

impl From<Vec<Option<bool>>> for Column {
    fn from(v: Vec<Option<bool>>) -> Self {
        Column::Boolean(v)
    }
}

impl From<Vec<Value>> for Column {
    fn from(v: Vec<Value>) -> Self {
        Column::from_values(v)
    }
}
