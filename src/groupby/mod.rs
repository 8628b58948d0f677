use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::column::{Column, ColumnType};
use crate::config;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// Aggregation functions available on grouped columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggFunc {
    Sum,
    Mean,
    Median,
    Max,
    Min,
    /// Number of non-missing values
    Count,
    /// Number of rows, missing values included
    Size,
    First,
    Last,
    /// Sample standard deviation
    Std,
    /// Sample variance
    Var,
    /// Number of distinct non-missing values
    Nunique,
}

impl AggFunc {
    /// Canonical lowercase name, used for default statistic names
    pub fn name(&self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Mean => "mean",
            AggFunc::Median => "median",
            AggFunc::Max => "max",
            AggFunc::Min => "min",
            AggFunc::Count => "count",
            AggFunc::Size => "size",
            AggFunc::First => "first",
            AggFunc::Last => "last",
            AggFunc::Std => "std",
            AggFunc::Var => "var",
            AggFunc::Nunique => "nunique",
        }
    }

    fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            AggFunc::Sum | AggFunc::Mean | AggFunc::Median | AggFunc::Std | AggFunc::Var
        )
    }

    /// Type of the aggregated column for an input of `input` type
    pub fn output_type(&self, input: ColumnType) -> Result<ColumnType> {
        if self.is_arithmetic() && !input.is_numeric() {
            return Err(Error::InvalidOperation(format!(
                "Cannot compute {} of a {} column",
                self.name(),
                input.name()
            )));
        }
        Ok(match self {
            AggFunc::Sum => input,
            AggFunc::Mean | AggFunc::Median | AggFunc::Std | AggFunc::Var => ColumnType::Float64,
            AggFunc::Max | AggFunc::Min | AggFunc::First | AggFunc::Last => input,
            AggFunc::Count | AggFunc::Size | AggFunc::Nunique => ColumnType::Int64,
        })
    }

    /// Aggregate the values of one group
    pub fn apply(&self, values: &[Value], input: ColumnType) -> Result<Value> {
        let output = self.output_type(input)?;
        let present: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();

        let value = match self {
            AggFunc::Size => Value::Int64(values.len() as i64),
            AggFunc::Count => Value::Int64(present.len() as i64),
            AggFunc::Nunique => {
                let mut distinct: Vec<&Value> = present.clone();
                distinct.sort();
                distinct.dedup();
                Value::Int64(distinct.len() as i64)
            }
            AggFunc::First => present.first().map_or(Value::Null, |v| (*v).clone()),
            AggFunc::Last => present.last().map_or(Value::Null, |v| (*v).clone()),
            AggFunc::Min => present.iter().min().map_or(Value::Null, |v| (*v).clone()),
            AggFunc::Max => present.iter().max().map_or(Value::Null, |v| (*v).clone()),
            AggFunc::Sum if output == ColumnType::Int64 => {
                let mut total = 0i64;
                for v in present.iter().filter_map(|v| v.as_i64()) {
                    total = total.checked_add(v).ok_or_else(|| {
                        Error::InvalidOperation("Integer overflow in sum".to_string())
                    })?;
                }
                Value::Int64(total)
            }
            _ => {
                let numbers: Vec<f64> = present.iter().filter_map(|v| v.as_f64()).collect();
                float_aggregate(*self, &numbers).map_or(Value::Null, Value::Float64)
            }
        };
        Ok(value)
    }
}

fn float_aggregate(func: AggFunc, values: &[f64]) -> Option<f64> {
    let n = values.len();
    match func {
        AggFunc::Sum => Some(values.iter().sum()),
        AggFunc::Mean if n > 0 => Some(values.iter().sum::<f64>() / n as f64),
        AggFunc::Median if n > 0 => {
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            if n % 2 == 1 {
                Some(sorted[n / 2])
            } else {
                Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
            }
        }
        AggFunc::Var | AggFunc::Std if n > 1 => {
            let mean = values.iter().sum::<f64>() / n as f64;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            Some(if func == AggFunc::Std { var.sqrt() } else { var })
        }
        _ => None,
    }
}

impl FromStr for AggFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(AggFunc::Sum),
            "mean" | "avg" | "average" => Ok(AggFunc::Mean),
            "median" => Ok(AggFunc::Median),
            "max" => Ok(AggFunc::Max),
            "min" => Ok(AggFunc::Min),
            "count" => Ok(AggFunc::Count),
            "size" => Ok(AggFunc::Size),
            "first" => Ok(AggFunc::First),
            "last" => Ok(AggFunc::Last),
            "std" => Ok(AggFunc::Std),
            "var" => Ok(AggFunc::Var),
            "nunique" => Ok(AggFunc::Nunique),
            _ => Err(Error::InvalidOperation(format!(
                "Unknown aggregation function: {}",
                s
            ))),
        }
    }
}

/// Anything that names an aggregation: an [`AggFunc`] or its string name
pub trait IntoAggFunc {
    fn into_agg_func(self) -> Result<AggFunc>;
}

impl IntoAggFunc for AggFunc {
    fn into_agg_func(self) -> Result<AggFunc> {
        Ok(self)
    }
}

impl IntoAggFunc for &AggFunc {
    fn into_agg_func(self) -> Result<AggFunc> {
        Ok(*self)
    }
}

impl IntoAggFunc for &str {
    fn into_agg_func(self) -> Result<AggFunc> {
        self.parse()
    }
}

impl IntoAggFunc for &&str {
    fn into_agg_func(self) -> Result<AggFunc> {
        self.parse()
    }
}

impl IntoAggFunc for String {
    fn into_agg_func(self) -> Result<AggFunc> {
        self.parse()
    }
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A DataFrame grouped by one or more key columns
///
/// Groups are kept in ascending key order. Rows whose key contains a missing
/// value are dropped when `TidyConfig::drop_null_keys` is set.
#[derive(Debug, Clone)]
pub struct DataFrameGroupBy {
    source: DataFrame,
    by: Vec<String>,
    key_types: Vec<ColumnType>,
    groups: BTreeMap<Vec<Value>, Vec<usize>>,
}

impl DataFrameGroupBy {
    /// Group `df` by the `by` columns
    pub fn new(df: &DataFrame, by: &[&str]) -> Result<Self> {
        if by.is_empty() {
            return Err(Error::InvalidInput(
                "At least one grouping column is required".to_string(),
            ));
        }
        let key_columns: Vec<&Column> = by
            .iter()
            .map(|name| df.get_column(name))
            .collect::<Result<_>>()?;
        let drop_null_keys = config::global().drop_null_keys;

        let mut groups: BTreeMap<Vec<Value>, Vec<usize>> = BTreeMap::new();
        for row in 0..df.row_count() {
            let key: Vec<Value> = key_columns
                .iter()
                .map(|c| c.get(row))
                .collect::<Result<_>>()?;
            if drop_null_keys && key.iter().any(Value::is_null) {
                continue;
            }
            groups.entry(key).or_default().push(row);
        }

        Ok(Self {
            source: df.clone(),
            by: by.iter().map(|s| s.to_string()).collect(),
            key_types: key_columns.iter().map(|c| c.column_type()).collect(),
            groups,
        })
    }

    /// The grouped DataFrame
    pub fn source(&self) -> &DataFrame {
        &self.source
    }

    /// Names of the grouping columns
    pub fn keys(&self) -> &[String] {
        &self.by
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Iterate over `(key, row indices)` in key order
    pub fn indices(&self) -> impl Iterator<Item = (&[Value], &[usize])> {
        self.groups.iter().map(|(k, rows)| (k.as_slice(), rows.as_slice()))
    }

    fn group_keys(&self) -> Vec<Vec<Value>> {
        self.groups.keys().cloned().collect()
    }

    /// Number of rows per group
    pub fn size(&self) -> GroupedSeries {
        let counts: Vec<Option<i64>> = self
            .groups
            .values()
            .map(|rows| Some(rows.len() as i64))
            .collect();
        GroupedSeries {
            name: "size".to_string(),
            key_names: self.by.clone(),
            key_types: self.key_types.clone(),
            keys: self.group_keys(),
            values: Column::Int64(counts),
        }
    }

    /// Grouped view of a single column
    pub fn get(&self, column: &str) -> Result<GroupedColumn<'_>> {
        let data = self.source.get_column(column)?;
        Ok(GroupedColumn {
            group_by: self,
            name: column.to_string(),
            column: data,
        })
    }
}

/// One column of a grouped DataFrame
#[derive(Debug, Clone)]
pub struct GroupedColumn<'a> {
    group_by: &'a DataFrameGroupBy,
    name: String,
    column: &'a Column,
}

impl<'a> GroupedColumn<'a> {
    /// Name of the underlying column
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterate over `(key, values)` pairs in key order
    pub fn groups(&self) -> impl Iterator<Item = (&'a [Value], Vec<Value>)> + '_ {
        self.group_by.indices().map(move |(key, rows)| {
            let values = rows
                .iter()
                .map(|&row| self.column.get(row).unwrap_or(Value::Null))
                .collect();
            (key, values)
        })
    }

    /// Aggregate every group with `func`
    pub fn agg(&self, func: AggFunc) -> Result<GroupedSeries> {
        let input = self.column.column_type();
        let output = func.output_type(input)?;
        let values = self
            .groups()
            .map(|(_, values)| func.apply(&values, input))
            .collect::<Result<Vec<_>>>()?;
        let name = format!("{}_{}", func.name(), self.name);
        self.series(name, Column::from_values_as(values, output)?)
    }

    /// Aggregate every group with a custom function
    pub fn apply<F>(&self, name: &str, f: F) -> Result<GroupedSeries>
    where
        F: Fn(&[Value]) -> Result<Value>,
    {
        let values = self
            .groups()
            .map(|(_, values)| f(&values))
            .collect::<Result<Vec<_>>>()?;
        self.series(name.to_string(), Column::from_values(values))
    }

    fn series(&self, name: String, values: Column) -> Result<GroupedSeries> {
        GroupedSeries::new(
            name,
            self.group_by.by.clone(),
            self.group_by.key_types.clone(),
            self.group_by.group_keys(),
            values,
        )
    }
}

/// One value per group, labelled by the group keys
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSeries {
    name: String,
    key_names: Vec<String>,
    key_types: Vec<ColumnType>,
    keys: Vec<Vec<Value>>,
    values: Column,
}

impl GroupedSeries {
    /// Build a series; `keys` and `values` must have the same length and
    /// every key one entry per key name
    pub fn new(
        name: String,
        key_names: Vec<String>,
        key_types: Vec<ColumnType>,
        keys: Vec<Vec<Value>>,
        values: Column,
    ) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(Error::InconsistentRowCount {
                expected: keys.len(),
                found: values.len(),
            });
        }
        if key_names.len() != key_types.len() {
            return Err(Error::InvalidInput(
                "Key names and key types differ in length".to_string(),
            ));
        }
        if let Some(key) = keys.iter().find(|k| k.len() != key_names.len()) {
            return Err(Error::InvalidInput(format!(
                "Key {:?} does not have one value for each of {:?}",
                key, key_names
            )));
        }
        Ok(Self {
            name,
            key_names,
            key_types,
            keys,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The same series under another name
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn key_names(&self) -> &[String] {
        &self.key_names
    }

    /// Group keys in order
    pub fn keys(&self) -> &[Vec<Value>] {
        &self.keys
    }

    pub fn values(&self) -> &Column {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Value for one group key
    pub fn get(&self, key: &[Value]) -> Option<Value> {
        let pos = self.keys.iter().position(|k| k.as_slice() == key)?;
        self.values.get(pos).ok()
    }

    /// Round floating point values to `decimals` places
    pub fn round(mut self, decimals: u32) -> Result<Self> {
        self.values = self.values.round(decimals)?;
        Ok(self)
    }

    fn key_columns(&self) -> Result<Vec<(String, Column)>> {
        self.key_names
            .iter()
            .zip(&self.key_types)
            .enumerate()
            .map(|(i, (name, column_type))| {
                let values = self.keys.iter().map(|k| k[i].clone()).collect();
                Ok((name.clone(), Column::from_values_as(values, *column_type)?))
            })
            .collect()
    }

    /// Key columns followed by the value column
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        concat_aligned(std::slice::from_ref(self))
    }
}

/// Place grouped series side by side
///
/// All series must share key columns and group keys. The result holds the
/// key columns, then one column per series in the given order.
pub fn concat_aligned(series: &[GroupedSeries]) -> Result<DataFrame> {
    let first = series
        .first()
        .ok_or_else(|| Error::EmptyData("No grouped series to concatenate".to_string()))?;
    for other in &series[1..] {
        if other.key_names != first.key_names {
            return Err(Error::Alignment(format!(
                "'{}' is grouped by {:?} but '{}' by {:?}",
                other.name, other.key_names, first.name, first.key_names
            )));
        }
        if other.keys != first.keys {
            return Err(Error::Alignment(format!(
                "'{}' and '{}' have different groups",
                other.name, first.name
            )));
        }
    }

    let mut df = DataFrame::new();
    for (name, column) in first.key_columns()? {
        df.push_column(name, column)?;
    }
    for s in series {
        df.push_column(s.name.clone(), s.values.clone())?;
    }
    Ok(df)
}
