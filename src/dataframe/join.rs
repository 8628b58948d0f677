use std::collections::{HashMap, HashSet};

use crate::column::Column;
use crate::config;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// Join type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Inner join (only rows matching in both tables)
    Inner,
    /// Left join (all rows from left table, matching rows from right table)
    Left,
    /// Right join (all rows from right table, matching rows from left table)
    Right,
    /// Outer join (all rows from both tables)
    Outer,
}

/// Join operations for DataFrames
pub trait JoinExt {
    /// Merge two DataFrames on key columns
    ///
    /// `left_on[i]` is matched against `right_on[i]`. Keys with the same name
    /// on both sides are emitted once; other clashing names get the
    /// configured suffixes.
    fn merge(
        &self,
        other: &DataFrame,
        how: JoinType,
        left_on: &[&str],
        right_on: &[&str],
    ) -> Result<DataFrame>;

    /// Cartesian product of the rows of both DataFrames
    fn cross_join(&self, other: &DataFrame) -> Result<DataFrame>;

    /// Rows of `self` with at least one match in `other`
    fn semi_join(&self, other: &DataFrame, left_on: &[&str], right_on: &[&str])
        -> Result<DataFrame>;

    /// Rows of `self` without a match in `other`
    fn anti_join(&self, other: &DataFrame, left_on: &[&str], right_on: &[&str])
        -> Result<DataFrame>;
}

fn check_keys(df: &DataFrame, keys: &[&str], side: &str) -> Result<()> {
    for key in keys {
        if !df.contains_column(key) {
            return Err(Error::ColumnNotFound(format!(
                "join column '{}' in the {} DataFrame",
                key, side
            )));
        }
    }
    Ok(())
}

fn row_keys(df: &DataFrame, keys: &[&str]) -> Result<Vec<Vec<Value>>> {
    let columns: Vec<Vec<Value>> = keys
        .iter()
        .map(|k| Ok(df.get_column(k)?.to_values()))
        .collect::<Result<_>>()?;
    Ok((0..df.row_count())
        .map(|row| columns.iter().map(|c| c[row].clone()).collect())
        .collect())
}

fn key_lookup(keys: &[Vec<Value>]) -> HashMap<&[Value], Vec<usize>> {
    let mut lookup: HashMap<&[Value], Vec<usize>> = HashMap::new();
    for (row, key) in keys.iter().enumerate() {
        lookup.entry(key.as_slice()).or_default().push(row);
    }
    lookup
}

fn validate_key_lists(left_on: &[&str], right_on: &[&str]) -> Result<()> {
    if left_on.len() != right_on.len() {
        return Err(Error::InvalidInput(format!(
            "left_on has {} columns but right_on has {}",
            left_on.len(),
            right_on.len()
        )));
    }
    if left_on.is_empty() {
        return Err(Error::InvalidInput("No join columns given".to_string()));
    }
    Ok(())
}

// Output names: left columns, then right columns minus shared keys, with
// suffixes on clashes between the two sides.
fn output_names(
    left: &DataFrame,
    right: &DataFrame,
    skip_right: &HashSet<&str>,
) -> (Vec<String>, Vec<String>) {
    let (left_suffix, right_suffix) = config::global().join_suffixes;
    let left_names = left.column_names();
    let right_names: Vec<String> = right
        .column_names()
        .into_iter()
        .filter(|n| !skip_right.contains(n.as_str()))
        .collect();

    let left_out = left_names
        .iter()
        .map(|n| {
            if right_names.contains(n) && !skip_right.contains(n.as_str()) {
                format!("{}{}", n, left_suffix)
            } else {
                n.clone()
            }
        })
        .collect();
    let right_out = right_names
        .iter()
        .map(|n| {
            if left_names.contains(n) {
                format!("{}{}", n, right_suffix)
            } else {
                n.clone()
            }
        })
        .collect();
    (left_out, right_out)
}

impl JoinExt for DataFrame {
    fn merge(
        &self,
        other: &DataFrame,
        how: JoinType,
        left_on: &[&str],
        right_on: &[&str],
    ) -> Result<DataFrame> {
        validate_key_lists(left_on, right_on)?;
        check_keys(self, left_on, "left")?;
        check_keys(other, right_on, "right")?;

        let left_keys = row_keys(self, left_on)?;
        let right_keys = row_keys(other, right_on)?;
        let right_lookup = key_lookup(&right_keys);

        let mut pairs: Vec<(Option<usize>, Option<usize>)> = Vec::new();
        match how {
            JoinType::Right => {
                let left_lookup = key_lookup(&left_keys);
                for (r, key) in right_keys.iter().enumerate() {
                    match left_lookup.get(key.as_slice()) {
                        Some(matches) => pairs.extend(matches.iter().map(|&l| (Some(l), Some(r)))),
                        None => pairs.push((None, Some(r))),
                    }
                }
            }
            _ => {
                let mut matched_right = vec![false; other.row_count()];
                for (l, key) in left_keys.iter().enumerate() {
                    match right_lookup.get(key.as_slice()) {
                        Some(matches) => {
                            for &r in matches {
                                matched_right[r] = true;
                                pairs.push((Some(l), Some(r)));
                            }
                        }
                        None if how != JoinType::Inner => pairs.push((Some(l), None)),
                        None => {}
                    }
                }
                if how == JoinType::Outer {
                    pairs.extend(
                        matched_right
                            .iter()
                            .enumerate()
                            .filter(|&(_, &m)| !m)
                            .map(|(r, _)| (None, Some(r))),
                    );
                }
            }
        }

        let shared: HashSet<&str> = left_on
            .iter()
            .zip(right_on)
            .filter(|(l, r)| l == r)
            .map(|(l, _)| *l)
            .collect();
        let (left_names, right_names) = output_names(self, other, &shared);

        let left_idx: Vec<Option<usize>> = pairs.iter().map(|p| p.0).collect();
        let right_idx: Vec<Option<usize>> = pairs.iter().map(|p| p.1).collect();

        let mut result = DataFrame::new();
        for ((name, column), out_name) in self.columns().zip(left_names) {
            let mut gathered = column.take_optional(&left_idx)?;
            if shared.contains(name) {
                // Rows that exist only on the right take their key from the right
                let right_column = other.get_column(name)?;
                let values: Vec<Value> = pairs
                    .iter()
                    .map(|(l, r)| match (l, r) {
                        (Some(l), _) => column.get(*l),
                        (None, Some(r)) => right_column.get(*r),
                        (None, None) => Ok(Value::Null),
                    })
                    .collect::<Result<_>>()?;
                gathered = Column::from_values_as(values.clone(), column.column_type())
                    .unwrap_or_else(|_| Column::from_values(values));
            }
            result.push_column(out_name, gathered)?;
        }
        let right_columns = other.columns().filter(|(n, _)| !shared.contains(n));
        for ((_, column), out_name) in right_columns.zip(right_names) {
            result.push_column(out_name, column.take_optional(&right_idx)?)?;
        }

        log::trace!(
            "merge {:?} on {:?}/{:?}: {} rows",
            how,
            left_on,
            right_on,
            result.row_count()
        );
        Ok(result)
    }

    fn cross_join(&self, other: &DataFrame) -> Result<DataFrame> {
        let (left_names, right_names) = output_names(self, other, &HashSet::new());
        let mut left_idx = Vec::with_capacity(self.row_count() * other.row_count());
        let mut right_idx = Vec::with_capacity(left_idx.capacity());
        for l in 0..self.row_count() {
            for r in 0..other.row_count() {
                left_idx.push(l);
                right_idx.push(r);
            }
        }

        let mut result = DataFrame::new();
        for ((_, column), name) in self.columns().zip(left_names) {
            result.push_column(name, column.take(&left_idx)?)?;
        }
        for ((_, column), name) in other.columns().zip(right_names) {
            result.push_column(name, column.take(&right_idx)?)?;
        }
        Ok(result)
    }

    fn semi_join(
        &self,
        other: &DataFrame,
        left_on: &[&str],
        right_on: &[&str],
    ) -> Result<DataFrame> {
        let mask = match_mask(self, other, left_on, right_on)?;
        self.filter_by_mask(&mask)
    }

    fn anti_join(
        &self,
        other: &DataFrame,
        left_on: &[&str],
        right_on: &[&str],
    ) -> Result<DataFrame> {
        let mask: Vec<bool> = match_mask(self, other, left_on, right_on)?
            .into_iter()
            .map(|m| !m)
            .collect();
        self.filter_by_mask(&mask)
    }
}

fn match_mask(
    left: &DataFrame,
    right: &DataFrame,
    left_on: &[&str],
    right_on: &[&str],
) -> Result<Vec<bool>> {
    validate_key_lists(left_on, right_on)?;
    check_keys(left, left_on, "left")?;
    check_keys(right, right_on, "right")?;
    let right_keys: HashSet<Vec<Value>> = row_keys(right, right_on)?.into_iter().collect();
    Ok(row_keys(left, left_on)?
        .iter()
        .map(|key| right_keys.contains(key))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> DataFrame {
        DataFrame::from_columns(vec![
            ("student_id", Column::from(vec![1i64, 2, 3, 4, 5])),
            ("name", Column::from(vec!["John", "Jane", "Jack", "Jill", "Jenny"])),
        ])
        .unwrap()
    }

    fn classes() -> DataFrame {
        DataFrame::from_columns(vec![
            ("class_id", Column::from(vec![1i64, 2, 2, 3, 3])),
            ("student_id", Column::from(vec![1i64, 2, 3, 6, 7])),
        ])
        .unwrap()
    }

    #[test]
    fn test_left_join_fills_missing() {
        let joined = students()
            .merge(&classes(), JoinType::Left, &["student_id"], &["student_id"])
            .unwrap();
        assert_eq!(joined.column_names(), vec!["student_id", "name", "class_id"]);
        assert_eq!(
            joined.get_column("class_id").unwrap(),
            &Column::Int64(vec![Some(1), Some(2), Some(2), None, None])
        );
    }

    #[test]
    fn test_outer_join_coalesces_keys() {
        let joined = students()
            .merge(&classes(), JoinType::Outer, &["student_id"], &["student_id"])
            .unwrap();
        assert_eq!(
            joined.get_column("student_id").unwrap(),
            &Column::from(vec![1i64, 2, 3, 4, 5, 6, 7])
        );
    }

    #[test]
    fn test_clashing_names_get_suffixes() {
        let left = DataFrame::from_columns(vec![
            ("k", Column::from(vec![1i64])),
            ("v", Column::from(vec![10i64])),
        ])
        .unwrap();
        let right = DataFrame::from_columns(vec![
            ("key", Column::from(vec![1i64])),
            ("v", Column::from(vec![20i64])),
        ])
        .unwrap();
        let joined = left.merge(&right, JoinType::Inner, &["k"], &["key"]).unwrap();
        assert_eq!(joined.column_names(), vec!["k", "v_x", "key", "v_y"]);
    }

    #[test]
    fn test_missing_join_column() {
        let result = students().merge(&classes(), JoinType::Inner, &["nope"], &["nope"]);
        assert!(matches!(result, Err(Error::ColumnNotFound(_))));
    }
}
