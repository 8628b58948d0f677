use crate::dataframe::{DataFrame, JoinExt, JoinType};
use crate::error::Result;

/// Join keys: the same columns on both sides, or one list per side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum By {
    Same(Vec<String>),
    Pair(Vec<String>, Vec<String>),
}

impl By {
    fn sides(&self) -> (Vec<&str>, Vec<&str>) {
        match self {
            By::Same(keys) => {
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                (keys.clone(), keys)
            }
            By::Pair(left, right) => (
                left.iter().map(String::as_str).collect(),
                right.iter().map(String::as_str).collect(),
            ),
        }
    }
}

impl From<&str> for By {
    fn from(key: &str) -> Self {
        By::Same(vec![key.to_string()])
    }
}

impl From<Vec<&str>> for By {
    fn from(keys: Vec<&str>) -> Self {
        By::Same(keys.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for By {
    fn from(keys: &[&str]) -> Self {
        By::Same(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl From<(&str, &str)> for By {
    fn from((left, right): (&str, &str)) -> Self {
        By::Pair(vec![left.to_string()], vec![right.to_string()])
    }
}

impl From<(Vec<&str>, Vec<&str>)> for By {
    fn from((left, right): (Vec<&str>, Vec<&str>)) -> Self {
        By::Pair(
            left.into_iter().map(String::from).collect(),
            right.into_iter().map(String::from).collect(),
        )
    }
}

fn join(left: &DataFrame, right: &DataFrame, by: By, how: JoinType) -> Result<DataFrame> {
    let (left_on, right_on) = by.sides();
    left.merge(right, how, &left_on, &right_on)
}

/// Rows with a match on both sides
pub fn inner_join(left: &DataFrame, right: &DataFrame, by: impl Into<By>) -> Result<DataFrame> {
    join(left, right, by.into(), JoinType::Inner)
}

/// Every left row, with right columns missing where nothing matches
pub fn left_join(left: &DataFrame, right: &DataFrame, by: impl Into<By>) -> Result<DataFrame> {
    join(left, right, by.into(), JoinType::Left)
}

/// Every right row, in right order
pub fn right_join(left: &DataFrame, right: &DataFrame, by: impl Into<By>) -> Result<DataFrame> {
    join(left, right, by.into(), JoinType::Right)
}

/// Every row of both sides: left rows in order, then unmatched right rows
pub fn outer_join(left: &DataFrame, right: &DataFrame, by: impl Into<By>) -> Result<DataFrame> {
    join(left, right, by.into(), JoinType::Outer)
}

/// Left rows with a match on the right; only left columns are kept
pub fn semi_join(left: &DataFrame, right: &DataFrame, by: impl Into<By>) -> Result<DataFrame> {
    let by: By = by.into();
    let (left_on, right_on) = by.sides();
    left.semi_join(right, &left_on, &right_on)
}

/// Left rows without a match on the right; only left columns are kept
pub fn anti_join(left: &DataFrame, right: &DataFrame, by: impl Into<By>) -> Result<DataFrame> {
    let by: By = by.into();
    let (left_on, right_on) = by.sides();
    left.anti_join(right, &left_on, &right_on)
}

/// Every combination of a left row and a right row
pub fn crossing(left: &DataFrame, right: &DataFrame) -> Result<DataFrame> {
    left.cross_join(right)
}
