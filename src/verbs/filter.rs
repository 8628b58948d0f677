use crate::dataframe::{ApplyExt, DataFrame, QueryExt, Row};
use crate::error::Result;

/// A row condition for [`filter`]
pub enum Filter<'f> {
    /// Query expression, such as `"grade > 8 and name != 'Jill'"`
    Query(String),
    Predicate(Box<dyn Fn(&Row<'_>) -> Result<bool> + 'f>),
}

impl<'f> Filter<'f> {
    pub fn query(expr: &str) -> Self {
        Filter::Query(expr.to_string())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Row<'_>) -> Result<bool> + 'f,
    {
        Filter::Predicate(Box::new(f))
    }

    fn mask(&self, df: &DataFrame) -> Result<Vec<bool>> {
        match self {
            Filter::Query(expr) => df.query_mask(expr),
            Filter::Predicate(f) => df.mask_rows(|row| f(row)),
        }
    }
}

impl std::fmt::Debug for Filter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Query(expr) => f.debug_tuple("Query").field(expr).finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for Filter<'_> {
    fn from(expr: &str) -> Self {
        Filter::query(expr)
    }
}

/// Keep the rows meeting every condition; no conditions keeps every row
pub fn filter(df: &DataFrame, conditions: &[Filter<'_>]) -> Result<DataFrame> {
    let mut keep = vec![true; df.row_count()];
    for condition in conditions {
        for (k, m) in keep.iter_mut().zip(condition.mask(df)?) {
            *k &= m;
        }
    }
    df.filter_by_mask(&keep)
}
