use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::selectors::{resolve, ColumnSpec};

/// How [`rename`] names the columns
#[derive(Debug, Clone, PartialEq)]
pub enum Rename {
    /// One new name per column, in order
    Positional(Vec<String>),
    /// `(old, new)` pairs; old names that do not exist are skipped
    Mapping(Vec<(String, String)>),
}

impl Rename {
    pub fn positional<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rename::Positional(names.into_iter().map(Into::into).collect())
    }

    pub fn mapping<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Rename::Mapping(
            pairs
                .into_iter()
                .map(|(old, new)| (old.into(), new.into()))
                .collect(),
        )
    }
}

/// Rename columns
pub fn rename(df: &DataFrame, how: Rename) -> Result<DataFrame> {
    match how {
        Rename::Positional(names) => df.set_column_names(names),
        Rename::Mapping(pairs) => Ok(df.rename_columns(&pairs)),
    }
}

/// Rename the columns picked by `spec` with `f`
pub fn rename_with<F>(df: &DataFrame, spec: &[ColumnSpec], f: F) -> Result<DataFrame>
where
    F: Fn(&str) -> String,
{
    let names = resolve(&df.column_names(), spec)?;
    let mut pairs = Vec::with_capacity(names.len());
    for name in names {
        if !df.contains_column(&name) {
            return Err(Error::ColumnNotFound(name));
        }
        let new = f(&name);
        pairs.push((name, new));
    }
    Ok(df.rename_columns(&pairs))
}
