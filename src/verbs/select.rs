use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::selectors::{resolve, ColumnSpec};

/// Select columns by name and selector
///
/// Columns come out in resolution order. A column named twice is selected
/// twice; a literal name that does not exist fails with
/// `Error::ColumnNotFound`.
pub fn select(df: &DataFrame, spec: &[ColumnSpec]) -> Result<DataFrame> {
    let names = resolve(&df.column_names(), spec)?;
    log::trace!("select {:?}", names);
    df.select_columns(&names)
}

/// Select `spec` followed by the `old` column of each `(new, old)` pair,
/// renaming those to `new`
pub fn select_renamed<S, T>(df: &DataFrame, spec: &[ColumnSpec], renames: &[(S, T)]) -> Result<DataFrame>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut full = spec.to_vec();
    full.extend(renames.iter().map(|(_, old)| ColumnSpec::from(old.as_ref())));
    let selected = select(df, &full)?;
    let mapping: Vec<(&str, &str)> = renames
        .iter()
        .map(|(new, old)| (old.as_ref(), new.as_ref()))
        .collect();
    Ok(selected.rename_columns(&mapping))
}
