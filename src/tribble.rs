//! Row-wise DataFrame literals

use crate::column::Column;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// Build a DataFrame from a flat, row-major list of values
///
/// The leading strings of the form `"~name"` are the column names; the
/// remaining values fill the rows one after another. Column types are
/// inferred from the values.
///
/// ```
/// use tidyframe::tribble::tribble;
/// use tidyframe::Value;
///
/// let df = tribble(vec!["~colA".into(), "~colB".into(), "a".into(), 1.into(), "b".into(), 2.into()]).unwrap();
/// assert_eq!(df.shape(), (2, 2));
/// ```
pub fn tribble(items: Vec<Value>) -> Result<DataFrame> {
    let names: Vec<String> = items
        .iter()
        .map_while(|item| match item {
            Value::String(s) => s.strip_prefix('~').map(str::to_string),
            _ => None,
        })
        .collect();
    if names.is_empty() {
        return Err(Error::InvalidInput(
            "tribble needs at least one `~name` header".to_string(),
        ));
    }

    let values = &items[names.len()..];
    if values.len() % names.len() != 0 {
        return Err(Error::InvalidInput(format!(
            "{} values do not fill rows of {} columns",
            values.len(),
            names.len()
        )));
    }

    let width = names.len();
    let mut df = DataFrame::new();
    for (i, name) in names.into_iter().enumerate() {
        let column: Vec<Value> = values
            .iter()
            .skip(i)
            .step_by(width)
            .cloned()
            .collect();
        df.add_column(name, Column::from_values(column))?;
    }
    Ok(df)
}

/// DataFrame literal written row by row
///
/// ```
/// use tidyframe::tribble;
///
/// let df = tribble![
///     ~colA, ~colB;
///     "a", 1;
///     "b", 2;
///     "c", 3;
/// ]
/// .unwrap();
/// assert_eq!(df.column_names(), vec!["colA", "colB"]);
/// ```
#[macro_export]
macro_rules! tribble {
    ($(~$name:ident),+ ; $($($value:expr),+);* $(;)?) => {
        $crate::tribble::tribble(vec![
            $($crate::value::Value::from(concat!("~", stringify!($name))),)+
            $($($crate::value::Value::from($value),)+)*
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tribble_macro() {
        let df = crate::tribble![
            ~colA, ~colB;
            "a", 1;
            "b", 2;
            "c", 3;
        ]
        .unwrap();
        assert_eq!(df.column_names(), vec!["colA", "colB"]);
        assert_eq!(df.get_column("colA").unwrap(), &Column::from(vec!["a", "b", "c"]));
        assert_eq!(df.get_column("colB").unwrap(), &Column::from(vec![1i64, 2, 3]));
    }

    #[test]
    fn test_ragged_rows() {
        let items = vec![Value::from("~a"), Value::from("~b"), Value::from(1)];
        assert!(matches!(tribble(items), Err(Error::InvalidInput(_))));
        assert!(tribble(vec![Value::from(1)]).is_err());
    }
}
