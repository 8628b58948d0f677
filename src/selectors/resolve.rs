use crate::error::Result;
use crate::selectors::Selector;

/// A column specification: literal names, selectors and nested lists of
/// both
#[derive(Debug, Clone)]
pub enum ColumnSpec {
    /// A literal name, taken as-is
    Name(String),
    Selector(Selector),
    List(Vec<ColumnSpec>),
}

impl From<&str> for ColumnSpec {
    fn from(name: &str) -> Self {
        ColumnSpec::Name(name.to_string())
    }
}

impl From<String> for ColumnSpec {
    fn from(name: String) -> Self {
        ColumnSpec::Name(name)
    }
}

impl From<&String> for ColumnSpec {
    fn from(name: &String) -> Self {
        ColumnSpec::Name(name.clone())
    }
}

impl From<Selector> for ColumnSpec {
    fn from(selector: Selector) -> Self {
        ColumnSpec::Selector(selector)
    }
}

impl<T: Into<ColumnSpec>> From<Vec<T>> for ColumnSpec {
    fn from(items: Vec<T>) -> Self {
        ColumnSpec::List(items.into_iter().map(Into::into).collect())
    }
}

/// Expand a column specification against the columns of a frame
///
/// Elements are expanded left to right and their results appended in order.
/// Literal names are not checked against `columns`, and nothing is
/// deduplicated: a column named twice comes out twice.
pub fn resolve(columns: &[String], spec: &[ColumnSpec]) -> Result<Vec<String>> {
    let mut resolved = Vec::new();
    for item in spec {
        match item {
            ColumnSpec::Name(name) => resolved.push(name.clone()),
            ColumnSpec::Selector(selector) => {
                let selected = selector.select(columns)?;
                log::trace!("{} selected {:?}", selector, selected);
                resolved.extend(selected);
            }
            ColumnSpec::List(items) => resolved.extend(resolve(columns, items)?),
        }
    }
    Ok(resolved)
}
