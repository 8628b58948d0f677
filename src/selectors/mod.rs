//! Column selectors
//!
//! A [`Selector`] is a rule that picks an ordered subset of column names.
//! Selectors are built with the functions of this module, negated with
//! [`Selector::negate`] or unary `-`, and mixed with literal names through
//! [`ColumnSpec`] and [`resolve`].
//!
//! ```
//! use tidyframe::selectors::{contains, resolve, ColumnSpec};
//!
//! let columns: Vec<String> = ["name", "age", "height"].iter().map(|s| s.to_string()).collect();
//! assert_eq!(contains("a").select(&columns).unwrap(), vec!["name", "age"]);
//! assert_eq!((-contains("a")).select(&columns).unwrap(), vec!["height"]);
//!
//! let spec = vec![ColumnSpec::from("height"), contains("e").into()];
//! assert_eq!(resolve(&columns, &spec).unwrap(), vec!["height", "name", "age", "height"]);
//! ```

mod resolve;

use std::collections::HashSet;
use std::fmt;
use std::ops::Neg;

use regex::Regex;

use crate::error::{Error, Result};

pub use resolve::{resolve, ColumnSpec};

/// The matching rule of a selector
#[derive(Debug, Clone)]
pub enum SelectorRule {
    /// Names containing a substring
    Contains(String),
    /// Names with a match for a regular expression anywhere in them
    Matches(Regex),
    /// Names starting with a prefix
    StartsWith(String),
    /// Names ending with a suffix
    EndsWith(String),
    /// Every column
    Everything,
    /// The first column
    FirstCol,
    /// The last column
    LastCol,
    /// `prefix` followed by each zero padded number, in generated order
    NumRange {
        prefix: String,
        values: Vec<i64>,
        width: usize,
    },
    /// The listed names, all of which must exist
    AllOf(Vec<String>),
    /// Whichever of the listed names exist
    AnyOf(Vec<String>),
}

/// A column selection rule with a polarity
#[derive(Debug, Clone)]
pub struct Selector {
    rule: SelectorRule,
    negated: bool,
}

impl Selector {
    pub fn new(rule: SelectorRule) -> Self {
        Self {
            rule,
            negated: false,
        }
    }

    pub fn rule(&self) -> &SelectorRule {
        &self.rule
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The same rule with inverted polarity
    pub fn negate(&self) -> Selector {
        Selector {
            rule: self.rule.clone(),
            negated: !self.negated,
        }
    }

    /// Apply the selector to an ordered list of column names
    ///
    /// A negated selector returns every column its rule does not select,
    /// in input order. The rule is still evaluated first, so a negated
    /// `all_of` fails on missing names like the plain one.
    pub fn select(&self, columns: &[String]) -> Result<Vec<String>> {
        let selected = self.select_base(columns)?;
        if !self.negated {
            return Ok(selected);
        }
        let excluded: HashSet<&str> = selected.iter().map(String::as_str).collect();
        Ok(columns
            .iter()
            .filter(|c| !excluded.contains(c.as_str()))
            .cloned()
            .collect())
    }

    fn select_base(&self, columns: &[String]) -> Result<Vec<String>> {
        let keep = |f: &dyn Fn(&str) -> bool| -> Vec<String> {
            columns.iter().filter(|c| f(c.as_str())).cloned().collect()
        };

        let selected = match &self.rule {
            SelectorRule::Contains(s) => keep(&|c: &str| c.contains(s.as_str())),
            SelectorRule::Matches(re) => keep(&|c: &str| re.is_match(c)),
            SelectorRule::StartsWith(s) => keep(&|c: &str| c.starts_with(s.as_str())),
            SelectorRule::EndsWith(s) => keep(&|c: &str| c.ends_with(s.as_str())),
            SelectorRule::Everything => columns.to_vec(),
            SelectorRule::FirstCol => columns.first().cloned().into_iter().collect(),
            SelectorRule::LastCol => columns.last().cloned().into_iter().collect(),
            SelectorRule::NumRange {
                prefix,
                values,
                width,
            } => {
                let present: HashSet<&str> = columns.iter().map(String::as_str).collect();
                values
                    .iter()
                    .map(|v| format!("{}{}", prefix, zero_pad(*v, *width)))
                    .filter(|name| present.contains(name.as_str()))
                    .collect()
            }
            SelectorRule::AllOf(names) => {
                let present: HashSet<&str> = columns.iter().map(String::as_str).collect();
                let missing: Vec<String> = names
                    .iter()
                    .filter(|n| !present.contains(n.as_str()))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    return Err(Error::SelectionValidation { missing });
                }
                names.clone()
            }
            SelectorRule::AnyOf(names) => {
                let present: HashSet<&str> = columns.iter().map(String::as_str).collect();
                names
                    .iter()
                    .filter(|n| present.contains(n.as_str()))
                    .cloned()
                    .collect()
            }
        };
        Ok(selected)
    }
}

impl Neg for Selector {
    type Output = Selector;

    fn neg(self) -> Selector {
        Selector {
            rule: self.rule,
            negated: !self.negated,
        }
    }
}

impl Neg for &Selector {
    type Output = Selector;

    fn neg(self) -> Selector {
        self.negate()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "-")?;
        }
        match &self.rule {
            SelectorRule::Contains(s) => write!(f, "contains({:?})", s),
            SelectorRule::Matches(re) => write!(f, "matches({:?})", re.as_str()),
            SelectorRule::StartsWith(s) => write!(f, "starts_with({:?})", s),
            SelectorRule::EndsWith(s) => write!(f, "ends_with({:?})", s),
            SelectorRule::Everything => write!(f, "everything()"),
            SelectorRule::FirstCol => write!(f, "first_col()"),
            SelectorRule::LastCol => write!(f, "last_col()"),
            SelectorRule::NumRange {
                prefix,
                values,
                width,
            } => write!(f, "num_range({:?}, {:?}, {})", prefix, values, width),
            SelectorRule::AllOf(names) => write!(f, "all_of({:?})", names),
            SelectorRule::AnyOf(names) => write!(f, "any_of({:?})", names),
        }
    }
}

// `-5` at width 3 is `-05`
fn zero_pad(value: i64, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}

/// Columns whose name contains `substring` (case-sensitive)
pub fn contains(substring: &str) -> Selector {
    Selector::new(SelectorRule::Contains(substring.to_string()))
}

/// Columns whose name contains a match for the regular expression `pattern`
pub fn matches(pattern: &str) -> Result<Selector> {
    let re = Regex::new(pattern)?;
    Ok(Selector::new(SelectorRule::Matches(re)))
}

pub fn starts_with(prefix: &str) -> Selector {
    Selector::new(SelectorRule::StartsWith(prefix.to_string()))
}

pub fn ends_with(suffix: &str) -> Selector {
    Selector::new(SelectorRule::EndsWith(suffix.to_string()))
}

pub fn everything() -> Selector {
    Selector::new(SelectorRule::Everything)
}

/// The first column, or nothing for a frame without columns
pub fn first_col() -> Selector {
    Selector::new(SelectorRule::FirstCol)
}

/// The last column, or nothing for a frame without columns
pub fn last_col() -> Selector {
    Selector::new(SelectorRule::LastCol)
}

/// Columns named `prefix` followed by each of `values`, zero padded to
/// `width` characters
///
/// Names are produced in the order of `values`; generated names without a
/// matching column are skipped.
pub fn num_range<I>(prefix: &str, values: I, width: usize) -> Selector
where
    I: IntoIterator<Item = i64>,
{
    Selector::new(SelectorRule::NumRange {
        prefix: prefix.to_string(),
        values: values.into_iter().collect(),
        width,
    })
}

/// Exactly the listed columns; selecting fails if any is missing
pub fn all_of<S: AsRef<str>>(names: &[S]) -> Selector {
    Selector::new(SelectorRule::AllOf(
        names.iter().map(|n| n.as_ref().to_string()).collect(),
    ))
}

/// The listed columns that exist
pub fn any_of<S: AsRef<str>>(names: &[S]) -> Selector {
    Selector::new(SelectorRule::AnyOf(
        names.iter().map(|n| n.as_ref().to_string()).collect(),
    ))
}
