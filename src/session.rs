//! Scoped group-by sessions
//!
//! A [`GroupBy`] groups a DataFrame; entering it makes it the active
//! grouping of the current thread. While it is active, [`Stat`] functions
//! compute statistics over it and add them to the session, and
//! [`ActiveGroupBy::summarise`] collects them into one DataFrame. Leaving the
//! scope (dropping the guard) discards everything accumulated.
//!
//! ```
//! use tidyframe::{tribble, AggOptions, GroupBy, Stat};
//!
//! let df = tribble![
//!     ~gr, ~val;
//!     "A", 1; "A", 2; "A", 3; "B", 7; "B", 8; "B", 8; "B", 9;
//! ]
//! .unwrap();
//!
//! let summary = GroupBy::new(&df, &["gr"])
//!     .unwrap()
//!     .scope(|g| {
//!         Stat::n()?;
//!         Stat::mean("val", AggOptions::new())?;
//!         g.summarise()
//!     })
//!     .unwrap();
//! assert_eq!(summary.column_names(), vec!["gr", "n", "mean_val"]);
//! ```
//!
//! [`Stat`]: crate::stat::Stat

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::groupby::{concat_aligned, DataFrameGroupBy, GroupedColumn, GroupedSeries};

struct ActiveSession {
    grouped: Rc<DataFrameGroupBy>,
    stats: Vec<GroupedSeries>,
}

thread_local! {
    static ACTIVE: RefCell<Option<ActiveSession>> = RefCell::new(None);
}

/// The grouping of the active session on this thread
pub(crate) fn active_grouping() -> Result<Rc<DataFrameGroupBy>> {
    ACTIVE.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|session| Rc::clone(&session.grouped))
            .ok_or(Error::NoActiveSession)
    })
}

/// Add a named statistic to the active session
pub(crate) fn push_statistic(series: GroupedSeries) -> Result<()> {
    push_statistics(vec![series])
}

/// Add several statistics at once; on a name clash none of them is added
pub(crate) fn push_statistics(series: Vec<GroupedSeries>) -> Result<()> {
    ACTIVE.with(|slot| {
        let mut slot = slot.borrow_mut();
        let session = slot.as_mut().ok_or(Error::NoActiveSession)?;
        for (i, s) in series.iter().enumerate() {
            let mut taken = session.stats.iter().chain(&series[..i]);
            if taken.any(|other| other.name() == s.name()) {
                return Err(Error::DuplicateStatistic(s.name().to_string()));
            }
        }
        for s in series {
            log::trace!("adding statistic '{}'", s.name());
            session.stats.push(s);
        }
        Ok(())
    })
}

/// A DataFrame grouped by key columns, ready to be entered as a session
#[derive(Debug, Clone)]
pub struct GroupBy {
    grouped: Rc<DataFrameGroupBy>,
}

impl GroupBy {
    /// Group `df` by `keys`
    pub fn new(df: &DataFrame, keys: &[&str]) -> Result<Self> {
        Ok(Self {
            grouped: Rc::new(DataFrameGroupBy::new(df, keys)?),
        })
    }

    /// Make this grouping the active session of the current thread
    ///
    /// Fails with [`Error::SessionAlreadyActive`] if the thread already has
    /// one. The session lasts until the returned guard is dropped.
    pub fn enter(self) -> Result<ActiveGroupBy> {
        ACTIVE.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return Err(Error::SessionAlreadyActive);
            }
            *slot = Some(ActiveSession {
                grouped: Rc::clone(&self.grouped),
                stats: Vec::new(),
            });
            Ok(())
        })?;
        log::debug!("entered {}", self);
        Ok(ActiveGroupBy {
            group_by: self,
            summarised: Cell::new(false),
        })
    }

    /// Run `f` inside the session and leave it afterwards, whatever `f`
    /// returns
    pub fn scope<T, F>(self, f: F) -> Result<T>
    where
        F: FnOnce(&ActiveGroupBy) -> Result<T>,
    {
        let active = self.enter()?;
        f(&active)
    }

    /// `Ok(true)` while a session is active on this thread
    pub fn grouping_is_active() -> Result<bool> {
        active_grouping().map(|_| true)
    }

    /// The grouping columns
    pub fn groups(&self) -> &[String] {
        self.grouped.keys()
    }

    /// Number of rows per group
    pub fn size(&self) -> GroupedSeries {
        self.grouped.size()
    }

    /// Grouped view of a single column
    pub fn get(&self, column: &str) -> Result<GroupedColumn<'_>> {
        self.grouped.get(column)
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupBy([{}])", self.groups().join(", "))
    }
}

/// Guard of an active session; dropping it ends the session
#[derive(Debug)]
pub struct ActiveGroupBy {
    group_by: GroupBy,
    summarised: Cell<bool>,
}

impl ActiveGroupBy {
    /// Accumulated statistics side by side, after the key columns
    pub fn summarise(&self) -> Result<DataFrame> {
        let stats = ACTIVE.with(|slot| {
            slot.borrow()
                .as_ref()
                .map(|session| session.stats.clone())
                .ok_or(Error::NoActiveSession)
        })?;
        if stats.is_empty() {
            return Err(Error::EmptyData(
                "No statistics have been added to the GroupBy".to_string(),
            ));
        }
        let summary = concat_aligned(&stats)?;
        self.summarised.set(true);
        log::debug!(
            "summarised {} statistics over {}",
            stats.len(),
            self.group_by
        );
        Ok(summary)
    }

    pub fn summarize(&self) -> Result<DataFrame> {
        self.summarise()
    }

    /// Names of the accumulated statistics, in the order they were added
    pub fn stat_names(&self) -> Vec<String> {
        ACTIVE.with(|slot| {
            slot.borrow()
                .as_ref()
                .map(|session| session.stats.iter().map(|s| s.name().to_string()).collect())
                .unwrap_or_default()
        })
    }
}

impl Deref for ActiveGroupBy {
    type Target = GroupBy;

    fn deref(&self) -> &GroupBy {
        &self.group_by
    }
}

impl Drop for ActiveGroupBy {
    fn drop(&mut self) {
        // The slot is gone if the thread is already being torn down
        let released = ACTIVE.try_with(|slot| {
            let mut slot = slot.borrow_mut();
            let owned = matches!(
                slot.as_ref(),
                Some(session) if Rc::ptr_eq(&session.grouped, &self.group_by.grouped)
            );
            if owned {
                slot.take().map(|session| session.stats.len())
            } else {
                None
            }
        });
        if let Ok(Some(pending)) = released {
            if pending > 0 && !self.summarised.get() {
                log::warn!(
                    "{} left with {} statistics that were never summarised",
                    self.group_by,
                    pending
                );
            }
            log::debug!("left {}", self.group_by);
        }
    }
}
