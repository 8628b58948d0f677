use crate::config;
use crate::error::Result;
use crate::groupby::{AggFunc, GroupedSeries, IntoAggFunc};
use crate::session::{active_grouping, push_statistic, push_statistics};

/// Options for [`Stat::agg`] and its shorthands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggOptions {
    decimals: Option<u32>,
    name: Option<String>,
    probe: bool,
}

impl AggOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round the result to `decimals` places
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Name of the statistic instead of `{func}_{column}`
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Compute and return the statistic without adding it to the session
    pub fn probe(mut self) -> Self {
        self.probe = true;
        self
    }
}

/// Statistics over the active [`GroupBy`](crate::session::GroupBy)
///
/// Every function needs an active session and fails with
/// [`Error::NoActiveSession`](crate::Error::NoActiveSession) otherwise. Names
/// must be unique within a session.
pub struct Stat;

impl Stat {
    /// Add a precomputed grouped series under `name`
    pub fn contribute(name: &str, series: GroupedSeries) -> Result<()> {
        push_statistic(series.rename(name))
    }

    /// Group sizes under `name`
    pub fn size(name: &str) -> Result<()> {
        let grouped = active_grouping()?;
        Stat::contribute(name, grouped.size())
    }

    /// Group sizes under the configured count name, `n` by default
    pub fn n() -> Result<()> {
        Stat::size(&config::global().count_name)
    }

    /// Aggregate `column` with `func`
    ///
    /// In probe mode the statistic is returned instead of being added.
    pub fn agg<F: IntoAggFunc>(
        func: F,
        column: &str,
        options: AggOptions,
    ) -> Result<Option<GroupedSeries>> {
        let func = func.into_agg_func()?;
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| default_name(func, column));
        let series = compute(func, column, options.decimals)?.rename(name);
        if options.probe {
            return Ok(Some(series));
        }
        push_statistic(series)?;
        Ok(None)
    }

    /// Aggregate `column` with several functions, each named
    /// `{func}_{column}`; an explicit name in `options` is ignored
    pub fn agg_many<I>(
        funcs: I,
        column: &str,
        options: AggOptions,
    ) -> Result<Option<Vec<GroupedSeries>>>
    where
        I: IntoIterator,
        I::Item: IntoAggFunc,
    {
        let series = funcs
            .into_iter()
            .map(|func| {
                let func = func.into_agg_func()?;
                Ok(compute(func, column, options.decimals)?.rename(default_name(func, column)))
            })
            .collect::<Result<Vec<_>>>()?;
        if options.probe {
            return Ok(Some(series));
        }
        push_statistics(series)?;
        Ok(None)
    }

    pub fn sum(column: &str, options: AggOptions) -> Result<Option<GroupedSeries>> {
        Stat::agg(AggFunc::Sum, column, options)
    }

    pub fn mean(column: &str, options: AggOptions) -> Result<Option<GroupedSeries>> {
        Stat::agg(AggFunc::Mean, column, options)
    }

    pub fn median(column: &str, options: AggOptions) -> Result<Option<GroupedSeries>> {
        Stat::agg(AggFunc::Median, column, options)
    }

    pub fn max(column: &str, options: AggOptions) -> Result<Option<GroupedSeries>> {
        Stat::agg(AggFunc::Max, column, options)
    }

    pub fn min(column: &str, options: AggOptions) -> Result<Option<GroupedSeries>> {
        Stat::agg(AggFunc::Min, column, options)
    }
}

fn default_name(func: AggFunc, column: &str) -> String {
    format!("{}_{}", func.name(), column)
}

fn compute(func: AggFunc, column: &str, decimals: Option<u32>) -> Result<GroupedSeries> {
    let grouped = active_grouping()?;
    let series = grouped.get(column)?.agg(func)?;
    match decimals {
        Some(decimals) => series.round(decimals),
        None => Ok(series),
    }
}
