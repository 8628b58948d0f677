//! Tidy verbs
//!
//! Each verb takes a DataFrame by reference and returns a new one. The same
//! verbs are available as methods through [`TidyExt`].

mod count;
mod filter;
mod join;
mod mutate;
mod pivot;
mod rename;
mod select;
mod slice;

pub use count::{count, CountOptions};
pub use filter::{filter, Filter};
pub use join::{
    anti_join, crossing, inner_join, left_join, outer_join, right_join, semi_join, By,
};
pub use mutate::{mutate, Mutation};
pub use pivot::{pivot_longer, pivot_wider, PivotLongerOptions, PivotWiderOptions};
pub use rename::{rename, rename_with, Rename};
pub use select::{select, select_renamed};
pub use slice::{slice_max, slice_min, SliceOptions};

use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::selectors::ColumnSpec;

/// Method form of the tidy verbs, for chaining
pub trait TidyExt {
    fn select(&self, spec: &[ColumnSpec]) -> Result<DataFrame>;

    fn rename(&self, how: Rename) -> Result<DataFrame>;

    fn count(&self, spec: &[ColumnSpec], options: CountOptions) -> Result<DataFrame>;

    fn mutate(&self, mutations: &[Mutation<'_>]) -> Result<DataFrame>;

    fn filter(&self, conditions: &[Filter<'_>]) -> Result<DataFrame>;

    fn pivot_longer(&self, spec: &[ColumnSpec], options: PivotLongerOptions) -> Result<DataFrame>;

    fn pivot_wider(&self, options: PivotWiderOptions) -> Result<DataFrame>;

    fn slice_max(&self, options: &SliceOptions) -> Result<DataFrame>;

    fn slice_min(&self, options: &SliceOptions) -> Result<DataFrame>;
}

impl TidyExt for DataFrame {
    fn select(&self, spec: &[ColumnSpec]) -> Result<DataFrame> {
        select(self, spec)
    }

    fn rename(&self, how: Rename) -> Result<DataFrame> {
        rename(self, how)
    }

    fn count(&self, spec: &[ColumnSpec], options: CountOptions) -> Result<DataFrame> {
        count(self, spec, options)
    }

    fn mutate(&self, mutations: &[Mutation<'_>]) -> Result<DataFrame> {
        mutate(self, mutations)
    }

    fn filter(&self, conditions: &[Filter<'_>]) -> Result<DataFrame> {
        filter(self, conditions)
    }

    fn pivot_longer(&self, spec: &[ColumnSpec], options: PivotLongerOptions) -> Result<DataFrame> {
        pivot_longer(self, spec, options)
    }

    fn pivot_wider(&self, options: PivotWiderOptions) -> Result<DataFrame> {
        pivot_wider(self, options)
    }

    fn slice_max(&self, options: &SliceOptions) -> Result<DataFrame> {
        slice_max(self, options)
    }

    fn slice_min(&self, options: &SliceOptions) -> Result<DataFrame> {
        slice_min(self, options)
    }
}
