use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::groupby::DataFrameGroupBy;

/// Options for [`slice_max`] and [`slice_min`]
#[derive(Debug, Clone, PartialEq)]
pub struct SliceOptions {
    pub order_by: String,
    pub n: usize,
    /// Take `n` rows from each group of these columns
    pub group_by: Vec<String>,
}

impl SliceOptions {
    pub fn new(order_by: &str, n: usize) -> Self {
        Self {
            order_by: order_by.to_string(),
            n,
            group_by: Vec::new(),
        }
    }

    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.group_by = columns.iter().map(|c| c.to_string()).collect();
        self
    }
}

/// The `n` rows with the largest `order_by` values, per group when grouped
pub fn slice_max(df: &DataFrame, options: &SliceOptions) -> Result<DataFrame> {
    slice(df, options, false)
}

/// The `n` rows with the smallest `order_by` values, per group when grouped
pub fn slice_min(df: &DataFrame, options: &SliceOptions) -> Result<DataFrame> {
    slice(df, options, true)
}

fn slice(df: &DataFrame, options: &SliceOptions, ascending: bool) -> Result<DataFrame> {
    let order = df.sorted_indices(&[(options.order_by.as_str(), ascending)])?;
    if options.group_by.is_empty() {
        return df.take_rows(&order[..options.n.min(order.len())]);
    }

    // Rank every row once, then walk each group in rank order
    let mut rank = vec![0; df.row_count()];
    for (position, &row) in order.iter().enumerate() {
        rank[row] = position;
    }
    let keys: Vec<&str> = options.group_by.iter().map(String::as_str).collect();
    let grouped = DataFrameGroupBy::new(df, &keys)?;
    let mut rows = Vec::new();
    for (_, members) in grouped.indices() {
        let mut members = members.to_vec();
        members.sort_by_key(|&row| rank[row]);
        rows.extend(members.into_iter().take(options.n));
    }
    df.take_rows(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    fn sample() -> DataFrame {
        DataFrame::from_columns(vec![
            ("A", Column::from(vec![1i64, 2, 1, 2, 1, 2, 1, 2])),
            ("B", Column::from(vec![1i64, 2, 3, 4, 5, 6, 7, 8])),
        ])
        .unwrap()
    }

    #[test]
    fn test_grouped_slice_keeps_group_order() {
        let top = slice_max(&sample(), &SliceOptions::new("B", 2).group_by(&["A"])).unwrap();
        assert_eq!(top.get_column("A").unwrap(), &Column::from(vec![1i64, 1, 2, 2]));
        assert_eq!(top.get_column("B").unwrap(), &Column::from(vec![7i64, 5, 8, 6]));
    }
}
