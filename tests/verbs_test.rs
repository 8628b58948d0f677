mod common;

use common::fixtures::students;
use tidyframe::selectors::{contains, ends_with, everything, starts_with};
use tidyframe::verbs::{
    count, filter, mutate, rename, rename_with, select, select_renamed, slice_max, slice_min,
    CountOptions, Filter, Mutation, Rename, SliceOptions,
};
use tidyframe::{tribble, Column, DataFrame, Error, TidyExt, Value};

fn people() -> DataFrame {
    tribble![
        ~name, ~age, ~height, ~eye_color;
        "Luke", 19, 1.72, "blue";
        "Leia", 19, 1.50, "brown";
        "Owen", 52, 1.78, "blue";
    ]
    .unwrap()
}

fn sliceable() -> DataFrame {
    DataFrame::from_columns(vec![
        ("A", Column::from(vec![1i64, 2, 1, 2, 1, 2, 1, 2])),
        ("B", Column::from(vec![1i64, 2, 3, 4, 5, 6, 7, 8])),
    ])
    .unwrap()
}

#[test]
fn test_tribble_infers_types() {
    let df = people();
    assert_eq!(df.shape(), (3, 4));
    assert_eq!(df.get_column("age").unwrap(), &Column::from(vec![19i64, 19, 52]));
    assert_eq!(df.get_column("height").unwrap(), &Column::from(vec![1.72, 1.50, 1.78]));
}

#[test]
fn test_select_with_selectors() {
    let df = people();
    let picked = select(&df, &["name".into(), ends_with("color").into()]).unwrap();
    assert_eq!(picked.column_names(), vec!["name", "eye_color"]);

    let dropped = select(&df, &[(-contains("_")).into()]).unwrap();
    assert_eq!(dropped.column_names(), vec!["name", "age", "height"]);

    let twice = select(&df, &["age".into(), starts_with("a").into()]).unwrap();
    assert_eq!(twice.column_names(), vec!["age", "age"]);
}

#[test]
fn test_select_unknown_name() {
    let result = select(&people(), &["weight".into()]);
    assert!(matches!(result, Err(Error::ColumnNotFound(name)) if name == "weight"));
}

#[test]
fn test_select_renamed() {
    let picked = select_renamed(&people(), &["name".into()], &[("eyes", "eye_color")]).unwrap();
    assert_eq!(picked.column_names(), vec!["name", "eyes"]);
}

#[test]
fn test_rename() {
    let df = people();
    let positional = rename(&df, Rename::positional(["n", "a", "h", "e"])).unwrap();
    assert_eq!(positional.column_names(), vec!["n", "a", "h", "e"]);

    let mapped = rename(&df, Rename::mapping([("age", "years"), ("nope", "x")])).unwrap();
    assert_eq!(mapped.column_names(), vec!["name", "years", "height", "eye_color"]);

    let short = rename(&df, Rename::positional(["only"]));
    assert!(matches!(short, Err(Error::InvalidInput(_))));
}

#[test]
fn test_rename_with() {
    let upper = rename_with(&people(), &[ends_with("e").into()], |name| name.to_uppercase()).unwrap();
    assert_eq!(upper.column_names(), vec!["NAME", "AGE", "height", "eye_color"]);

    let missing = rename_with(&people(), &["weight".into()], |name| name.to_string());
    assert!(matches!(missing, Err(Error::ColumnNotFound(_))));
}

#[test]
fn test_count() {
    let df = DataFrame::from_columns(vec![
        ("idx", Column::from(vec![1i64, 2, 3, 4])),
        ("A", Column::from(vec![1i64, 2, 2, 3])),
    ])
    .unwrap();

    let counted = count(&df, &["A".into()], CountOptions::default()).unwrap();
    assert_eq!(counted.column_names(), vec!["A", "n"]);
    assert_eq!(counted.get_column("A").unwrap(), &Column::from(vec![1i64, 2, 3]));
    assert_eq!(counted.get_column("n").unwrap(), &Column::from(vec![1i64, 2, 1]));

    let options = CountOptions {
        sort: true,
        name: "rows".to_string(),
    };
    let sorted = count(&df, &["A".into()], options).unwrap();
    assert_eq!(sorted.get_column("A").unwrap(), &Column::from(vec![2i64, 1, 3]));
    assert_eq!(sorted.get_column("rows").unwrap(), &Column::from(vec![2i64, 1, 1]));
}

#[test]
fn test_mutate() {
    let result = mutate(
        &students(),
        &[
            Mutation::new("passed", |row| {
                Ok(Value::from(row.get("grade")?.as_i64().unwrap_or(0) >= 9))
            }),
            Mutation::new("label", |row| {
                Ok(Value::from(format!("{}:{}", row.get("name")?, row.get("passed")?)))
            }),
        ],
    )
    .unwrap();
    assert_eq!(
        result.get_column("passed").unwrap(),
        &Column::from(vec![true, false, true, true, false])
    );
    assert_eq!(result.get_value(1, "label").unwrap(), Value::from("Jane:false"));
}

#[test]
fn test_filter_queries_and_predicates() {
    let df = students();
    let single = filter(&df, &["grade > 8".into()]).unwrap();
    assert_eq!(single.get_column("name").unwrap(), &Column::from(vec!["John", "Jack", "Jill"]));

    let both = filter(&df, &["grade > 8".into(), Filter::query("name != 'Jack'")]).unwrap();
    assert_eq!(both.get_column("name").unwrap(), &Column::from(vec!["John", "Jill"]));

    let mixed = filter(
        &df,
        &[
            Filter::query("student_id <= 4"),
            Filter::predicate(|row| Ok(row.get("name")?.as_str().map_or(false, |n| n.ends_with('n')))),
        ],
    )
    .unwrap();
    assert_eq!(mixed.get_column("name").unwrap(), &Column::from(vec!["John"]));

    assert_eq!(filter(&df, &[]).unwrap(), df);
}

#[test]
fn test_filter_bad_query() {
    let result = filter(&students(), &["grade = 8".into()]);
    assert!(matches!(result, Err(Error::InvalidValue(_))));
}

#[test]
fn test_slice_max_and_min() {
    let df = sliceable();
    let top = slice_max(&df, &SliceOptions::new("B", 3)).unwrap();
    assert_eq!(top.get_column("B").unwrap(), &Column::from(vec![8i64, 7, 6]));

    let bottom = slice_min(&df, &SliceOptions::new("B", 2)).unwrap();
    assert_eq!(bottom.get_column("B").unwrap(), &Column::from(vec![1i64, 2]));

    let all = slice_max(&df, &SliceOptions::new("B", 100)).unwrap();
    assert_eq!(all.row_count(), 8);
}

#[test]
fn test_grouped_slices() {
    let df = sliceable();
    let top = slice_max(&df, &SliceOptions::new("B", 2).group_by(&["A"])).unwrap();
    assert_eq!(top.get_column("A").unwrap(), &Column::from(vec![1i64, 1, 2, 2]));
    assert_eq!(top.get_column("B").unwrap(), &Column::from(vec![7i64, 5, 8, 6]));

    let bottom = slice_min(&df, &SliceOptions::new("B", 2).group_by(&["A"])).unwrap();
    assert_eq!(bottom.get_column("B").unwrap(), &Column::from(vec![1i64, 3, 2, 4]));
}

#[test]
fn test_method_chaining() {
    let result = people()
        .select(&[everything().into()])
        .and_then(|df| df.rename(Rename::mapping([("eye_color", "eyes")])))
        .and_then(|df| df.count(&["eyes".into()], CountOptions::default()))
        .and_then(|df| df.slice_max(&SliceOptions::new("n", 1)))
        .unwrap();
    assert_eq!(result.get_column("eyes").unwrap(), &Column::from(vec!["blue"]));
    assert_eq!(result.get_column("n").unwrap(), &Column::from(vec![2i64]));
}
