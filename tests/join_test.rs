mod common;

use common::fixtures::{classes, students};
use tidyframe::verbs::{
    anti_join, crossing, inner_join, left_join, outer_join, right_join, semi_join,
};
use tidyframe::{Column, DataFrame, Error, TidyExt};

#[test]
fn test_inner_join() {
    let joined = inner_join(&students(), &classes(), "student_id").unwrap();
    assert_eq!(joined.column_names(), vec!["student_id", "name", "grade", "class_id"]);
    assert_eq!(joined.get_column("student_id").unwrap(), &Column::from(vec![1i64, 2, 3]));
    assert_eq!(joined.get_column("class_id").unwrap(), &Column::from(vec![1i64, 2, 2]));
}

#[test]
fn test_left_join() {
    let joined = left_join(&students(), &classes(), "student_id").unwrap();
    assert_eq!(joined.row_count(), 5);
    assert_eq!(
        joined.get_column("class_id").unwrap(),
        &Column::from(vec![Some(1i64), Some(2), Some(2), None, None])
    );
}

#[test]
fn test_right_join() {
    let joined = right_join(&students(), &classes(), "student_id").unwrap();
    assert_eq!(
        joined.get_column("student_id").unwrap(),
        &Column::from(vec![1i64, 2, 3, 6, 7])
    );
    assert_eq!(
        joined.get_column("name").unwrap(),
        &Column::from(vec![
            Some("John".to_string()),
            Some("Jane".to_string()),
            Some("Jack".to_string()),
            None,
            None,
        ])
    );
}

#[test]
fn test_outer_join() {
    let joined = outer_join(&students(), &classes(), "student_id").unwrap();
    assert_eq!(
        joined.get_column("student_id").unwrap(),
        &Column::from(vec![1i64, 2, 3, 4, 5, 6, 7])
    );
    assert_eq!(
        joined.get_column("class_id").unwrap(),
        &Column::from(vec![Some(1i64), Some(2), Some(2), None, None, Some(3), Some(3)])
    );
}

#[test]
fn test_join_on_differently_named_keys() {
    let renamed = classes().rename_columns(&[("student_id", "pupil")]);
    let joined = inner_join(&students(), &renamed, ("student_id", "pupil")).unwrap();
    assert_eq!(joined.column_names(), vec!["student_id", "name", "grade", "class_id", "pupil"]);
    assert_eq!(joined.get_column("pupil").unwrap(), &Column::from(vec![1i64, 2, 3]));
}

#[test]
fn test_crossing() {
    let active = DataFrame::from_columns(vec![("active", Column::from(vec![1i64, 0]))]).unwrap();
    let crossed = crossing(&students(), &active).unwrap();
    assert_eq!(crossed.shape(), (10, 4));
    assert_eq!(
        crossed.get_column("active").unwrap(),
        &Column::from(vec![1i64, 0, 1, 0, 1, 0, 1, 0, 1, 0])
    );
}

fn band_members() -> DataFrame {
    DataFrame::from_columns(vec![
        ("name", Column::from(vec!["Mick", "John", "Paul"])),
        ("band", Column::from(vec!["Stones", "Beatles", "Beatles"])),
    ])
    .unwrap()
}

fn band_instruments() -> DataFrame {
    DataFrame::from_columns(vec![
        ("name", Column::from(vec!["John", "Paul", "Keith"])),
        ("plays", Column::from(vec!["guitar", "bass", "guitar"])),
    ])
    .unwrap()
}

#[test]
fn test_semi_and_anti_join() {
    let semi = semi_join(&band_members(), &band_instruments(), "name").unwrap();
    assert_eq!(semi.column_names(), vec!["name", "band"]);
    assert_eq!(semi.get_column("name").unwrap(), &Column::from(vec!["John", "Paul"]));

    let anti = anti_join(&band_members(), &band_instruments(), "name").unwrap();
    assert_eq!(anti.get_column("name").unwrap(), &Column::from(vec!["Mick"]));
}

#[test]
fn test_missing_key_column() {
    let result = inner_join(&students(), &classes(), "class_id");
    assert!(matches!(result, Err(Error::ColumnNotFound(_))));
}

#[test]
fn test_chained_verbs() {
    let result = students()
        .filter(&["grade >= 9".into()])
        .and_then(|df| df.select(&["name".into(), "grade".into()]))
        .unwrap();
    assert_eq!(result.get_column("name").unwrap(), &Column::from(vec!["John", "Jack", "Jill"]));
}
