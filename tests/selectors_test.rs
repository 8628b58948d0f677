use tidyframe::selectors::{
    all_of, any_of, contains, ends_with, everything, first_col, last_col, matches, num_range,
    resolve, starts_with, ColumnSpec, Selector,
};
use tidyframe::Error;

const COLUMN_NAMES: [&str; 6] = ["name", "age", "height", "weight", "eye_color", "hair_color"];

fn columns() -> Vec<String> {
    COLUMN_NAMES.iter().map(|s| s.to_string()).collect()
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn all_selectors() -> Vec<Selector> {
    vec![
        contains("a"),
        matches("^h.*t$").unwrap(),
        starts_with("h"),
        ends_with("_color"),
        everything(),
        first_col(),
        last_col(),
        num_range("x", 0..3, 1),
        any_of(&["age", "missing"]),
        all_of(&["weight", "name"]),
    ]
}

#[test]
fn test_contains() {
    let cases: [(&str, Vec<&str>); 3] = [
        ("name", vec!["name"]),
        ("_color", vec!["eye_color", "hair_color"]),
        ("a", vec!["name", "age", "hair_color"]),
    ];
    for (pattern, expected) in cases {
        assert_eq!(contains(pattern).select(&columns()).unwrap(), names(&expected));
    }
}

#[test]
fn test_contains_negate() {
    let cases: [(&str, &[&str]); 3] = [
        ("name", &COLUMN_NAMES[1..]),
        ("_color", &COLUMN_NAMES[..4]),
        ("a", &["height", "weight", "eye_color"]),
    ];
    for (pattern, expected) in cases {
        assert_eq!((-contains(pattern)).select(&columns()).unwrap(), names(expected));
    }
}

#[test]
fn test_double_negation_is_identity() {
    for selector in all_selectors() {
        let twice = -(-selector.clone());
        assert_eq!(
            twice.select(&columns()).unwrap(),
            selector.select(&columns()).unwrap(),
            "{}",
            selector
        );
        assert_eq!(
            selector.negate().negate().select(&columns()).unwrap(),
            selector.select(&columns()).unwrap()
        );
    }
}

#[test]
fn test_negation_partitions_columns() {
    let cols = columns();
    for selector in all_selectors() {
        let selected = selector.select(&cols).unwrap();
        let rest = (-&selector).select(&cols).unwrap();
        assert!(selected.iter().all(|c| !rest.contains(c)), "{}", selector);
        let mut union: Vec<String> = selected.iter().chain(&rest).cloned().collect();
        union.sort();
        let mut expected = cols.clone();
        expected.sort();
        assert_eq!(union, expected, "{}", selector);
        // The complement keeps input order
        let positions: Vec<usize> = rest
            .iter()
            .map(|c| cols.iter().position(|x| x == c).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_matches() {
    assert_eq!(
        matches("_col").unwrap().select(&columns()).unwrap(),
        names(&["eye_color", "hair_color"])
    );
    assert_eq!(
        matches("^.{3,4}$").unwrap().select(&columns()).unwrap(),
        names(&["name", "age"])
    );
    assert!(matches!(matches("(unclosed"), Err(Error::InvalidRegex(_))));
}

#[test]
fn test_prefix_suffix_and_positions() {
    assert_eq!(starts_with("h").select(&columns()).unwrap(), names(&["height", "hair_color"]));
    assert_eq!(ends_with("ght").select(&columns()).unwrap(), names(&["height", "weight"]));
    assert_eq!(everything().select(&columns()).unwrap(), columns());
    assert_eq!(first_col().select(&columns()).unwrap(), names(&["name"]));
    assert_eq!(last_col().select(&columns()).unwrap(), names(&["hair_color"]));
    assert!(everything().select(&[]).unwrap().is_empty());
}

#[test]
fn test_num_range() {
    let cols = names(&["ft01", "ft02", "ft03", "x"]);
    assert_eq!(
        num_range("ft", 1..4, 2).select(&cols).unwrap(),
        names(&["ft01", "ft02", "ft03"])
    );
    assert!(num_range("ft", 1..4, 0).select(&cols).unwrap().is_empty());
    // Generated order, unmatched names dropped
    assert_eq!(
        num_range("ft", vec![3, 9, 1], 2).select(&cols).unwrap(),
        names(&["ft03", "ft01"])
    );
    assert_eq!(
        (-num_range("ft", 2..3, 2)).select(&cols).unwrap(),
        names(&["ft01", "ft03", "x"])
    );
}

#[test]
fn test_all_of_and_any_of() {
    let cols = names(&["a", "b"]);
    match all_of(&["a", "z", "y"]).select(&cols) {
        Err(Error::SelectionValidation { missing }) => assert_eq!(missing, names(&["z", "y"])),
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert_eq!(any_of(&["a", "z"]).select(&cols).unwrap(), names(&["a"]));
    assert_eq!(all_of(&["b", "a"]).select(&cols).unwrap(), names(&["b", "a"]));

    // Negation still validates
    assert!(matches!(
        (-all_of(&["z"])).select(&cols),
        Err(Error::SelectionValidation { .. })
    ));
    assert_eq!((-all_of(&["a"])).select(&cols).unwrap(), names(&["b"]));
}

#[test]
fn test_resolve_flattens_in_order() {
    let spec = vec![
        ColumnSpec::from("name"),
        contains("color").into(),
        ColumnSpec::from(vec!["age"]),
    ];
    assert_eq!(
        resolve(&columns(), &spec).unwrap(),
        names(&["name", "eye_color", "hair_color", "age"])
    );
}

#[test]
fn test_resolve_keeps_duplicates_and_unknown_literals() {
    let spec = vec![
        ColumnSpec::from("age"),
        ColumnSpec::from(vec![ColumnSpec::from(starts_with("a")), "nope".into()]),
    ];
    assert_eq!(resolve(&columns(), &spec).unwrap(), names(&["age", "age", "nope"]));
    assert!(resolve(&columns(), &[]).unwrap().is_empty());
}

#[test]
fn test_resolve_propagates_selector_errors() {
    let spec = vec![ColumnSpec::from(all_of(&["name", "shoe_size"]))];
    assert!(matches!(
        resolve(&columns(), &spec),
        Err(Error::SelectionValidation { missing }) if missing == vec!["shoe_size".to_string()]
    ));
}
