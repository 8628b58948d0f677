use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::path::Path;

use crate::column::Column;
use crate::error::Result;
use crate::value::Value;
use crate::DataFrame;

/// Read a DataFrame from a CSV file
///
/// Column types are inferred from the data: integer, then float, then
/// boolean, falling back to string. Empty fields are missing values.
/// Without a header the columns are named `column_0`, `column_1`, ...
pub fn read_csv<P: AsRef<Path>>(path: P, has_header: bool) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut headers: Vec<String> = if has_header {
        rdr.headers()?.iter().map(|h| h.to_string()).collect()
    } else {
        Vec::new()
    };

    let mut fields: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        if row == 0 && !has_header {
            headers = (0..record.len()).map(|i| format!("column_{}", i)).collect();
            fields = vec![Vec::new(); headers.len()];
        }
        // Short rows are padded with missing values, extra fields ignored
        for (i, column) in fields.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or_default().to_string());
        }
    }

    let mut df = DataFrame::new();
    for (header, values) in headers.into_iter().zip(fields) {
        df.add_column(header, infer_column(&values))?;
    }
    log::debug!(
        "read_csv {}: {} rows x {} columns",
        path.as_ref().display(),
        df.row_count(),
        df.column_count()
    );
    Ok(df)
}

fn infer_column(fields: &[String]) -> Column {
    let present = || fields.iter().filter(|f| !f.is_empty());

    if present().all(|f| f.parse::<i64>().is_ok()) && present().next().is_some() {
        Column::Int64(fields.iter().map(|f| f.parse().ok()).collect())
    } else if present().all(|f| f.parse::<f64>().is_ok()) {
        // Also the type of an all-empty column
        Column::Float64(
            fields
                .iter()
                .map(|f| f.parse::<f64>().ok().filter(|v| !v.is_nan()))
                .collect(),
        )
    } else if present().all(|f| parse_bool(f).is_some()) {
        Column::Boolean(fields.iter().map(|f| parse_bool(f)).collect())
    } else {
        Column::String(
            fields
                .iter()
                .map(|f| if f.is_empty() { None } else { Some(f.clone()) })
                .collect(),
        )
    }
}

fn parse_bool(field: &str) -> Option<bool> {
    match field {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Write a DataFrame to a CSV file; missing values become empty fields
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(df.column_names())?;
    for row in df.rows() {
        let record: Vec<String> = row
            .values()
            .into_iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
