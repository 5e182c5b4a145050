//! Flattens CDSS JSON records into a Polars `DataFrame`.
//!
//! Every key seen in any record becomes a column (first-seen order). Missing keys
//! and JSON nulls become nulls. Column types are inferred from the non-null values.

use crate::records::result_set::Record;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};
use serde_json::Value;
use std::collections::HashSet;

/// Formats the API produces for `dateFormat=spaceSepToSeconds`, plus ISO variants.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Datetime,
    Text,
}

/// Union of record keys in first-seen order.
pub fn column_names(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                names.push(key.clone());
            }
        }
    }
    names
}

/// Builds a `DataFrame` with one row per record.
pub fn records_to_dataframe(records: &[Record]) -> PolarsResult<DataFrame> {
    let columns = column_names(records)
        .iter()
        .map(|name| {
            let values: Vec<Option<&Value>> = records
                .iter()
                .map(|record| record.get(name).filter(|v| !v.is_null()))
                .collect();
            build_column(name, &values)
        })
        .collect();

    DataFrame::new(columns)
}

fn build_column(name: &str, values: &[Option<&Value>]) -> Column {
    let series = match infer_kind(values) {
        ColumnKind::Int => Series::new(
            name.into(),
            values
                .iter()
                .map(|v| v.and_then(Value::as_i64))
                .collect::<Vec<Option<i64>>>(),
        ),
        ColumnKind::Float => Series::new(
            name.into(),
            values
                .iter()
                .map(|v| v.and_then(Value::as_f64))
                .collect::<Vec<Option<f64>>>(),
        ),
        ColumnKind::Bool => Series::new(
            name.into(),
            values
                .iter()
                .map(|v| v.and_then(Value::as_bool))
                .collect::<Vec<Option<bool>>>(),
        ),
        ColumnKind::Datetime => Series::new(
            name.into(),
            values
                .iter()
                .map(|v| v.and_then(Value::as_str).and_then(parse_datetime))
                .collect::<Vec<Option<NaiveDateTime>>>(),
        ),
        ColumnKind::Text => Series::new(
            name.into(),
            values
                .iter()
                .map(|v| v.map(text_value))
                .collect::<Vec<Option<String>>>(),
        ),
    };
    Column::from(series)
}

fn infer_kind(values: &[Option<&Value>]) -> ColumnKind {
    let present: Vec<&Value> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return ColumnKind::Text;
    }

    if present.iter().all(|v| v.is_i64()) {
        ColumnKind::Int
    } else if present.iter().all(|v| v.is_number()) {
        ColumnKind::Float
    } else if present.iter().all(|v| v.is_boolean()) {
        ColumnKind::Bool
    } else if present
        .iter()
        .all(|v| v.as_str().and_then(parse_datetime).is_some())
    {
        ColumnKind::Datetime
    } else {
        ColumnKind::Text
    }
}

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Nested arrays/objects and mixed scalars are kept as JSON text.
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    #[test]
    fn columns_follow_first_seen_order() {
        let records = vec![
            record(json!({"wdid": "0100503", "structureName": "A"})),
            record(json!({"wdid": "0100504", "division": 1})),
        ];
        assert_eq!(
            column_names(&records),
            vec!["wdid", "structureName", "division"]
        );
    }

    #[test]
    fn infers_column_types() {
        let records = vec![
            record(json!({
                "abbrev": "PLACHECO",
                "division": 1,
                "measValue": 12.5,
                "active": true,
                "measDate": "2020-01-01 00:00:00",
            })),
            record(json!({
                "abbrev": "ANOTHER",
                "division": 2,
                "measValue": 3,
                "active": false,
                "measDate": "2020-01-02 00:00:00",
            })),
        ];

        let df = records_to_dataframe(&records).unwrap();
        assert_eq!(df.shape(), (2, 5));
        assert_eq!(df.column("abbrev").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("division").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("measValue").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("active").unwrap().dtype(), &DataType::Boolean);
        assert!(matches!(
            df.column("measDate").unwrap().dtype(),
            DataType::Datetime(_, _)
        ));
    }

    #[test]
    fn missing_keys_and_nulls_become_nulls() {
        let records = vec![
            record(json!({"wdid": "0100503", "comment": null})),
            record(json!({"wdid": "0100504", "comment": "headgate"})),
            record(json!({"flow": 1.5})),
        ];

        let df = records_to_dataframe(&records).unwrap();
        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column("wdid").unwrap().null_count(), 1);
        assert_eq!(df.column("comment").unwrap().null_count(), 2);
        assert_eq!(df.column("flow").unwrap().null_count(), 2);
    }

    #[test]
    fn mixed_and_nested_values_fall_back_to_text() {
        let records = vec![
            record(json!({"code": 7, "tags": ["a", "b"]})),
            record(json!({"code": "N/A", "tags": {"k": 1}})),
        ];

        let df = records_to_dataframe(&records).unwrap();
        assert_eq!(df.column("code").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("tags").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn empty_records_give_empty_frame() {
        let df = records_to_dataframe(&[]).unwrap();
        assert_eq!(df.shape(), (0, 0));
    }

    #[test]
    fn parses_api_datetime_formats() {
        assert!(parse_datetime("2021-06-01 12:30:00").is_some());
        assert!(parse_datetime("2021-06-01T12:30:00").is_some());
        assert!(parse_datetime("2021-06-01").is_some());
        assert!(parse_datetime("0100503").is_none());
        assert!(parse_datetime("").is_none());
    }
}
