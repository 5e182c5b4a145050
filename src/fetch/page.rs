use crate::fetch::error::FetchError;
use crate::records::result_set::Record;
use log::debug;
use serde_json::Value;

/// Decodes one page body and pulls out its record array.
///
/// A `null` record field is an empty page. A missing field, or one that is not an
/// array of objects, is a decode failure.
pub(crate) fn decode_page(url: &str, body: &str, field: &str) -> Result<Vec<Record>, FetchError> {
    let mut page: Value = serde_json::from_str(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })?;

    if let Some(count) = page.get("ResultCount").and_then(Value::as_u64) {
        debug!("{} reports {} matching records", url, count);
    }

    let missing = || FetchError::MissingRecordField {
        url: url.to_string(),
        field: field.to_string(),
    };

    match page.get_mut(field).map(Value::take) {
        Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                _ => Err(missing()),
            })
            .collect(),
        _ => Err(missing()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.test/structures/";

    #[test]
    fn reads_the_record_field() {
        let body = r#"{"PageCount":1,"ResultCount":2,"ResultList":[{"wdid":"1"},{"wdid":"2"}]}"#;
        let records = decode_page(URL, body, "ResultList").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["wdid"], "2");
    }

    #[test]
    fn keeps_field_order_from_the_body() {
        let body = r#"{"ResultList":[{"wdid":"0100503","structureName":"A","latitude":40.1,"divrecType":"DivTotal"}]}"#;
        let records = decode_page(URL, body, "ResultList").unwrap();
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["wdid", "structureName", "latitude", "divrecType"]);
        assert_eq!(
            crate::records::frame::column_names(&records),
            vec!["wdid", "structureName", "latitude", "divrecType"]
        );
    }

    #[test]
    fn null_record_field_is_empty() {
        let records = decode_page(URL, r#"{"ResultList":null}"#, "ResultList").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_page(URL, "<html>oops</html>", "ResultList").unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn missing_or_odd_record_field() {
        let missing = decode_page(URL, r#"{"Message":"x"}"#, "ResultList").unwrap_err();
        assert!(matches!(missing, FetchError::MissingRecordField { .. }));

        let scalars = decode_page(URL, r#"{"ResultList":[1,2]}"#, "ResultList").unwrap_err();
        assert!(matches!(scalars, FetchError::MissingRecordField { .. }));
    }
}
