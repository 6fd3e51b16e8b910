//! Dataset loading: JSON transaction records into a typed, read-only table

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use spendwise_common::{Dataset, Result, SpendError, Transaction};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Record keys as they appear in the dataset file.
pub mod fields {
    /// Transaction timestamp.
    pub const DATE: &str = "Date";
    /// Amount spent.
    pub const AMOUNT: &str = "Amount";
    /// Spending category.
    pub const CATEGORY: &str = "Category";
    /// Payment mode.
    pub const PAYMENT_MODE: &str = "Payment_Mode";
    /// Impulse/need flag.
    pub const IS_NEED: &str = "is_Need";
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Loads transaction datasets from JSON documents.
///
/// The document must be an array of objects carrying `Date`, `Amount`,
/// `Category`, `Payment_Mode`, and `is_Need`. Extra keys are ignored. Any
/// malformed record fails the whole load; there is no partial result.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetLoader;

impl DatasetLoader {
    /// Create a new loader
    pub const fn new() -> Self {
        Self
    }

    /// Read and parse the dataset file at `path`
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> Result<Dataset> {
        let content = std::fs::read_to_string(path)?;
        let dataset = self.parse(&content)?;
        info!(records = dataset.len(), "Loaded transaction dataset");
        Ok(dataset)
    }

    /// Parse a dataset from JSON text
    pub fn parse(&self, content: &str) -> Result<Dataset> {
        let document: Value = serde_json::from_str(content)?;
        let Value::Array(records) = document else {
            return Err(SpendError::dataset(
                "expected a JSON array of transaction records",
            ));
        };

        let transactions = records
            .iter()
            .enumerate()
            .map(|(index, record)| parse_record(index, record))
            .collect::<Result<Vec<_>>>()?;

        debug!(records = transactions.len(), "Parsed transaction records");
        Ok(Dataset::new(transactions))
    }
}

fn parse_record(index: usize, record: &Value) -> Result<Transaction> {
    let object = record
        .as_object()
        .ok_or_else(|| SpendError::dataset_record("expected a JSON object", index))?;

    let date = require(object, index, fields::DATE)?;
    let date = parse_date(date).ok_or_else(|| {
        SpendError::dataset_field(format!("unrecognised date {date}"), index, fields::DATE)
    })?;

    let amount = require(object, index, fields::AMOUNT)?;
    let amount = amount.as_f64().ok_or_else(|| {
        SpendError::dataset_field(format!("expected a number, found {amount}"), index, fields::AMOUNT)
    })?;

    let category = require_str(object, index, fields::CATEGORY)?;
    let payment_mode = require_str(object, index, fields::PAYMENT_MODE)?;

    let flag = require(object, index, fields::IS_NEED)?;
    let is_need = parse_flag(flag).ok_or_else(|| {
        SpendError::dataset_field(format!("expected a boolean, found {flag}"), index, fields::IS_NEED)
    })?;

    Ok(Transaction::new(date, amount, category, payment_mode, is_need))
}

fn require<'a>(object: &'a Map<String, Value>, index: usize, field: &str) -> Result<&'a Value> {
    match object.get(field) {
        None => Err(SpendError::dataset_field("missing required field", index, field)),
        Some(Value::Null) => Err(SpendError::dataset_field("value is null", index, field)),
        Some(value) => Ok(value),
    }
}

fn require_str<'a>(object: &'a Map<String, Value>, index: usize, field: &str) -> Result<&'a str> {
    let value = require(object, index, field)?;
    value.as_str().ok_or_else(|| {
        SpendError::dataset_field(format!("expected a string, found {value}"), index, field)
    })
}

/// Parse a `Date` value: an ISO-like string or epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(text) => parse_date_str(text.trim()),
        Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

/// Parse a textual timestamp. Offsets are dropped, keeping the local wall time.
pub fn parse_date_str(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse an `is_Need` value: booleans, `0`/`1`, or boolean words.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_f64() {
            Some(n) if n == 0.0 => Some(false),
            Some(n) if n == 1.0 => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;
    use spendwise_common::Necessity;

    #[test]
    fn test_parse_records() {
        let dataset = DatasetLoader::new()
            .parse(
                r#"[
                    {"Date": "2024-01-05", "Amount": 12.5, "Category": "Food", "Payment_Mode": "Cash", "is_Need": true, "Note": "ignored"},
                    {"Date": "2024-02-10 18:45:00", "Amount": 3, "Category": "Transport", "Payment_Mode": "Card", "is_Need": 0}
                ]"#,
            )
            .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].category, "Food");
        assert_eq!(dataset[0].necessity, Necessity::Need);
        assert_eq!(dataset[1].amount, 3.0);
        assert_eq!(dataset[1].date.hour(), 18);
        assert_eq!(dataset[1].necessity, Necessity::Impulse);
    }

    #[test]
    fn test_empty_array_is_empty_dataset() {
        assert!(DatasetLoader::new().parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_date_forms() {
        let parsed = |v: Value| parse_date(&v).unwrap();

        assert_eq!(parsed(json!("2024-03-09")).month(), 3);
        assert_eq!(parsed(json!("2024/03/09")).day(), 9);
        assert_eq!(parsed(json!("03/09/2024")).day(), 9);
        assert_eq!(parsed(json!("2024-03-09T07:30:15.250")).second(), 15);
        assert_eq!(parsed(json!("2024-03-31T23:30:00-05:00")).month(), 3);
        assert_eq!(parsed(json!(1_709_942_400_000_i64)).year(), 2024);

        assert!(parse_date(&json!("yesterday")).is_none());
        assert!(parse_date(&json!(true)).is_none());
    }

    #[test]
    fn test_flag_forms() {
        assert_eq!(parse_flag(&json!(true)), Some(true));
        assert_eq!(parse_flag(&json!(1)), Some(true));
        assert_eq!(parse_flag(&json!(0.0)), Some(false));
        assert_eq!(parse_flag(&json!("False")), Some(false));
        assert_eq!(parse_flag(&json!(2)), None);
        assert_eq!(parse_flag(&json!("sometimes")), None);
    }

    #[test]
    fn test_rejects_non_array_document() {
        let err = DatasetLoader::new().parse(r#"{"Date": "2024-01-01"}"#).unwrap_err();
        assert!(matches!(err, SpendError::Dataset { record: None, .. }));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = DatasetLoader::new().parse("[{").unwrap_err();
        assert!(matches!(err, SpendError::Serialization(_)));
    }

    #[test]
    fn test_errors_name_record_and_field() {
        let loader = DatasetLoader::new();
        let cases = [
            (r#"[1]"#, None),
            (r#"[{"Amount": 1, "Category": "a", "Payment_Mode": "b", "is_Need": true}]"#, Some("Date")),
            (r#"[{"Date": "2024-01-01", "Amount": "ten", "Category": "a", "Payment_Mode": "b", "is_Need": true}]"#, Some("Amount")),
            (r#"[{"Date": "2024-01-01", "Amount": 1, "Category": null, "Payment_Mode": "b", "is_Need": true}]"#, Some("Category")),
            (r#"[{"Date": "2024-01-01", "Amount": 1, "Category": "a", "Payment_Mode": 7, "is_Need": true}]"#, Some("Payment_Mode")),
            (r#"[{"Date": "2024-01-01", "Amount": 1, "Category": "a", "Payment_Mode": "b"}]"#, Some("is_Need")),
            (r#"[{"Date": "soon", "Amount": 1, "Category": "a", "Payment_Mode": "b", "is_Need": true}]"#, Some("Date")),
        ];

        for (json, expected_field) in cases {
            match loader.parse(json).unwrap_err() {
                SpendError::Dataset { record, field, .. } => {
                    assert_eq!(record, Some(0), "input: {json}");
                    assert_eq!(field.as_deref(), expected_field, "input: {json}");
                }
                other => panic!("unexpected error {other:?} for {json}"),
            }
        }
    }

    #[test]
    fn test_first_bad_record_aborts_load() {
        let json = r#"[
            {"Date": "2024-01-01", "Amount": 1, "Category": "a", "Payment_Mode": "b", "is_Need": true},
            {"Date": "2024-01-02", "Amount": null, "Category": "a", "Payment_Mode": "b", "is_Need": true}
        ]"#;
        let err = DatasetLoader::new().parse(json).unwrap_err();
        assert!(err.to_string().contains("record 1"));
        assert!(err.to_string().contains("Amount"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DatasetLoader::new()
            .load(Path::new("definitely/not/here/dataset.json"))
            .unwrap_err();
        assert!(matches!(err, SpendError::Io(_)));
    }
}
