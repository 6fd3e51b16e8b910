//! Test utilities and shared fixtures for the SpendWise workspace.
//!
//! Available to every crate's tests through the `testing` feature.

use crate::{Dataset, Transaction};
use chrono::{NaiveDate, NaiveDateTime};

/// Test fixture for a midnight timestamp.
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("fixture date must be valid")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "testing")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Canned datasets and their raw JSON forms.
pub mod fixtures {
    use super::*;

    /// Three records over two months, two categories, two payment modes.
    pub fn three_records() -> Dataset {
        vec![
            Transaction::new(mock_date(2024, 1, 5), 100.0, "Food", "Cash", true),
            Transaction::new(mock_date(2024, 1, 20), 50.0, "Transport", "Card", false),
            Transaction::new(mock_date(2024, 2, 3), 25.0, "Food", "Card", false),
        ]
        .into()
    }

    /// Two records, one need and one impulse.
    pub fn minimal() -> Dataset {
        vec![
            Transaction::new(mock_date(2024, 3, 1), 40.0, "Groceries", "UPI", true),
            Transaction::new(mock_date(2024, 4, 2), 15.0, "Entertainment", "Card", false),
        ]
        .into()
    }

    /// The `minimal` dataset in the on-disk JSON shape.
    pub const MINIMAL_JSON: &str = r#"[
        {"Date": "2024-03-01", "Amount": 40.0, "Category": "Groceries", "Payment_Mode": "UPI", "is_Need": true},
        {"Date": "2024-04-02", "Amount": 15.0, "Category": "Entertainment", "Payment_Mode": "Card", "is_Need": false}
    ]"#;

    /// A larger dataset spanning a gap month, with negative refunds.
    pub fn household_year() -> Dataset {
        vec![
            Transaction::new(mock_date(2023, 11, 2), 120.0, "Rent", "Bank Transfer", true),
            Transaction::new(mock_date(2023, 11, 14), 35.5, "Food", "Card", true),
            Transaction::new(mock_date(2023, 11, 28), 60.0, "Shopping", "Card", false),
            Transaction::new(mock_date(2024, 1, 3), 120.0, "Rent", "Bank Transfer", true),
            Transaction::new(mock_date(2024, 1, 9), -20.0, "Shopping", "Card", false),
            Transaction::new(mock_date(2024, 1, 17), 18.25, "Food", "Cash", false),
            Transaction::new(mock_date(2024, 1, 30), 9.99, "Entertainment", "UPI", false),
        ]
        .into()
    }
}
