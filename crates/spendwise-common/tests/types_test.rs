//! Tests for the transaction and dataset types.

use chrono::NaiveDate;
use proptest::prelude::*;
use spendwise_common::{Dataset, Necessity, Transaction};

fn transaction(amount: f64, is_need: bool) -> Transaction {
    let date = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    Transaction::new(date, amount, "Food", "Cash", is_need)
}

#[test]
fn test_transaction_keeps_flag_as_necessity() {
    assert_eq!(transaction(1.0, true).necessity, Necessity::Need);
    assert_eq!(transaction(1.0, false).necessity, Necessity::Impulse);
}

#[test]
fn test_dataset_preserves_input_order() {
    let dataset: Dataset = [3.0, 1.0, 2.0]
        .into_iter()
        .map(|amount| transaction(amount, true))
        .collect();

    let amounts: Vec<f64> = dataset.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![3.0, 1.0, 2.0]);
}

proptest! {
    #[test]
    fn prop_total_amount_matches_row_sum(amounts in prop::collection::vec(-1_000i32..1_000, 0..50)) {
        let dataset: Dataset = amounts
            .iter()
            .map(|&amount| transaction(f64::from(amount), amount % 2 == 0))
            .collect();

        let expected: i32 = amounts.iter().sum();
        prop_assert_eq!(dataset.total_amount(), f64::from(expected));
        prop_assert_eq!(dataset.len(), amounts.len());
    }
}
