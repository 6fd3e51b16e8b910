//! Transaction records and the read-only dataset they live in.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Whether a purchase was essential or discretionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Necessity {
    /// Discretionary purchase (`is_Need == false`).
    Impulse,
    /// Essential purchase (`is_Need == true`).
    Need,
}

impl Necessity {
    /// Map the raw `is_Need` flag.
    pub const fn from_flag(is_need: bool) -> Self {
        if is_need {
            Self::Need
        } else {
            Self::Impulse
        }
    }

    /// Label used in chart legends.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Impulse => "Impulse",
            Self::Need => "Need",
        }
    }
}

impl fmt::Display for Necessity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One personal finance transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the transaction happened.
    pub date: NaiveDateTime,
    /// Amount spent.
    pub amount: f64,
    /// Free-text spending category.
    pub category: String,
    /// How the transaction was paid.
    pub payment_mode: String,
    /// Impulse or need classification.
    pub necessity: Necessity,
}

impl Transaction {
    /// Creates a new transaction.
    pub fn new(
        date: NaiveDateTime,
        amount: f64,
        category: impl Into<String>,
        payment_mode: impl Into<String>,
        is_need: bool,
    ) -> Self {
        Self {
            date,
            amount,
            category: category.into(),
            payment_mode: payment_mode.into(),
            necessity: Necessity::from_flag(is_need),
        }
    }
}

/// An immutable, ordered collection of transactions loaded once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    transactions: Vec<Transaction>,
}

impl Dataset {
    /// Wraps already-parsed transactions.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Sum of every amount in the dataset.
    pub fn total_amount(&self) -> f64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

impl Deref for Dataset {
    type Target = [Transaction];

    fn deref(&self) -> &Self::Target {
        &self.transactions
    }
}

impl From<Vec<Transaction>> for Dataset {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self::new(transactions)
    }
}

impl FromIterator<Transaction> for Dataset {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_necessity_flag_mapping() {
        assert_eq!(Necessity::from_flag(true), Necessity::Need);
        assert_eq!(Necessity::from_flag(false), Necessity::Impulse);
        assert!(Necessity::Impulse < Necessity::Need);
        assert_eq!(Necessity::Need.to_string(), "Need");
    }

    #[test]
    fn test_dataset_is_read_only_slice() {
        let dataset: Dataset = vec![
            Transaction::new(at(2024, 1, 5), 12.5, "Food", "Cash", true),
            Transaction::new(at(2024, 2, 9), 7.5, "Transport", "Card", false),
        ]
        .into();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[1].category, "Transport");
        assert_eq!(dataset.total_amount(), 20.0);
        assert!(Dataset::default().is_empty());
    }
}
