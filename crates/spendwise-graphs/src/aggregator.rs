//! Data aggregation: reducing the transaction table into per-chart series
//!
//! Every aggregator is a pure function of the dataset. Ordering rules:
//! monthly buckets are chronological and gap-free, category-keyed outputs are
//! lexicographic, payment modes are by descending count with ties kept in
//! first-appearance order.

use chrono::Datelike;
use serde::Serialize;
use spendwise_common::{Necessity, Result, SpendError, Transaction};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// Trait for reducing transactions into the data one chart needs
pub trait DataAggregator {
    /// Aggregated output
    type Output;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Reduce the transactions. Must not depend on anything but its input.
    fn aggregate(&self, transactions: &[Transaction]) -> Result<Self::Output>;
}

/// Total spent in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// Calendar year
    pub year: i32,
    /// Month number, 1-12
    pub month: u32,
    /// Sum of amounts, 0.0 for months without records
    pub total: f64,
}

impl MonthlyTotal {
    /// Axis label such as `Jan 2024`
    pub fn label(&self) -> String {
        format!("{} {}", month_abbr(self.month), self.year)
    }
}

/// Total spent in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Category label
    pub category: String,
    /// Sum of amounts
    pub total: f64,
}

/// Number of transactions paid with one payment mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentModeCount {
    /// Payment mode label
    pub payment_mode: String,
    /// Number of transactions
    pub count: usize,
}

/// One category row of the impulse/need cross-tab. `None` marks a pair with no records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpulseNeedRow {
    /// Category label
    pub category: String,
    /// Sum of impulse purchases
    pub impulse: Option<f64>,
    /// Sum of need purchases
    pub need: Option<f64>,
}

impl ImpulseNeedRow {
    /// Cell for one flag value
    pub const fn value(&self, necessity: Necessity) -> Option<f64> {
        match necessity {
            Necessity::Impulse => self.impulse,
            Necessity::Need => self.need,
        }
    }

    /// Sum of the populated cells
    pub fn row_total(&self) -> f64 {
        self.impulse.unwrap_or(0.0) + self.need.unwrap_or(0.0)
    }
}

/// Category x flag cross-tab of summed amounts
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ImpulseNeedTable {
    /// Rows ordered by category label
    pub rows: Vec<ImpulseNeedRow>,
    /// Flag values present anywhere in the data, ascending (impulse before need)
    pub columns: Vec<Necessity>,
}

impl ImpulseNeedTable {
    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum over every populated cell
    pub fn cell_sum(&self) -> f64 {
        self.rows.iter().map(ImpulseNeedRow::row_total).sum()
    }
}

/// Buckets amounts by calendar month
#[derive(Debug, Default, Clone, Copy)]
pub struct MonthlySpendingAggregator;

impl DataAggregator for MonthlySpendingAggregator {
    type Output = Vec<MonthlyTotal>;

    fn name(&self) -> &'static str {
        "monthly_spending"
    }

    #[instrument(skip(self, transactions), fields(records = transactions.len()))]
    fn aggregate(&self, transactions: &[Transaction]) -> Result<Self::Output> {
        let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for transaction in transactions {
            let key = (transaction.date.year(), transaction.date.month());
            *buckets.entry(key).or_insert(0.0) += transaction.amount;
        }

        let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
            return Ok(Vec::new());
        };

        // Months without records still get a zero bucket so the time axis stays continuous
        let mut result = Vec::new();
        let mut cursor = first;
        loop {
            let total = buckets.get(&cursor).copied().unwrap_or(0.0);
            ensure_finite(total, || format!("{} {}", month_abbr(cursor.1), cursor.0))?;
            result.push(MonthlyTotal {
                year: cursor.0,
                month: cursor.1,
                total,
            });
            if cursor == last {
                break;
            }
            cursor = next_month(cursor);
        }

        debug!("Aggregated {} monthly buckets", result.len());
        Ok(result)
    }
}

/// Sums amounts per category
#[derive(Debug, Default, Clone, Copy)]
pub struct CategoryTotalsAggregator;

impl DataAggregator for CategoryTotalsAggregator {
    type Output = Vec<CategoryTotal>;

    fn name(&self) -> &'static str {
        "category_totals"
    }

    #[instrument(skip(self, transactions), fields(records = transactions.len()))]
    fn aggregate(&self, transactions: &[Transaction]) -> Result<Self::Output> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for transaction in transactions {
            *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
        }

        let result = totals
            .into_iter()
            .map(|(category, total)| {
                ensure_finite(total, || category.to_string())?;
                Ok(CategoryTotal {
                    category: category.to_string(),
                    total,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Aggregated {} categories", result.len());
        Ok(result)
    }
}

/// Counts transactions per payment mode
#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentModeAggregator;

impl DataAggregator for PaymentModeAggregator {
    type Output = Vec<PaymentModeCount>;

    fn name(&self) -> &'static str {
        "payment_mode_counts"
    }

    #[instrument(skip(self, transactions), fields(records = transactions.len()))]
    fn aggregate(&self, transactions: &[Transaction]) -> Result<Self::Output> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for transaction in transactions {
            let mode = transaction.payment_mode.as_str();
            let count = counts.entry(mode).or_insert_with(|| {
                order.push(mode);
                0
            });
            *count += 1;
        }

        let mut result: Vec<PaymentModeCount> = order
            .into_iter()
            .map(|mode| PaymentModeCount {
                payment_mode: mode.to_string(),
                count: counts[mode],
            })
            .collect();

        // Stable sort keeps first-appearance order among equal counts
        result.sort_by(|a, b| b.count.cmp(&a.count));

        debug!("Aggregated {} payment modes", result.len());
        Ok(result)
    }
}

/// Sums amounts per (category, impulse/need) pair
#[derive(Debug, Default, Clone, Copy)]
pub struct ImpulseNeedAggregator;

impl DataAggregator for ImpulseNeedAggregator {
    type Output = ImpulseNeedTable;

    fn name(&self) -> &'static str {
        "impulse_need_crosstab"
    }

    #[instrument(skip(self, transactions), fields(records = transactions.len()))]
    fn aggregate(&self, transactions: &[Transaction]) -> Result<Self::Output> {
        let mut cells: BTreeMap<&str, ImpulseNeedRow> = BTreeMap::new();
        let mut seen_impulse = false;
        let mut seen_need = false;

        for transaction in transactions {
            let row = cells
                .entry(transaction.category.as_str())
                .or_insert_with(|| ImpulseNeedRow {
                    category: transaction.category.clone(),
                    impulse: None,
                    need: None,
                });
            let cell = match transaction.necessity {
                Necessity::Impulse => {
                    seen_impulse = true;
                    &mut row.impulse
                }
                Necessity::Need => {
                    seen_need = true;
                    &mut row.need
                }
            };
            *cell = Some(cell.unwrap_or(0.0) + transaction.amount);
        }

        let rows: Vec<ImpulseNeedRow> = cells.into_values().collect();
        for row in &rows {
            ensure_finite(row.row_total(), || row.category.clone())?;
        }

        let columns = [(seen_impulse, Necessity::Impulse), (seen_need, Necessity::Need)]
            .into_iter()
            .filter_map(|(seen, necessity)| seen.then_some(necessity))
            .collect();

        debug!("Aggregated impulse/need cross-tab with {} categories", rows.len());
        Ok(ImpulseNeedTable { rows, columns })
    }
}

/// Monthly spending totals, chronological and gap-free
pub fn monthly_spending(transactions: &[Transaction]) -> Result<Vec<MonthlyTotal>> {
    MonthlySpendingAggregator.aggregate(transactions)
}

/// Spending totals per category, ordered by label
pub fn category_totals(transactions: &[Transaction]) -> Result<Vec<CategoryTotal>> {
    CategoryTotalsAggregator.aggregate(transactions)
}

/// Transaction counts per payment mode, most used first
pub fn payment_mode_counts(transactions: &[Transaction]) -> Result<Vec<PaymentModeCount>> {
    PaymentModeAggregator.aggregate(transactions)
}

/// Category x impulse/need cross-tab of summed amounts
pub fn impulse_need_crosstab(transactions: &[Transaction]) -> Result<ImpulseNeedTable> {
    ImpulseNeedAggregator.aggregate(transactions)
}

fn ensure_finite(total: f64, bucket: impl FnOnce() -> String) -> Result<()> {
    if total.is_finite() {
        Ok(())
    } else {
        Err(SpendError::aggregation(format!(
            "sum for `{}` is not a finite number",
            bucket()
        )))
    }
}

const fn next_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Get month abbreviation
pub const fn month_abbr(month: u32) -> &'static str {
    match month {
        1 => "Jan", 2 => "Feb", 3 => "Mar", 4 => "Apr",
        5 => "May", 6 => "Jun", 7 => "Jul", 8 => "Aug",
        9 => "Sep", 10 => "Oct", 11 => "Nov", 12 => "Dec",
        _ => "???",
    }
}
