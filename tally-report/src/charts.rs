//! Chart datasets.
//!
//! Each function shapes the normalized ledger into the series one chart
//! needs. Drawing them is someone else's job.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tally_core::{ExpenseRecord, MonthKey};

use crate::aggregate::{MonthlySummary, floor_zero, monthly_summary};

/// Monthly spending overview, also the spending trend line
pub fn monthly_spending(records: &[ExpenseRecord]) -> MonthlySummary {
    monthly_summary(records)
}

/// Month x category totals, zero filled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCategoryPivot {
    pub months: Vec<MonthKey>,
    pub categories: Vec<String>,
    /// `values[m][c]` is the total for `months[m]` and `categories[c]`
    pub values: Vec<Vec<f64>>,
    pub month_totals: Vec<f64>,
}

impl MonthCategoryPivot {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn get(&self, month: MonthKey, category: &str) -> Option<f64> {
        let m = self.months.iter().position(|k| *k == month)?;
        let c = self.categories.iter().position(|k| k == category)?;
        Some(self.values[m][c])
    }

    /// Largest monthly total, used to size the y axis
    pub fn peak_total(&self) -> f64 {
        self.month_totals.iter().copied().fold(0.0, f64::max)
    }
}

pub fn monthly_by_category(records: &[ExpenseRecord]) -> MonthCategoryPivot {
    let categories: Vec<String> = records
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut by_month: BTreeMap<MonthKey, Vec<f64>> = BTreeMap::new();
    for r in records {
        let row = by_month
            .entry(MonthKey::of(r.date))
            .or_insert_with(|| vec![0.0; categories.len()]);
        if let Ok(c) = categories.binary_search(&r.category) {
            row[c] += r.amount;
        }
    }

    let months: Vec<MonthKey> = by_month.keys().copied().collect();
    let values: Vec<Vec<f64>> = by_month.into_values().collect();
    let month_totals: Vec<f64> = values.iter().map(|row| row.iter().sum::<f64>()).collect();

    MonthCategoryPivot {
        months,
        categories,
        values,
        month_totals,
    }
}

/// One slice of the category pie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Percentage of all spending, 0..=100
    pub share: f64,
}

/// Category totals with their share of the whole, in category name order
pub fn category_breakdown(records: &[ExpenseRecord]) -> Vec<CategoryShare> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.category.as_str()).or_insert(0.0) += r.amount;
    }
    for total in totals.values_mut() {
        *total = floor_zero(*total);
    }
    let grand: f64 = totals.values().sum();

    totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category: category.to_string(),
            total,
            share: if grand > 0.0 { total / grand * 100.0 } else { 0.0 },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Distribution of individual amounts over `bins` equal-width buckets.
/// The last bucket includes its upper edge.
pub fn amount_distribution(records: &[ExpenseRecord], bins: usize) -> Vec<HistogramBin> {
    if records.is_empty() {
        return Vec::new();
    }
    let bins = bins.max(1);

    let min = records.iter().map(|r| r.amount).fold(f64::INFINITY, f64::min);
    let max = records.iter().map(|r| r.amount).fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: records.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for r in records {
        let idx = (((r.amount - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// The `n` largest expenses. Equal amounts keep ledger order.
pub fn top_expenses(records: &[ExpenseRecord], n: usize) -> Vec<ExpenseRecord> {
    let mut sorted: Vec<ExpenseRecord> = records.to_vec();
    sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    sorted.truncate(n);
    sorted
}
