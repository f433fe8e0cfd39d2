//! The four summary views over a normalized ledger.
//!
//! Every view is recomputed from the full record list. Totals and averages
//! are floored at zero after grouping.

use serde::Serialize;
use std::collections::BTreeMap;
use tally_core::{ExpenseRecord, MonthKey, month_abbrev};

use crate::table::{Cell, SummaryRow, SummaryTable};

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInsightRow {
    pub category: String,
    pub entries: usize,
    pub total: f64,
    pub average: f64,
}

impl SummaryRow for CategoryInsightRow {
    const COLUMNS: &'static [&'static str] = &["Category", "Entries", "Total Spent", "Average Spent"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.category.clone()),
            Cell::Int(self.entries as i64),
            Cell::Amount(self.total),
            Cell::Amount(self.average),
        ]
    }
}

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub month: MonthKey,
    pub total: f64,
}

impl SummaryRow for MonthlyRow {
    const COLUMNS: &'static [&'static str] = &["Month", "Total"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Text(self.month.to_string()), Cell::Amount(self.total)]
    }
}

/// Spending for one month of one year, month shown by name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearMonthRow {
    pub year: i32,
    /// 1-based
    pub month: u32,
    pub total: f64,
}

impl YearMonthRow {
    pub fn month_name(&self) -> &'static str {
        month_abbrev(self.month)
    }
}

impl SummaryRow for YearMonthRow {
    const COLUMNS: &'static [&'static str] = &["Year", "Month", "Total"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.year as i64),
            Cell::Text(self.month_name().to_string()),
            Cell::Amount(self.total),
        ]
    }
}

/// Spending for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotalRow {
    pub year: i32,
    pub total: f64,
}

impl SummaryRow for YearTotalRow {
    const COLUMNS: &'static [&'static str] = &["Year", "Total"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Int(self.year as i64), Cell::Amount(self.total)]
    }
}

pub type CategoryInsight = SummaryTable<CategoryInsightRow>;
pub type MonthlySummary = SummaryTable<MonthlyRow>;
pub type YearlyOverview = SummaryTable<YearMonthRow>;
pub type YearlyTotals = SummaryTable<YearTotalRow>;

pub(crate) fn floor_zero(v: f64) -> f64 {
    v.max(0.0)
}

/// Count, total and mean per category, highest total first.
/// Equal totals stay in category name order.
pub fn category_insight(records: &[ExpenseRecord]) -> CategoryInsight {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for r in records {
        let g = groups.entry(r.category.as_str()).or_insert((0, 0.0));
        g.0 += 1;
        g.1 += r.amount;
    }

    let mut rows: Vec<CategoryInsightRow> = groups
        .into_iter()
        .map(|(category, (entries, total))| CategoryInsightRow {
            category: category.to_string(),
            entries,
            total: floor_zero(total),
            average: floor_zero(total / entries as f64),
        })
        .collect();

    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
    SummaryTable::new(rows)
}

/// Total per `YYYY-MM`, oldest first
pub fn monthly_summary(records: &[ExpenseRecord]) -> MonthlySummary {
    let mut groups: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for r in records {
        *groups.entry(MonthKey::of(r.date)).or_insert(0.0) += r.amount;
    }

    SummaryTable::new(
        groups
            .into_iter()
            .map(|(month, total)| MonthlyRow {
                month,
                total: floor_zero(total),
            })
            .collect(),
    )
}

/// Total per (year, month), by year then calendar month (Jan..Dec)
pub fn yearly_overview(records: &[ExpenseRecord]) -> YearlyOverview {
    let mut groups: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for r in records {
        *groups.entry(MonthKey::of(r.date)).or_insert(0.0) += r.amount;
    }

    SummaryTable::new(
        groups
            .into_iter()
            .map(|(key, total)| YearMonthRow {
                year: key.year,
                month: key.month,
                total: floor_zero(total),
            })
            .collect(),
    )
}

/// Second stage: sum the month rows of an overview by year
pub fn yearly_totals(overview: &YearlyOverview) -> YearlyTotals {
    let mut groups: BTreeMap<i32, f64> = BTreeMap::new();
    for row in overview {
        *groups.entry(row.year).or_insert(0.0) += row.total;
    }

    SummaryTable::new(
        groups
            .into_iter()
            .map(|(year, total)| YearTotalRow {
                year,
                total: floor_zero(total),
            })
            .collect(),
    )
}

/// `yearly_overview` followed by `yearly_totals`
pub fn yearly_total_summary(records: &[ExpenseRecord]) -> YearlyTotals {
    yearly_totals(&yearly_overview(records))
}
