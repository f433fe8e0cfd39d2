//! Listing expenses: filter by category or month, sort by amount or date.

use serde::{Deserialize, Serialize};
use tally_core::{ExpenseRecord, MonthKey};

use crate::table::{Cell, SummaryRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Amount,
    Date,
}

/// Which records to show and in what order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseQuery {
    /// Case-insensitive exact match
    pub category: Option<String>,
    pub month: Option<MonthKey>,
    pub sort: Option<SortKey>,
    pub descending: bool,
}

impl ExpenseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn sort_by(mut self, key: SortKey, descending: bool) -> Self {
        self.sort = Some(key);
        self.descending = descending;
        self
    }

    fn matches(&self, r: &ExpenseRecord) -> bool {
        if let Some(cat) = &self.category {
            if !r.category.eq_ignore_ascii_case(cat.trim()) {
                return false;
            }
        }
        if let Some(month) = self.month {
            if MonthKey::of(r.date) != month {
                return false;
            }
        }
        true
    }

    /// Apply filters then sort. Sorting is stable; unsorted output keeps ledger order.
    pub fn select(&self, records: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
        let mut out: Vec<ExpenseRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        if let Some(key) = self.sort {
            out.sort_by(|a, b| {
                let ord = match key {
                    SortKey::Amount => a.amount.total_cmp(&b.amount),
                    SortKey::Date => a.date.cmp(&b.date),
                };
                if self.descending { ord.reverse() } else { ord }
            });
        }
        out
    }
}

pub fn selection_total(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

impl SummaryRow for ExpenseRecord {
    const COLUMNS: &'static [&'static str] =
        &["Date", "Category", "Description", "Amount", "Payment_Mode"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.date.format("%Y-%m-%d").to_string()),
            Cell::Text(self.category.clone()),
            Cell::Text(self.description.clone()),
            Cell::Amount(self.amount),
            Cell::Text(self.payment_mode.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(date: &str, category: &str, desc: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category: category.into(),
            description: desc.into(),
            amount,
            payment_mode: "Cash".into(),
        }
    }

    fn ledger() -> Vec<ExpenseRecord> {
        vec![
            rec("2025-10-01", "Food", "Lunch", 250.0),
            rec("2025-09-30", "Transport", "Bus", 40.0),
            rec("2025-10-03", "Shopping", "T-Shirt", 1200.0),
            rec("2025-10-05", "food", "Dinner", 300.0),
        ]
    }

    #[test]
    fn test_no_query_keeps_everything_in_order() {
        let got = ExpenseQuery::new().select(&ledger());
        assert_eq!(got, ledger());
    }

    #[test]
    fn test_filter_by_category_case_insensitive() {
        let got = ExpenseQuery::new().category("FOOD").select(&ledger());
        let descs: Vec<_> = got.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descs, ["Lunch", "Dinner"]);
        assert_eq!(selection_total(&got), 550.0);
    }

    #[test]
    fn test_filter_by_month() {
        let month: MonthKey = "2025-09".parse().unwrap();
        let got = ExpenseQuery::new().month(month).select(&ledger());
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].description, "Bus");
    }

    #[test]
    fn test_sort_amount_descending() {
        let got = ExpenseQuery::new()
            .sort_by(SortKey::Amount, true)
            .select(&ledger());
        for w in got.windows(2) {
            assert!(w[0].amount >= w[1].amount, "amounts not descending");
        }
        assert_eq!(got[0].description, "T-Shirt");
    }

    #[test]
    fn test_sort_date_newest_first() {
        let got = ExpenseQuery::new()
            .sort_by(SortKey::Date, true)
            .select(&ledger());
        assert_eq!(got[0].description, "Dinner");
        assert_eq!(got.last().unwrap().description, "Bus");
    }

    #[test]
    fn test_no_match_is_empty() {
        let got = ExpenseQuery::new().category("Travel").select(&ledger());
        assert!(got.is_empty());
        assert_eq!(selection_total(&got), 0.0);
    }
}
