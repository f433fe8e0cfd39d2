//! Expense record types: what gets appended to the ledger and what comes back out of it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ledger header, in file order
pub const LEDGER_HEADERS: [&str; 5] = ["Date", "Category", "Description", "Amount", "Payment_Mode"];

/// Category used when the user leaves it blank
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Payment mode used when the user leaves it blank
pub const DEFAULT_PAYMENT_MODE: &str = "Cash";

/// A single normalized expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub payment_mode: String,
}

impl ExpenseRecord {
    /// Stored form of this record, as written to the ledger
    pub fn to_raw(&self) -> RawRow {
        RawRow {
            date: self.date.format("%Y-%m-%d").to_string(),
            category: self.category.clone(),
            description: self.description.clone(),
            amount: self.amount.to_string(),
            payment_mode: self.payment_mode.clone(),
        }
    }
}

/// One ledger row as text, before normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub payment_mode: String,
}

impl RawRow {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
        payment_mode: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            description: description.into(),
            amount: amount.into(),
            payment_mode: payment_mode.into(),
        }
    }

    /// Fields in `LEDGER_HEADERS` order
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.date,
            &self.category,
            &self.description,
            &self.amount,
            &self.payment_mode,
        ]
    }
}

/// Rejected input for a new expense
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount must be greater than 0 (got {0})")]
    NonPositiveAmount(f64),
    #[error("amount must be a finite number")]
    NonFiniteAmount,
}

/// Caller input for a new expense, before defaults are applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub payment_mode: String,
}

impl NewExpense {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            description: description.into(),
            amount,
            payment_mode: String::new(),
        }
    }

    pub fn with_payment_mode(mut self, mode: impl Into<String>) -> Self {
        self.payment_mode = mode.into();
        self
    }

    /// Check the amount and fill blank category / payment mode.
    pub fn validate(self) -> Result<ExpenseRecord, ValidationError> {
        if !self.amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount);
        }
        if self.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }

        Ok(ExpenseRecord {
            date: self.date,
            category: or_default(&self.category, DEFAULT_CATEGORY),
            description: self.description.trim().to_string(),
            amount: self.amount,
            payment_mode: or_default(&self.payment_mode, DEFAULT_PAYMENT_MODE),
        })
    }
}

/// Trimmed `value`, or `fallback` when blank
pub fn or_default(value: &str, fallback: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        fallback.to_string()
    } else {
        v.to_string()
    }
}
