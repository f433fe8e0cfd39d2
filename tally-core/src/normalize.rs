//! Record normalizer: raw ledger text in, typed expense records out.
//!
//! A row with a blank date, or one that matches none of the accepted
//! formats, is dropped.
//! A row with a non-numeric amount is kept with amount 0.0.

use crate::amount::coerce_amount;
use crate::dates::parse_stored_date;
use crate::record::{DEFAULT_CATEGORY, DEFAULT_PAYMENT_MODE, ExpenseRecord, RawRow, or_default};

/// Normalize a single row. `None` when the date is blank or unparsable.
pub fn normalize_row(row: &RawRow) -> Option<ExpenseRecord> {
    let date = parse_stored_date(&row.date)?;

    Some(ExpenseRecord {
        date,
        category: or_default(&row.category, DEFAULT_CATEGORY),
        description: row.description.trim().to_string(),
        amount: coerce_amount(&row.amount),
        payment_mode: or_default(&row.payment_mode, DEFAULT_PAYMENT_MODE),
    })
}

/// Normalize a whole ledger, preserving row order.
pub fn normalize(rows: &[RawRow]) -> Vec<ExpenseRecord> {
    let out: Vec<ExpenseRecord> = rows
        .iter()
        .filter_map(|row| {
            let rec = normalize_row(row);
            if rec.is_none() {
                tracing::debug!(date = %row.date, "dropping row with unparsable date");
            }
            rec
        })
        .collect();

    if out.len() < rows.len() {
        tracing::debug!(dropped = rows.len() - out.len(), kept = out.len(), "normalized ledger");
    }
    out
}
