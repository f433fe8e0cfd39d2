//! Text rendering of summary tables plus their trailing total lines.
//!
//! Totals here only add up (or average) columns that were already
//! aggregated; nothing is recomputed from records.

use tally_core::{ExpenseRecord, Money};

use crate::aggregate::{CategoryInsight, MonthlySummary, YearlyOverview, YearlyTotals};
use crate::table::{Cell, SummaryRow, SummaryTable};
use crate::view::selection_total;

/// Grid table with a header row, one separator per row, numbers right aligned.
pub fn render_table<R: SummaryRow>(table: &SummaryTable<R>) -> String {
    render_grid(R::COLUMNS, table.iter().map(|r| r.cells()).collect())
}

fn render_grid(columns: &[&str], rows: Vec<Vec<Cell>>) -> String {
    let rendered: Vec<Vec<(String, bool)>> = rows
        .iter()
        .map(|row| row.iter().map(|c| (c.render(), c.is_numeric())).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rendered
                .iter()
                .filter_map(|row| row.get(i))
                .map(|(text, _)| text.chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let rule = |fill: char| {
        let mut s = String::from("+");
        for w in &widths {
            s.extend(std::iter::repeat_n(fill, w + 2));
            s.push('+');
        }
        s
    };

    let line = |cells: Vec<(&str, bool)>| {
        let mut s = String::from("|");
        for (i, w) in widths.iter().enumerate() {
            let (text, right) = cells.get(i).copied().unwrap_or(("", false));
            let pad = w.saturating_sub(text.chars().count());
            s.push(' ');
            if right {
                s.extend(std::iter::repeat_n(' ', pad));
                s.push_str(text);
            } else {
                s.push_str(text);
                s.extend(std::iter::repeat_n(' ', pad));
            }
            s.push_str(" |");
        }
        s
    };

    let mut out = Vec::with_capacity(rendered.len() * 2 + 3);
    out.push(rule('-'));
    out.push(line(columns.iter().map(|h| (*h, false)).collect()));
    out.push(rule('='));
    for row in &rendered {
        out.push(line(row.iter().map(|(t, r)| (t.as_str(), *r)).collect()));
        out.push(rule('-'));
    }
    if rendered.is_empty() {
        // Header-only table still closes
        out.pop();
        out.push(rule('-'));
    }
    out.join("\n")
}

fn no_data(view: &str) -> String {
    format!("No expense data available for {view}.")
}

/// Category table, overall total and the mean of the per-category averages
pub fn category_report(table: &CategoryInsight, money: &Money) -> String {
    if table.is_empty() {
        return no_data("category insights");
    }

    let total: f64 = table.iter().map(|r| r.total).sum();
    let avg = table.iter().map(|r| r.average).sum::<f64>() / table.len() as f64;

    format!(
        "Category Insight Summary\n{}\n\nOverall Total Spent: {}\nAverage Spending Across Categories: {}",
        render_table(table),
        money.format(total),
        money.format(avg)
    )
}

pub fn monthly_report(table: &MonthlySummary, money: &Money) -> String {
    if table.is_empty() {
        return no_data("monthly summary");
    }

    let total: f64 = table.iter().map(|r| r.total).sum();
    format!(
        "Monthly Expense Summary\n{}\n\nTotal across all months: {}",
        render_table(table),
        money.format(total)
    )
}

/// Month-wise overview, then per-year totals and the grand total
pub fn yearly_report(overview: &YearlyOverview, years: &YearlyTotals, money: &Money) -> String {
    if overview.is_empty() {
        return no_data("yearly overview");
    }

    let mut out = format!("Yearly Overview (Month-wise)\n{}", render_table(overview));
    if !years.is_empty() {
        let grand: f64 = years.iter().map(|r| r.total).sum();
        out.push_str(&format!(
            "\n\nYearly Total Summary\n{}\n\nGrand Total Across All Years: {}",
            render_table(years),
            money.format(grand)
        ));
    }
    out
}

/// Listing of individual expenses with the selection total
pub fn expense_list(records: &[ExpenseRecord], money: &Money) -> String {
    if records.is_empty() {
        return "No matching records found.".to_string();
    }

    let rows = records.iter().map(|r| r.cells()).collect();
    format!(
        "{}\n\nTotal in selection: {}",
        render_grid(ExpenseRecord::COLUMNS, rows),
        money.format(selection_total(records))
    )
}
