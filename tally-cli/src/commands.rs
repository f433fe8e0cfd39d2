//! Command bodies. Each returns the text to print so the binary stays a thin
//! dispatcher and the commands can be tested against a temp ledger.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tally_core::{ExpenseRecord, LEDGER_HEADERS, Money, MonthKey, NewExpense, format_date, parse_date};
use tally_report::{
    ExpenseQuery, SortKey, category_insight, category_report, charts, expense_list,
    monthly_report, monthly_summary, yearly_overview, yearly_report, yearly_totals,
};
use tally_store::LedgerStore;

use crate::state::ensure_dir;

/// Everything a command needs, resolved once from config and flags.
#[derive(Debug, Clone)]
pub struct Session {
    pub store: LedgerStore,
    pub money: Money,
    pub currency_code: String,
    pub today: NaiveDate,
}

impl Session {
    fn records(&self) -> Vec<ExpenseRecord> {
        self.store.load_normalized()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub date: Option<String>,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub payment_mode: String,
}

pub fn add(session: &Session, args: AddArgs) -> Result<String> {
    let text = args.date.unwrap_or_default();
    let Some(date) = parse_date(&text, session.today) else {
        bail!("unrecognized date: {text:?} (try YYYY-MM-DD)");
    };

    let expense = NewExpense::new(date, args.category, args.description, args.amount)
        .with_payment_mode(args.payment_mode);
    let record = session
        .store
        .append(expense)
        .with_context(|| format!("add expense to {}", session.store.path().display()))?;

    Ok(format!(
        "Added: {} | {} | {} | {} | {}",
        format_date(record.date),
        record.category,
        record.description,
        session.money.format(record.amount),
        record.payment_mode
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Amount,
    Date,
}

impl From<SortArg> for SortKey {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Amount => SortKey::Amount,
            SortArg::Date => SortKey::Date,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub category: Option<String>,
    pub month: Option<MonthKey>,
    pub sort: Option<SortArg>,
    pub descending: bool,
}

pub fn list(session: &Session, args: ListArgs) -> String {
    let mut query = ExpenseQuery::new();
    if let Some(cat) = args.category {
        query = query.category(cat);
    }
    if let Some(month) = args.month {
        query = query.month(month);
    }
    if let Some(sort) = args.sort {
        query = query.sort_by(sort.into(), args.descending);
    }

    let records = session.records();
    if records.is_empty() {
        return "No expense data available.".to_string();
    }
    expense_list(&query.select(&records), &session.money)
}

pub fn categories(session: &Session) -> String {
    category_report(&category_insight(&session.records()), &session.money)
}

pub fn monthly(session: &Session) -> String {
    monthly_report(&monthly_summary(&session.records()), &session.money)
}

pub fn yearly(session: &Session) -> String {
    let overview = yearly_overview(&session.records());
    let years = yearly_totals(&overview);
    yearly_report(&overview, &years, &session.money)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Total per month
    Monthly,
    /// Same series as `monthly`, meant for a line chart
    Trend,
    /// Month x category totals
    ByCategory,
    /// Category totals with percentage share
    Breakdown,
    /// Histogram of individual amounts
    Distribution,
    /// Largest individual expenses
    Top,
}

impl ChartKind {
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::Monthly => "monthly_spending",
            ChartKind::Trend => "spending_trend",
            ChartKind::ByCategory => "monthly_by_category",
            ChartKind::Breakdown => "category_breakdown",
            ChartKind::Distribution => "amount_distribution",
            ChartKind::Top => "top_expenses",
        }
    }
}

/// Where chart datasets go. Passed per call; nothing is remembered between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutput {
    Stdout,
    Dir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ChartArgs {
    pub kind: ChartKind,
    pub bins: usize,
    pub top: usize,
    pub output: ChartOutput,
}

pub fn chart(session: &Session, args: ChartArgs) -> Result<String> {
    let records = session.records();
    if records.is_empty() {
        return Ok("No expense data available for charts.".to_string());
    }

    let json = match args.kind {
        ChartKind::Monthly | ChartKind::Trend => to_json(&charts::monthly_spending(&records))?,
        ChartKind::ByCategory => to_json(&charts::monthly_by_category(&records))?,
        ChartKind::Breakdown => to_json(&charts::category_breakdown(&records))?,
        ChartKind::Distribution => to_json(&charts::amount_distribution(&records, args.bins))?,
        ChartKind::Top => to_json(&charts::top_expenses(&records, args.top))?,
    };

    match args.output {
        ChartOutput::Stdout => Ok(json),
        ChartOutput::Dir(dir) => {
            ensure_dir(&dir)?;
            let path = dir.join(format!("{}.json", args.kind.file_stem()));
            fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
            tracing::debug!(path = %path.display(), "wrote chart dataset");
            Ok(format!("Wrote {}", path.display()))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize chart dataset")
}

/// Ledger diagnostics: file state, row counts, columns and a short preview.
pub fn check(session: &Session) -> String {
    let path = session.store.path();
    let mut out = vec![
        format!("Build: {}", env!("TALLY_BUILD_SHA")),
        format!("Ledger: {}", path.display()),
        format!("Exists: {}", path.exists()),
        format!(
            "Currency: {} ({})",
            session.currency_code,
            session.money.symbol()
        ),
    ];

    if !path.exists() {
        out.push("No ledger yet; it is created on the first `tally add`.".to_string());
        return out.join("\n");
    }

    match session.store.headers() {
        Ok(cols) => {
            out.push(format!("Columns: {}", cols.join(", ")));
            let missing: Vec<&str> = LEDGER_HEADERS
                .iter()
                .copied()
                .filter(|h| !cols.iter().any(|c| c.eq_ignore_ascii_case(h)))
                .collect();
            if !missing.is_empty() {
                out.push(format!("Missing columns: {}", missing.join(", ")));
            }
        }
        Err(e) => out.push(format!("Columns: unreadable ({e})")),
    }

    let raw = session.store.load();
    let records = tally_core::normalize(&raw);
    out.push(format!("Raw rows: {}", raw.len()));
    out.push(format!("Valid rows: {}", records.len()));
    out.push(format!("Dropped (bad date): {}", raw.len() - records.len()));

    if !records.is_empty() {
        out.push(String::new());
        out.push("First rows:".to_string());
        for r in records.iter().take(5) {
            out.push(format!(
                "  {} | {} | {} | {} | {}",
                format_date(r.date),
                r.category,
                r.description,
                session.money.format(r.amount),
                r.payment_mode
            ));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn session(path: &Path) -> Session {
        Session {
            store: LedgerStore::new(path),
            money: Money::new("₹"),
            currency_code: "INR".to_string(),
            today: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
        }
    }

    fn sample(dir: &Path) -> PathBuf {
        let src = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("sample_expenses.csv");
        let dst = dir.join("Expenses.csv");
        fs::copy(src, &dst).unwrap();
        dst
    }

    fn add_args(date: &str, amount: f64) -> AddArgs {
        AddArgs {
            date: Some(date.to_string()),
            category: "Food".to_string(),
            description: "Test Lunch".to_string(),
            amount,
            payment_mode: "Cash".to_string(),
        }
    }

    #[test]
    fn test_add_appends_last() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(&sample(dir.path()));

        let msg = add(&s, add_args("2025-10-12", 250.0)).unwrap();
        assert_eq!(msg, "Added: 12 Oct 2025 | Food | Test Lunch | ₹250.00 | Cash");

        let rows = s.store.try_load().unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].description, "Test Lunch");
    }

    #[test]
    fn test_add_rejects_negative_and_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(&sample(dir.path()));

        let err = add(&s, add_args("2025-10-12", -100.0)).unwrap_err();
        assert!(format!("{err:#}").contains("greater than 0"));
        assert!(add(&s, add_args("someday", 10.0)).is_err());
        assert_eq!(s.store.try_load().unwrap().len(), 5);
    }

    #[test]
    fn test_add_blank_date_is_today() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(&dir.path().join("Expenses.csv"));

        let msg = add(&s, add_args("", 1.0)).unwrap();
        assert!(msg.starts_with("Added: 20 Oct 2025"));
    }

    #[test]
    fn test_reports_on_sample() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(&sample(dir.path()));

        assert!(monthly(&s).contains("Total across all months: ₹2690.00"));
        assert!(categories(&s).contains("Overall Total Spent: ₹2690.00"));
        let y = yearly(&s);
        assert!(y.contains("| 2025 | Oct"));
        assert!(y.contains("Grand Total Across All Years: ₹2690.00"));
    }

    #[test]
    fn test_reports_on_missing_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(&dir.path().join("nested").join("Expenses.csv"));

        assert_eq!(monthly(&s), "No expense data available for monthly summary.");
        assert_eq!(list(&s, ListArgs::default()), "No expense data available.");
    }

    #[test]
    fn test_list_filters_and_totals() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(&sample(dir.path()));

        let out = list(
            &s,
            ListArgs {
                category: Some("food".to_string()),
                sort: Some(SortArg::Amount),
                descending: true,
                ..ListArgs::default()
            },
        );
        assert!(out.ends_with("Total in selection: ₹550.00"));
        let dinner = out.find("Dinner").unwrap();
        let lunch = out.find("Lunch").unwrap();
        assert!(dinner < lunch);

        let none = list(
            &s,
            ListArgs {
                month: Some("2024-01".parse().unwrap()),
                ..ListArgs::default()
            },
        );
        assert_eq!(none, "No matching records found.");
    }

    #[test]
    fn test_chart_to_stdout_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(&sample(dir.path()));

        let json = chart(
            &s,
            ChartArgs {
                kind: ChartKind::Top,
                bins: 20,
                top: 2,
                output: ChartOutput::Stdout,
            },
        )
        .unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
        assert_eq!(v[0]["amount"], 1200.0);

        let out_dir = dir.path().join("charts");
        let msg = chart(
            &s,
            ChartArgs {
                kind: ChartKind::Breakdown,
                bins: 20,
                top: 10,
                output: ChartOutput::Dir(out_dir.clone()),
            },
        )
        .unwrap();
        assert!(msg.starts_with("Wrote "));
        assert!(out_dir.join("category_breakdown.json").exists());
    }

    #[test]
    fn test_check_counts_dropped_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Expenses.csv");
        fs::write(
            &path,
            "Date,Category,Amount\n2025-10-01,Food,250\nnot-a-date,Food,10\n",
        )
        .unwrap();

        let out = check(&session(&path));
        let build = out.lines().next().unwrap();
        assert!(build.starts_with("Build: ") && build.len() > "Build: ".len());
        assert!(out.contains("Raw rows: 2"));
        assert!(out.contains("Valid rows: 1"));
        assert!(out.contains("Dropped (bad date): 1"));
        assert!(out.contains("Missing columns: Description, Payment_Mode"));
        assert!(out.contains("01 Oct 2025 | Food |  | ₹250.00 | Cash"));
    }
}
