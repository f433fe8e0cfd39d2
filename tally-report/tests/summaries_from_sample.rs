use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tally_core::{ExpenseRecord, NewExpense};
use tally_report::{
    category_insight, charts, monthly_summary, yearly_overview, yearly_total_summary, yearly_totals,
};
use tally_store::LedgerStore;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("sample_expenses.csv")
}

fn sample_records() -> Vec<ExpenseRecord> {
    LedgerStore::new(sample_path()).load_normalized()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_category_insight_top_row() {
    let t = category_insight(&sample_records());
    let top = &t.rows()[0];
    assert_eq!(top.category, "Shopping");
    assert_eq!(top.total, 1200.0);

    let food = t.iter().find(|r| r.category == "Food").unwrap();
    assert_eq!(food.entries, 2);
    assert_eq!(food.total, 550.0);
    assert_eq!(food.average, 275.0);

    for w in t.rows().windows(2) {
        assert!(w[0].total >= w[1].total, "category totals not descending");
    }
}

#[test]
fn test_monthly_and_yearly_scenario() {
    let recs = sample_records();

    let monthly = monthly_summary(&recs);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly.rows()[0].month.to_string(), "2025-10");
    assert_eq!(monthly.rows()[0].total, 2690.0);

    let years = yearly_total_summary(&recs);
    assert_eq!(years.len(), 1);
    assert_eq!(years.rows()[0].year, 2025);
    assert_eq!(years.rows()[0].total, 2690.0);
}

/// With only food and transport rows, Food leads the category table.
#[test]
fn test_food_is_top_when_largest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Expenses.csv");
    fs::write(
        &path,
        "Date,Category,Description,Amount,Payment_Mode\n\
         2025-10-01,Food,Lunch,250,Cash\n\
         2025-10-02,Transport,Bus,40,Card\n\
         2025-10-05,Food,Dinner,300,Cash\n",
    )
    .unwrap();

    let t = category_insight(&LedgerStore::new(&path).load_normalized());
    let top = &t.rows()[0];
    assert_eq!((top.category.as_str(), top.entries, top.total, top.average), ("Food", 2, 550.0, 275.0));
}

#[test]
fn test_totals_agree_across_views() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Expenses.csv");
    fs::copy(sample_path(), &path).unwrap();
    let store = LedgerStore::new(&path);

    let extra = [
        ("2024-12-30", "Gifts", 99.99),
        ("2025-01-15", "Food", 12.35),
        ("2025-04-01", "Bills", 1500.0),
        ("2026-02-28", "Travel", 0.01),
    ];
    for (d, cat, amount) in extra {
        let date = NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
        store.append(NewExpense::new(date, cat, "", amount)).unwrap();
    }

    let recs = store.load_normalized();
    let raw: f64 = recs.iter().map(|r| r.amount).sum();
    let by_cat: f64 = category_insight(&recs).iter().map(|r| r.total).sum();
    let by_month: f64 = monthly_summary(&recs).iter().map(|r| r.total).sum();
    let by_year: f64 = yearly_totals(&yearly_overview(&recs)).iter().map(|r| r.total).sum();

    assert!(close(raw, by_cat), "{raw} vs {by_cat}");
    assert!(close(raw, by_month), "{raw} vs {by_month}");
    assert!(close(raw, by_year), "{raw} vs {by_year}");

    let years: Vec<i32> = yearly_total_summary(&recs).iter().map(|r| r.year).collect();
    assert_eq!(years, [2024, 2025, 2026]);
}

#[test]
fn test_bad_rows_in_every_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Expenses.csv");
    fs::write(
        &path,
        "Date,Category,Description,Amount,Payment_Mode\n\
         2025-10-01,Food,Lunch,250,Cash\n\
         not-a-date,Ghost,Nobody,999,Cash\n\
         2025-10-02,Misc,Typo,abc,Cash\n",
    )
    .unwrap();

    let recs = LedgerStore::new(&path).load_normalized();
    assert_eq!(recs.len(), 2);

    let cats = category_insight(&recs);
    assert!(cats.iter().all(|r| r.category != "Ghost"));
    let misc = cats.iter().find(|r| r.category == "Misc").unwrap();
    assert_eq!(misc.entries, 1);
    assert_eq!(misc.total, 0.0);

    assert_eq!(monthly_summary(&recs).rows()[0].total, 250.0);
    assert_eq!(yearly_total_summary(&recs).rows()[0].total, 250.0);
    assert!(charts::top_expenses(&recs, 5).iter().all(|r| r.category != "Ghost"));
}

#[test]
fn test_all_invalid_ledger_gives_empty_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Expenses.csv");
    fs::write(
        &path,
        "Date,Category,Description,Amount,Payment_Mode\n\
         someday,Food,Lunch,250,Cash\n",
    )
    .unwrap();

    let recs = LedgerStore::new(&path).load_normalized();
    assert!(category_insight(&recs).is_empty());
    assert!(monthly_summary(&recs).is_empty());
    assert!(yearly_overview(&recs).is_empty());
    assert!(yearly_total_summary(&recs).is_empty());
    assert_eq!(yearly_total_summary(&recs).columns(), ["Year", "Total"]);
}

#[test]
fn test_everything_non_negative() {
    let recs = sample_records();
    assert!(category_insight(&recs).iter().all(|r| r.total >= 0.0 && r.average >= 0.0));
    assert!(monthly_summary(&recs).iter().all(|r| r.total >= 0.0));
    assert!(yearly_total_summary(&recs).iter().all(|r| r.total >= 0.0));
}

#[test]
fn test_chart_datasets_serialize() {
    let recs = sample_records();
    let pivot = charts::monthly_by_category(&recs);
    let json = serde_json::to_value(&pivot).unwrap();
    assert_eq!(json["months"][0], "2025-10");
    assert_eq!(json["month_totals"][0], 2690.0);

    let monthly = serde_json::to_value(charts::monthly_spending(&recs)).unwrap();
    assert_eq!(monthly[0]["month"], "2025-10");
}
