//! tally-report: summary views, expense listing, chart datasets and text reports

pub mod aggregate;
pub mod charts;
pub mod format;
pub mod table;
pub mod view;

pub use aggregate::{
    CategoryInsight, CategoryInsightRow, MonthlyRow, MonthlySummary, YearMonthRow, YearTotalRow,
    YearlyOverview, YearlyTotals, category_insight, monthly_summary, yearly_overview,
    yearly_total_summary, yearly_totals,
};
pub use format::{category_report, expense_list, monthly_report, render_table, yearly_report};
pub use table::{Cell, SummaryRow, SummaryTable};
pub use view::{ExpenseQuery, SortKey, selection_total};
