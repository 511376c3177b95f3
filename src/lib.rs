//! Analytics for a retail shop's dashboard.
//!
//! Sales and expenses fetched from the shop's backend are grouped into
//! time buckets for the selected [Period] (today, this week, this month or
//! all time) and put in chronological order, ready to be drawn as charts.
//! Around the charts the dashboard shows period totals, progress towards the
//! sales goal, the best-selling products, an expense breakdown by category
//! and the latest records.
//!
//! Everything here is a pure function of its inputs: the current time and the
//! local timezone are passed in explicitly.

#![warn(missing_docs)]

mod aggregation;
mod cache;
mod charts;
mod config;
mod error;
mod format;
mod label;
mod loader;
mod locale;
mod models;
mod period;
mod record;
mod report;
mod summary;
mod timezone;

pub use aggregation::{
    ChartPoint, aggregate_by_label, aggregate_for_chart, compare_labels, filter_to_window,
    sort_chart_points, total_in_window,
};
pub use cache::{ChartCache, DEFAULT_CACHE_CAPACITY, fingerprint};
pub use charts::{DashboardChart, build_dashboard_charts, expenses_chart, sales_chart};
pub use config::{DEFAULT_TIMEZONE, DashboardConfig};
pub use error::Error;
pub use format::{format_currency, format_percentage};
pub use label::{format_label, parse_label};
pub use loader::{load_expenses, load_products, load_sales, parse_csv, parse_json};
pub use locale::{MONTH_ABBREVIATIONS, month_abbreviation, parse_month_abbreviation};
pub use models::{
    Expense, Product, ProductStatus, RecordId, Sale, SaleItemType, UNCATEGORIZED_LABEL,
};
pub use period::{PERIODS, Period, Window};
pub use record::{Entry, TimestampedAmount, normalize, parse_record_date};
pub use report::{DashboardData, DashboardReport, build_dashboard_report};
pub use summary::{
    CategoryTotal, PeriodTotals, ProductSales, expense_breakdown, goal_progress, most_recent,
    top_selling_products,
};
pub use timezone::{get_local_offset, resolve_local_offset};
