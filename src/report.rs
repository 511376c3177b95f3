//! Everything the dashboard shows for one period, in one serializable report.

use serde::Serialize;
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

use crate::{
    aggregation::{ChartPoint, aggregate_for_chart, filter_to_window},
    config::DashboardConfig,
    models::{Expense, Product, Sale},
    period::Period,
    record::normalize,
    summary::{
        CategoryTotal, PeriodTotals, ProductSales, expense_breakdown, goal_progress, most_recent,
        top_selling_products,
    },
};

/// The records fetched from the backend.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    /// Every sale.
    pub sales: Vec<Sale>,
    /// Every expense.
    pub expenses: Vec<Expense>,
    /// The product catalogue.
    pub products: Vec<Product>,
}

/// The figures, charts and lists of the dashboard for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// The selected period.
    pub period: Period,
    /// The RFC 3339 start of the period's window, absent for [Period::All].
    pub window_start: Option<String>,
    /// Revenue, expenses and profit inside the window.
    pub totals: PeriodTotals,
    /// The sales goal used for [DashboardReport::goal_progress].
    pub sales_goal: f64,
    /// Percentage of the sales goal reached, if a goal is set.
    pub goal_progress: Option<f64>,
    /// Sales per bucket, oldest first.
    pub sales_chart: Vec<ChartPoint>,
    /// Expenses per bucket, oldest first.
    pub expenses_chart: Vec<ChartPoint>,
    /// Best-selling active products over all time.
    pub top_products: Vec<ProductSales>,
    /// Expenses inside the window, by category.
    pub expense_breakdown: Vec<CategoryTotal>,
    /// The newest sales, regardless of the window.
    pub recent_sales: Vec<Sale>,
    /// The newest expenses, regardless of the window.
    pub recent_expenses: Vec<Expense>,
}

/// Builds the dashboard report for `period` as seen at `now`.
///
/// `local_offset` defines the calendar used for windows and bucket labels.
pub fn build_dashboard_report(
    data: &DashboardData,
    period: Period,
    now: OffsetDateTime,
    config: &DashboardConfig,
    local_offset: UtcOffset,
) -> DashboardReport {
    let window = period.window(now, local_offset);
    let totals = PeriodTotals::calculate(&data.sales, &data.expenses, window, local_offset);

    let sales_chart = aggregate_for_chart(&normalize(&data.sales), period, now, local_offset);
    let expenses_chart = aggregate_for_chart(&normalize(&data.expenses), period, now, local_offset);

    let windowed_expenses = filter_to_window(&data.expenses, window, local_offset);

    DashboardReport {
        period,
        window_start: window.start().and_then(|start| start.format(&Rfc3339).ok()),
        totals,
        sales_goal: config.sales_goal,
        goal_progress: goal_progress(totals.revenue, config.sales_goal),
        sales_chart,
        expenses_chart,
        top_products: top_selling_products(
            &data.sales,
            &data.products,
            config.top_products_limit,
        ),
        expense_breakdown: expense_breakdown(windowed_expenses),
        recent_sales: most_recent(&data.sales, config.recent_limit, local_offset)
            .into_iter()
            .cloned()
            .collect(),
        recent_expenses: most_recent(&data.expenses, config.recent_limit, local_offset)
            .into_iter()
            .cloned()
            .collect(),
    }
}
