//! ECharts configurations for the dashboard's sales and expenses charts.
//!
//! The charts use bucket labels verbatim as X axis categories. Each chart is
//! serialized to JSON with `to_string()` and handed to the ECharts library by
//! the front end.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip,
        Trigger,
    },
    series::{Line, bar::Bar},
};

use crate::{aggregation::ChartPoint, period::Period};

const SALES_COLOR: &str = "#10b981";
const EXPENSES_COLOR: &str = "#f43f5e";

/// A dashboard chart with its HTML container ID and ECharts configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Builds the sales and expenses charts for `period`.
pub fn build_dashboard_charts(
    sales_points: &[ChartPoint],
    expenses_points: &[ChartPoint],
    period: Period,
) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "sales-chart",
            options: sales_chart(sales_points, period).to_string(),
        },
        DashboardChart {
            id: "expenses-chart",
            options: expenses_chart(expenses_points, period).to_string(),
        },
    ]
}

/// A line chart of sales per bucket.
pub fn sales_chart(points: &[ChartPoint], period: Period) -> Chart {
    let (labels, values) = split_points(points);

    base_chart(format!("Vendas ({})", period.chart_title()), labels).series(
        Line::new()
            .name("Vendas")
            .item_style(ItemStyle::new().color(SALES_COLOR))
            .data(values),
    )
}

/// A bar chart of expenses per bucket.
pub fn expenses_chart(points: &[ChartPoint], period: Period) -> Chart {
    let (labels, values) = split_points(points);

    base_chart(format!("Despesas ({})", period.chart_title()), labels).series(
        Bar::new()
            .name("Despesas")
            .item_style(ItemStyle::new().color(EXPENSES_COLOR))
            .data(values),
    )
}

fn base_chart(title: String, labels: Vec<String>) -> Chart {
    Chart::new()
        .title(Title::new().text(title))
        .tooltip(currency_tooltip())
        .legend(Legend::new().bottom(0))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
}

fn split_points(points: &[ChartPoint]) -> (Vec<String>, Vec<f64>) {
    points
        .iter()
        .map(|point| (point.label.clone(), point.value))
        .unzip()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
