//! Summary figures shown next to the dashboard charts.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap},
};

use serde::Serialize;
use time::UtcOffset;

use crate::{
    aggregation::total_in_window,
    models::{Expense, Product, RecordId, Sale, SaleItemType},
    period::Window,
    record::{Entry, parse_record_date},
};

/// Revenue, expenses and profit over a period's window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    /// Sum of the sales' total amounts.
    pub revenue: f64,
    /// Sum of the expense amounts.
    pub expenses: f64,
    /// Revenue minus expenses.
    pub net_profit: f64,
}

impl PeriodTotals {
    /// Totals the sales and expenses dated inside `window`.
    pub fn calculate(
        sales: &[Sale],
        expenses: &[Expense],
        window: Window,
        local_offset: UtcOffset,
    ) -> Self {
        let revenue = total_in_window(sales, window, local_offset);
        let expenses = total_in_window(expenses, window, local_offset);

        Self {
            revenue,
            expenses,
            net_profit: revenue - expenses,
        }
    }
}

/// How much of the sales goal has been reached, as a percentage capped at 100.
///
/// Returns `None` when no positive goal is set.
pub fn goal_progress(revenue: f64, goal: f64) -> Option<f64> {
    if goal > 0.0 {
        Some((revenue / goal * 100.0).min(100.0))
    } else {
        None
    }
}

/// Units sold and revenue of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    /// The product's backend ID.
    pub product_id: RecordId,
    /// The product's current catalogue name.
    pub name: String,
    /// Total units sold.
    pub quantity: f64,
    /// Total revenue from the product's sales.
    pub revenue: f64,
}

/// Ranks active products by the revenue of all their sales, highest first.
///
/// Service sales and sales of products that are not (or no longer) active in
/// the catalogue are ignored. At most `limit` products are returned.
pub fn top_selling_products(
    sales: &[Sale],
    products: &[Product],
    limit: usize,
) -> Vec<ProductSales> {
    let active_products: HashMap<&str, &Product> = products
        .iter()
        .filter(|product| product.is_active())
        .map(|product| (product.id.as_str(), product))
        .collect();

    let mut sales_by_product: HashMap<&str, ProductSales> = HashMap::new();

    for sale in sales
        .iter()
        .filter(|sale| sale.item_type == SaleItemType::Product)
    {
        let Some(product) = active_products.get(sale.item_id.as_str()) else {
            continue;
        };

        let entry = sales_by_product
            .entry(product.id.as_str())
            .or_insert_with(|| ProductSales {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: 0.0,
                revenue: 0.0,
            });
        entry.quantity += sale.quantity_sold;
        entry.revenue += sale.total_amount;
    }

    let mut ranked: Vec<ProductSales> = sales_by_product.into_values().collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(limit);
    ranked
}

/// The total spent in one expense category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name, see [Expense::category_name].
    pub category: String,
    /// The summed expense amounts.
    pub total: f64,
}

/// Groups expenses by category, largest total first.
pub fn expense_breakdown<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.category_name()).or_insert(0.0) += expense.amount;
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
        })
        .collect();

    // The map is ordered by name and the sort is stable, so ties stay alphabetical.
    breakdown.sort_by(|a, b| b.total.total_cmp(&a.total));
    breakdown
}

/// Gets the `limit` newest entries, newest first.
///
/// Entries with unparseable dates are placed after all others.
pub fn most_recent<E: Entry>(entries: &[E], limit: usize, local_offset: UtcOffset) -> Vec<&E> {
    let mut dated: Vec<_> = entries
        .iter()
        .map(|entry| (parse_record_date(entry.date(), local_offset), entry))
        .collect();

    dated.sort_by_key(|(instant, _)| Reverse(*instant));

    dated
        .into_iter()
        .take(limit)
        .map(|(_, entry)| entry)
        .collect()
}
