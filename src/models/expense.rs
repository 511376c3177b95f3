//! A business expense.

use serde::{Deserialize, Serialize};

use crate::{models::RecordId, record::Entry};

/// The category name shown for expenses without a category.
pub const UNCATEGORIZED_LABEL: &str = "Não Categorizada";

/// Money spent by the shop, e.g. rent or stock purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The backend ID of the expense.
    pub id: RecordId,
    /// What the money was spent on.
    #[serde(default)]
    pub description: String,
    /// The amount spent.
    pub amount: f64,
    /// When the expense happened, as an ISO-8601 string.
    pub date: String,
    /// The user-chosen category, which may be missing or empty.
    #[serde(default)]
    pub category: Option<String>,
}

impl Expense {
    /// The category to group this expense under.
    pub fn category_name(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category,
            _ => UNCATEGORIZED_LABEL,
        }
    }
}

impl Entry for Expense {
    fn date(&self) -> &str {
        &self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}
