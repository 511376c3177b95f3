//! A point-of-sale transaction.

use serde::{Deserialize, Serialize};

use crate::{models::RecordId, record::Entry};

/// Whether a sale was for a stocked product or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleItemType {
    /// A product from the catalogue.
    Product,
    /// A service, e.g. a repair.
    Service,
}

/// A sale of one catalogue item, possibly in several units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// The backend ID of the sale.
    pub id: RecordId,
    /// The ID of the product or service sold.
    pub item_id: RecordId,
    /// Whether [Sale::item_id] refers to a product or a service.
    pub item_type: SaleItemType,
    /// The display name of the item at the time of sale.
    pub item_name: String,
    /// How many units were sold.
    pub quantity_sold: f64,
    /// The unit price charged.
    pub price_per_item: f64,
    /// The amount charged for the whole sale.
    pub total_amount: f64,
    /// When the sale happened, as an ISO-8601 string.
    pub date: String,
}

impl Entry for Sale {
    fn date(&self) -> &str {
        &self.date
    }

    fn amount(&self) -> f64 {
        self.total_amount
    }
}
