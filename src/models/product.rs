//! A catalogue product.

use serde::{Deserialize, Serialize};

use crate::models::RecordId;

/// Whether a product is ready to be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Created from a batch upload and still missing details.
    PendingDetails,
    /// Listed in the catalogue.
    Active,
}

/// A product in the shop's catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The backend ID of the product.
    pub id: RecordId,
    /// The display name of the product.
    pub name: String,
    /// The catalogue category, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// The listed price.
    pub price: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Whether the product is listed.
    pub status: ProductStatus,
}

impl Product {
    /// Whether the product is listed in the catalogue.
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}
