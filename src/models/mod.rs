//! This module defines the domain data types sent by the backend.

pub use expense::{Expense, UNCATEGORIZED_LABEL};
pub use product::{Product, ProductStatus};
pub use sale::{Sale, SaleItemType};

mod expense;
mod product;
mod sale;

/// Alias for the type the backend uses for record IDs.
pub type RecordId = String;
