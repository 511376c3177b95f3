//! Dashboard settings owned by the caller.
//!
//! Settings that must survive between runs (e.g., the sales goal) live in a
//! JSON file chosen by the caller rather than in process-wide state.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::Error;

/// The default timezone of the shop.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Settings for building the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// The canonical timezone name that defines the local calendar.
    pub timezone: String,
    /// The revenue goal for the selected period.
    pub sales_goal: f64,
    /// How many of the newest sales and expenses to list.
    pub recent_limit: usize,
    /// How many products to show in the best-sellers ranking.
    pub top_products_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_owned(),
            sales_goal: 10000.0,
            recent_limit: 15,
            top_products_limit: 5,
        }
    }
}

impl DashboardConfig {
    /// Load settings from a JSON file. Missing fields take their default value.
    ///
    /// # Errors
    /// Returns [Error::Io] if the file cannot be read and [Error::InvalidJson]
    /// if it is not a JSON object of known settings.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|error| Error::InvalidJson(path.to_owned(), error))
    }
}
