//! Loading of backend exports from disk.
//!
//! The backend serves records as JSON arrays; spreadsheets exported as CSV
//! with the same (camelCase) column names are accepted too.

use std::{fs, path::Path};

use serde::de::DeserializeOwned;

use crate::{
    Error,
    models::{Expense, Product, Sale},
};

/// Load sales from a `.json` or `.csv` file.
pub fn load_sales(path: &Path) -> Result<Vec<Sale>, Error> {
    load_records(path)
}

/// Load expenses from a `.json` or `.csv` file.
pub fn load_expenses(path: &Path) -> Result<Vec<Expense>, Error> {
    load_records(path)
}

/// Load catalogue products from a `.json` or `.csv` file.
pub fn load_products(path: &Path) -> Result<Vec<Product>, Error> {
    load_records(path)
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, Error> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_lowercase);

    let parse: fn(&str, &Path) -> Result<Vec<T>, Error> = match extension.as_deref() {
        Some("json") => parse_json,
        Some("csv") => parse_csv,
        _ => return Err(Error::UnsupportedFileType(path.to_owned())),
    };

    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;

    let records = parse(&text, path)?;
    tracing::info!("Loaded {} records from {path:?}", records.len());

    Ok(records)
}

/// Parses a JSON array of records.
pub fn parse_json<T: DeserializeOwned>(text: &str, path: &Path) -> Result<Vec<T>, Error> {
    serde_json::from_str(text).map_err(|error| Error::InvalidJson(path.to_owned(), error))
}

/// Parses CSV records with a header row of field names.
pub fn parse_csv<T: DeserializeOwned>(text: &str, path: &Path) -> Result<Vec<T>, Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|error| Error::InvalidCsv(path.to_owned(), error))
}
