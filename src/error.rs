//! Defines the crate level error type.
//!
//! Only the outer surfaces of the crate (file loading, configuration and
//! timezone lookup) can fail. Aggregation and summaries never return errors.

use std::path::PathBuf;

/// The errors that may occur while preparing dashboard data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The canonical timezone name (e.g., "America/Sao_Paulo") is not known.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// A date-time given by the user could not be parsed.
    ///
    /// Callers should pass in the original date-time string and the parse
    /// error as a string.
    #[error("could not parse date-time \"{0}\": {1}")]
    InvalidDateTime(String, String),

    /// A file could not be read.
    #[error("could not read {path:?}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A JSON document did not have the expected shape.
    #[error("could not parse the JSON file {0:?}: {1}")]
    InvalidJson(PathBuf, serde_json::Error),

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file {0:?}: {1}")]
    InvalidCsv(PathBuf, csv::Error),

    /// Records can only be loaded from `.json` and `.csv` files.
    #[error("unsupported file type {0:?}, expected a .json or .csv file")]
    UnsupportedFileType(PathBuf),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}
