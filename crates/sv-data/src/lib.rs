//! Table loading and derivation for the sheet explorer

pub mod reshape;
pub mod sheet_url;
pub mod sources;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use reshape::{long_form, LongRow};
pub use sheet_url::export_url;
pub use sources::SheetTable;

/// Errors that can occur while loading sheet data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("sheet returned HTTP {0} - check the sheet's sharing settings")]
    Http(u16),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}
