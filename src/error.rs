use thiserror::Error;

use crate::value::SeriesType;

/// Error type for every fallible operation in the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("slice bounds out of range: [{start}, {end}) for length {len}")]
    SliceBounds { start: usize, end: usize, len: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("type mismatch in column {column}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: SeriesType,
        found: String,
    },

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
