//! Typed, nullable columnar data frames
//!
//! A [`Series`] is a named column of one [`SeriesType`] with per-element NA
//! tracking. A [`DataFrame`] is an ordered set of equal-length Series plus a
//! row index, with row views, filtering, joins, pivots and group-by.

#![allow(clippy::needless_lifetimes)]

pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod io;
pub mod pivot;
pub mod series;
pub mod value;

// Re-export commonly used types
pub use dataframe::{DataFrame, JoinKey, JoinType, Row, RowMut};
pub use error::{Error, Result};
pub use groupby::GroupBy;
pub use io::CsvSettings;
pub use series::{Bitset, Series};
pub use value::{SeriesType, Value};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
