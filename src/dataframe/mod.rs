// DataFrame implementations module
pub mod apply;
pub(crate) mod display;
pub mod join;
pub mod row;

use crate::error::{Error, Result};
use crate::series::{apply_permutation, validate_permutation, Series};
use crate::value::Value;

// Re-exports for convenience
pub use join::{JoinKey, JoinType};
pub use row::{Row, RowMut};

/// Number of rows used by `head`/`tail` previews when the caller has no preference
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Name given to the default integer range index
pub const DEFAULT_INDEX_NAME: &str = "Index";

/// A two-dimensional table: an ordered set of equal-length Series plus a row index
///
/// Column names are not required to be unique; lookups by name return the
/// first match.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    pub(crate) index: Series,
    pub(crate) columns: Vec<Series>,
    pub(crate) nrows: usize,
}

impl DataFrame {
    /// Creates a DataFrame from one or more columns of equal length
    ///
    /// The index defaults to the integer range `0..nrows`.
    pub fn new(columns: Vec<Series>) -> Result<Self> {
        let nrows = match columns.first() {
            Some(first) => first.len(),
            None => {
                return Err(Error::EmptyData(
                    "a DataFrame needs at least one column".to_string(),
                ))
            }
        };
        if let Some(bad) = columns.iter().find(|s| s.len() != nrows) {
            return Err(Error::InconsistentRowCount {
                expected: nrows,
                found: bad.len(),
            });
        }
        Ok(DataFrame {
            index: range_index(nrows),
            columns,
            nrows,
        })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    /// Position of the first column called `name`
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|s| s.name() == name)
    }

    /// First column called `name`
    pub fn column(&self, name: &str) -> Result<&Series> {
        self.columns
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Mutable access to the first column called `name`
    ///
    /// The column's length must not be changed through this reference.
    pub fn column_mut(&mut self, name: &str) -> Result<&mut Series> {
        self.columns
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    pub fn index(&self) -> &Series {
        &self.index
    }

    /// Replaces the index with a copy of `index`
    pub fn set_index(&mut self, index: Series) -> Result<()> {
        if index.len() != self.nrows {
            return Err(Error::LengthMismatch {
                expected: self.nrows,
                actual: index.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Restores the default `0..nrows` index
    pub fn reset_index(&mut self) {
        self.index = range_index(self.nrows);
    }

    /// New DataFrame with rows `[start, end)`, index included
    pub fn slice(&self, start: usize, end: usize) -> Result<DataFrame> {
        if end > self.nrows || start > end {
            return Err(Error::SliceBounds {
                start,
                end,
                len: self.nrows,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|s| s.slice(start, end))
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame {
            index: self.index.slice(start, end)?,
            columns,
            nrows: end - start,
        })
    }

    /// First `n` rows (see `DEFAULT_PREVIEW_ROWS`)
    pub fn head(&self, n: usize) -> Result<DataFrame> {
        self.slice(0, n)
    }

    /// Last `n` rows (see `DEFAULT_PREVIEW_ROWS`)
    pub fn tail(&self, n: usize) -> Result<DataFrame> {
        if n > self.nrows {
            return Err(Error::SliceBounds {
                start: 0,
                end: n,
                len: self.nrows,
            });
        }
        self.slice(self.nrows - n, self.nrows)
    }

    /// Cell at row `i`, column position `j`
    pub fn at(&self, i: usize, j: usize) -> Result<Value> {
        if i >= self.nrows {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.nrows,
            });
        }
        let column = self.columns.get(j).ok_or(Error::IndexOutOfBounds {
            index: j,
            size: self.columns.len(),
        })?;
        column.get(i)
    }

    /// Swaps two rows in place, index included
    pub fn swap(&mut self, row1: usize, row2: usize) -> Result<()> {
        self.index.swap(row1, row2)?;
        for column in &mut self.columns {
            column.swap(row1, row2)?;
        }
        Ok(())
    }

    /// Sorts rows in place by a single column
    ///
    /// Adjacent rows are compared and swapped pass by pass, so equal keys keep
    /// their relative order and NA keys end up last.
    pub fn sort(&mut self, columns: &[&str]) -> Result<()> {
        let key = match columns {
            [] => {
                return Err(Error::InvalidInput(
                    "no sort columns specified".to_string(),
                ))
            }
            [key] => *key,
            _ => {
                return Err(Error::NotImplemented(
                    "sorting by more than one column".to_string(),
                ))
            }
        };
        let position = self
            .column_position(key)
            .ok_or_else(|| Error::ColumnNotFound(key.to_string()))?;

        for pass in 0..self.nrows {
            let mut swapped = false;
            for j in 0..self.nrows - pass - 1 {
                if self.columns[position].less(j + 1, j) {
                    self.swap_unchecked(j, j + 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
        Ok(())
    }

    /// Reorders rows in place so row `p` receives the row previously at `positions[p]`
    pub fn order(&mut self, positions: &[usize]) -> Result<()> {
        validate_permutation(positions, self.nrows)?;
        apply_permutation(positions, |a, b| self.swap_unchecked(a, b));
        Ok(())
    }

    /// Adds a column on the right
    pub fn append(&mut self, column: Series) -> Result<()> {
        if column.len() != self.nrows {
            return Err(Error::LengthMismatch {
                expected: self.nrows,
                actual: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Removes and returns the first column called `name`
    pub fn drop(&mut self, name: &str) -> Result<Series> {
        let position = self
            .column_position(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        Ok(self.columns.remove(position))
    }

    /// Deep copy
    pub fn copy(&self) -> DataFrame {
        self.clone()
    }

    /// Names of Int, Float and Boolean columns
    pub fn select_numeric_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|s| s.is_numeric())
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Names of String columns
    pub fn select_object_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|s| s.is_object())
            .map(|s| s.name().to_string())
            .collect()
    }

    /// New DataFrame holding the rows at `positions`, index labels kept
    pub(crate) fn take_rows(&self, positions: &[usize]) -> DataFrame {
        DataFrame {
            index: self.index.take(positions),
            columns: self.columns.iter().map(|s| s.take(positions)).collect(),
            nrows: positions.len(),
        }
    }

    fn swap_unchecked(&mut self, a: usize, b: usize) {
        self.index.swap_unchecked(a, b);
        for column in &mut self.columns {
            column.swap_unchecked(a, b);
        }
    }
}

fn range_index(nrows: usize) -> Series {
    Series::new_range(0, nrows as i64, DEFAULT_INDEX_NAME)
}
