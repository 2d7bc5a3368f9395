use crate::error::Result;

use super::row::{Row, RowMut};
use super::DataFrame;

impl DataFrame {
    /// Keeps the rows for which `predicate` holds, in their original order
    ///
    /// The result gets a fresh `0..n` index.
    pub fn filter<F>(&self, predicate: F) -> DataFrame
    where
        F: Fn(&Row<'_>) -> bool,
    {
        let positions: Vec<usize> = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.position())
            .collect();
        let mut filtered = self.take_rows(&positions);
        filtered.reset_index();
        log::debug!("filter kept {} of {} rows", filtered.nrows, self.nrows);
        filtered
    }

    /// Calls `f` once per row, in order, with a mutable row view
    ///
    /// Stops at the first error `f` returns; rows visited before it keep their edits.
    pub fn apply<F>(&mut self, mut f: F) -> Result<&mut Self>
    where
        F: FnMut(&mut RowMut<'_>) -> Result<()>,
    {
        for i in 0..self.nrows {
            let mut row = self.row_mut(i)?;
            f(&mut row)?;
        }
        Ok(self)
    }

    /// New DataFrame without the rows holding a null in any column
    ///
    /// Index labels of the kept rows are preserved.
    pub fn drop_na(&self) -> DataFrame {
        let positions: Vec<usize> = (0..self.nrows)
            .filter(|&i| self.columns.iter().all(|s| s.is_valid(i)))
            .collect();
        self.take_rows(&positions)
    }
}
