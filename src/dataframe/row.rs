use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::Value;

use super::DataFrame;

/// Read-only view of one row of a DataFrame
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    parent: &'a DataFrame,
    position: usize,
}

impl<'a> Row<'a> {
    /// Row position inside the parent DataFrame
    pub fn position(&self) -> usize {
        self.position
    }

    /// Value in column position `j`
    pub fn at(&self, j: usize) -> Result<Value> {
        self.parent.at(self.position, j)
    }

    /// Value in the first column called `name`
    pub fn get(&self, name: &str) -> Result<Value> {
        self.parent.column(name)?.get(self.position)
    }

    /// Index label of this row
    pub fn label(&self) -> Value {
        self.parent.index.value_at(self.position)
    }

    /// All cell values, in column order
    pub fn values(&self) -> Vec<Value> {
        self.parent
            .columns
            .iter()
            .map(|s| s.value_at(self.position))
            .collect()
    }

    pub(crate) fn parent(&self) -> &'a DataFrame {
        self.parent
    }
}

/// Mutable view of one row, handed out by `DataFrame::apply`
#[derive(Debug)]
pub struct RowMut<'a> {
    parent: &'a mut DataFrame,
    position: usize,
}

impl<'a> RowMut<'a> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn at(&self, j: usize) -> Result<Value> {
        self.parent.at(self.position, j)
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        self.parent.column(name)?.get(self.position)
    }

    pub fn values(&self) -> Vec<Value> {
        self.as_row().values()
    }

    /// Read-only view of the same row
    pub fn as_row(&self) -> Row<'_> {
        Row {
            parent: &*self.parent,
            position: self.position,
        }
    }

    /// Writes `value` into column `name`
    ///
    /// The value's type must match the column type exactly; no coercion is
    /// attempted and `Value::Null` is rejected.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let position = self.position;
        let column = self.parent.column_mut(name)?;
        check_type(column, &value)?;
        column.set(position, value)
    }

    /// Writes `value` into column position `j`, with the same type check as `set`
    pub fn set_at(&mut self, j: usize, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let position = self.position;
        let ncols = self.parent.ncols();
        let column = self
            .parent
            .columns
            .get_mut(j)
            .ok_or(Error::IndexOutOfBounds {
                index: j,
                size: ncols,
            })?;
        check_type(column, &value)?;
        column.set(position, value)
    }
}

fn check_type(column: &Series, value: &Value) -> Result<()> {
    if value.infer_type() != Some(column.series_type()) {
        let found = match value.infer_type() {
            Some(t) => t.to_string(),
            None => "null".to_string(),
        };
        return Err(Error::TypeMismatch {
            column: column.name().to_string(),
            expected: column.series_type(),
            found,
        });
    }
    Ok(())
}

impl DataFrame {
    /// Read-only view of row `i`
    pub fn row(&self, i: usize) -> Result<Row<'_>> {
        if i >= self.nrows {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.nrows,
            });
        }
        Ok(Row {
            parent: self,
            position: i,
        })
    }

    /// Mutable view of row `i`
    pub fn row_mut(&mut self, i: usize) -> Result<RowMut<'_>> {
        if i >= self.nrows {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.nrows,
            });
        }
        Ok(RowMut {
            parent: self,
            position: i,
        })
    }

    /// Iterator over read-only row views
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.nrows).map(move |position| Row {
            parent: self,
            position,
        })
    }

    /// Builds a new DataFrame from row views of a single parent, in the given order
    ///
    /// Column names and types follow the parent; the result gets a default index.
    pub fn from_rows(rows: &[Row<'_>]) -> Result<DataFrame> {
        let parent = match rows.first() {
            Some(row) => row.parent(),
            None => return Err(Error::EmptyData("no rows to join".to_string())),
        };
        if rows.iter().any(|row| !std::ptr::eq(row.parent(), parent)) {
            return Err(Error::InvalidInput(
                "rows must come from the same DataFrame".to_string(),
            ));
        }
        let positions: Vec<usize> = rows.iter().map(Row::position).collect();
        let mut joined = parent.take_rows(&positions);
        joined.reset_index();
        Ok(joined)
    }
}
