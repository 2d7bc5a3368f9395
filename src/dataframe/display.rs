//! Plain-text table rendering
//!
//! Columns are right-aligned and separated by two spaces. The unlabelled
//! index column comes first; the header row holds the column names.

use std::fmt::{self, Display, Write};

use crate::series::Series;

use super::DataFrame;

const SEPARATOR: &str = "  ";

/// Column widths for one rendering pass
pub(crate) struct TableLayout<'a> {
    index: &'a Series,
    columns: Vec<&'a Series>,
    index_width: usize,
    widths: Vec<usize>,
}

impl<'a> TableLayout<'a> {
    pub(crate) fn new(index: &'a Series, columns: Vec<&'a Series>) -> Self {
        let index_width = (0..index.len())
            .map(|i| cell(index, i).chars().count())
            .max()
            .unwrap_or(0);
        let widths = columns
            .iter()
            .map(|column| {
                (0..column.len())
                    .map(|i| cell(column, i).chars().count())
                    .fold(column.name().chars().count(), usize::max)
            })
            .collect();
        TableLayout {
            index,
            columns,
            index_width,
            widths,
        }
    }

    /// Header line, followed by a newline
    pub(crate) fn write_header<W: Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str(&" ".repeat(self.index_width))?;
        out.write_str(SEPARATOR)?;
        let names = self.columns.iter().map(|c| c.name().to_string());
        self.write_cells(out, names)?;
        out.write_char('\n')
    }

    /// One data line without a trailing newline; the first `blank` columns are left empty
    pub(crate) fn write_row<W: Write>(&self, out: &mut W, row: usize, blank: usize) -> fmt::Result {
        write!(out, "{:>width$}", cell(self.index, row), width = self.index_width)?;
        out.write_str(SEPARATOR)?;
        let cells = self.columns.iter().enumerate().map(|(j, column)| {
            if j < blank {
                String::new()
            } else {
                cell(column, row)
            }
        });
        self.write_cells(out, cells)
    }

    fn write_cells<W, I>(&self, out: &mut W, cells: I) -> fmt::Result
    where
        W: Write,
        I: Iterator<Item = String>,
    {
        for (j, (text, &width)) in cells.zip(&self.widths).enumerate() {
            if j > 0 {
                out.write_str(SEPARATOR)?;
            }
            write!(out, "{:>width$}", text, width = width)?;
        }
        Ok(())
    }
}

fn cell(series: &Series, row: usize) -> String {
    series.value_at(row).to_string()
}

impl Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = TableLayout::new(&self.index, self.columns.iter().collect());
        layout.write_header(f)?;
        for i in 0..self.nrows {
            if i > 0 {
                f.write_char('\n')?;
            }
            layout.write_row(f, i, 0)?;
        }
        Ok(())
    }
}
