//! Reshaping between long and wide layouts

use std::collections::{HashMap, HashSet};

use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::series::Series;
use crate::value::{SeriesType, Value};

impl DataFrame {
    /// Long-to-wide reshape
    ///
    /// One output row per distinct `index` value and one output column per
    /// distinct `columns` value (named by its text form), both in first-seen
    /// order. When a `(index, columns)` pair occurs more than once the first
    /// value is kept. Missing pairs hold the zero value of the `values` type.
    pub fn pivot(&self, index: &str, columns: &str, values: &str) -> Result<DataFrame> {
        let index_col = self.column(index)?;
        let columns_col = self.column(columns)?;
        let values_col = self.column(values)?;

        let mut row_keys: Vec<Value> = Vec::new();
        let mut row_seen: HashSet<Value> = HashSet::new();
        let mut col_keys: Vec<Value> = Vec::new();
        let mut col_seen: HashSet<Value> = HashSet::new();
        let mut cells: HashMap<(Value, Value), Value> = HashMap::new();
        let mut dropped = 0usize;

        for i in 0..self.nrows() {
            let row_key = index_col.value_at(i);
            let col_key = columns_col.value_at(i);
            if row_seen.insert(row_key.clone()) {
                row_keys.push(row_key.clone());
            }
            if col_seen.insert(col_key.clone()) {
                col_keys.push(col_key.clone());
            }
            let pair = (row_key, col_key);
            if cells.contains_key(&pair) {
                dropped += 1;
            } else {
                cells.insert(pair, values_col.value_at(i));
            }
        }
        if dropped > 0 {
            log::warn!(
                "pivot kept the first value for duplicate ({}, {}) pairs, dropped {}",
                index,
                columns,
                dropped
            );
        }

        let value_type = values_col.series_type();
        let zero = value_type.zero_value();
        let mut output = Vec::with_capacity(col_keys.len() + 1);
        output.push(Series::new(
            row_keys.iter().cloned(),
            index_col.series_type(),
            index,
        ));
        for col_key in &col_keys {
            let column = row_keys.iter().map(|row_key| {
                cells
                    .get(&(row_key.clone(), col_key.clone()))
                    .cloned()
                    .unwrap_or_else(|| zero.clone())
            });
            output.push(Series::new(column, value_type, col_key.to_string()));
        }

        log::debug!(
            "pivot: {} rows x {} value columns",
            row_keys.len(),
            col_keys.len()
        );
        DataFrame::new(output)
    }

    /// Wide-to-long reshape
    ///
    /// For every row and every column not in `id_vars`, emits
    /// `(id values..., column name, value)`. Values that are NA or equal to
    /// their column type's zero value are skipped. The value column keeps the
    /// source type when every melted column shares one, and is a String column
    /// otherwise.
    pub fn unpivot(&self, id_vars: &[&str], var_name: &str, value_name: &str) -> Result<DataFrame> {
        let id_columns = id_vars
            .iter()
            .map(|&name| self.column(name))
            .collect::<Result<Vec<_>>>()?;
        let melted: Vec<&Series> = self
            .columns()
            .iter()
            .filter(|c| !id_vars.contains(&c.name()))
            .collect();

        let value_type = match melted.split_first() {
            Some((first, rest)) if rest.iter().all(|c| c.series_type() == first.series_type()) => {
                first.series_type()
            }
            _ => SeriesType::String,
        };

        let mut id_values: Vec<Vec<Value>> = vec![Vec::new(); id_columns.len()];
        let mut var_values: Vec<Value> = Vec::new();
        let mut value_values: Vec<Value> = Vec::new();
        for i in 0..self.nrows() {
            for column in &melted {
                let value = column.value_at(i);
                if value.is_null() || value == column.series_type().zero_value() {
                    continue;
                }
                for (ids, id_column) in id_values.iter_mut().zip(&id_columns) {
                    ids.push(id_column.value_at(i));
                }
                var_values.push(Value::from(column.name()));
                value_values.push(value);
            }
        }

        let mut output: Vec<Series> = id_values
            .into_iter()
            .zip(&id_columns)
            .map(|(values, column)| Series::new(values, column.series_type(), column.name()))
            .collect();
        output.push(Series::new(var_values, SeriesType::String, var_name));
        output.push(Series::new(value_values, value_type, value_name));

        let result = DataFrame::new(output)?;
        log::debug!("unpivot: {} rows", result.nrows());
        Ok(result)
    }
}
