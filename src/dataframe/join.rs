use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::Value;

use super::DataFrame;

/// Suffix appended to right-hand column names that collide with a left-hand name
pub const RIGHT_SUFFIX: &str = "_y";

/// Join mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Only keys present on both sides
    Inner,
    /// Every left row, matched right rows where available
    Left,
    /// Every right row, matched left rows where available
    Right,
    /// Every row from both sides
    Full,
}

/// What a side of a join is keyed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinKey {
    /// A column, looked up by name (first match)
    Column(String),
    /// The row index
    Index,
}

impl JoinKey {
    pub fn column(name: impl Into<String>) -> Self {
        JoinKey::Column(name.into())
    }
}

// Key values of one side, plus the position of the key column if there is one
fn key_values(df: &DataFrame, key: &JoinKey) -> Result<(Vec<Value>, Option<usize>)> {
    match key {
        JoinKey::Column(name) => {
            let position = df
                .column_position(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            Ok((df.columns[position].values(), Some(position)))
        }
        JoinKey::Index => Ok((df.index.values(), None)),
    }
}

// Key value -> row positions, plus the distinct keys in first-seen order
fn build_lookup(keys: &[Value]) -> (HashMap<&Value, Vec<usize>>, Vec<&Value>) {
    let mut lookup: HashMap<&Value, Vec<usize>> = HashMap::new();
    let mut order = Vec::new();
    for (row, key) in keys.iter().enumerate() {
        lookup
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(row);
    }
    (lookup, order)
}

impl DataFrame {
    /// Joins two DataFrames
    ///
    /// Output columns are every left column followed by every right column
    /// except the right key column. A right column whose name matches a left
    /// column gets `_y` appended. Cells with no matching row hold the column
    /// type's zero value, not NA. When the left side is keyed on its index the
    /// result is labelled with the join keys, otherwise it gets a default index.
    pub fn join_with(
        &self,
        other: &DataFrame,
        left_key: &JoinKey,
        right_key: &JoinKey,
        join_type: JoinType,
    ) -> Result<DataFrame> {
        let (left_keys, left_key_column) = key_values(self, left_key)?;
        let (right_keys, right_key_column) = key_values(other, right_key)?;
        let (left_lookup, left_order) = build_lookup(&left_keys);
        let (right_lookup, right_order) = build_lookup(&right_keys);

        // (left row, right row); None marks a missing side
        let mut pairs: Vec<(Option<usize>, Option<usize>)> = Vec::new();
        for key in &left_order {
            let left_rows = &left_lookup[*key];
            match right_lookup.get(*key) {
                Some(right_rows) => {
                    for &l in left_rows {
                        for &r in right_rows {
                            pairs.push((Some(l), Some(r)));
                        }
                    }
                }
                None if matches!(join_type, JoinType::Left | JoinType::Full) => {
                    pairs.extend(left_rows.iter().map(|&l| (Some(l), None)));
                }
                None => {}
            }
        }
        if matches!(join_type, JoinType::Right | JoinType::Full) {
            for key in &right_order {
                if left_lookup.contains_key(*key) {
                    continue;
                }
                pairs.extend(right_lookup[*key].iter().map(|&r| (None, Some(r))));
            }
        }

        let mut columns = Vec::with_capacity(self.ncols() + other.ncols());
        let left_names: HashSet<&str> = self.columns.iter().map(Series::name).collect();
        for (j, column) in self.columns.iter().enumerate() {
            let zero = column.series_type().zero_value();
            let values = pairs.iter().map(|&(l, r)| match (l, r) {
                (Some(l), _) => column.value_at(l),
                // right-only rows carry their key in the left key column
                (None, Some(r)) if left_key_column == Some(j) => right_keys[r].clone(),
                _ => zero.clone(),
            });
            columns.push(Series::new(values, column.series_type(), column.name()));
        }
        for (j, column) in other.columns.iter().enumerate() {
            if right_key_column == Some(j) {
                continue;
            }
            let zero = column.series_type().zero_value();
            let values = pairs.iter().map(|&(_, r)| match r {
                Some(r) => column.value_at(r),
                None => zero.clone(),
            });
            let mut name = column.name().to_string();
            if left_names.contains(name.as_str()) {
                name.push_str(RIGHT_SUFFIX);
            }
            columns.push(Series::new(values, column.series_type(), name));
        }

        log::debug!(
            "{:?} join: {} x {} rows -> {} rows",
            join_type,
            self.nrows,
            other.nrows,
            pairs.len()
        );
        let index = match left_key {
            // labels come from whichever side supplied the row
            JoinKey::Index => Series::new(
                pairs.iter().map(|&(l, r)| match (l, r) {
                    (Some(l), _) => left_keys[l].clone(),
                    (None, Some(r)) => right_keys[r].clone(),
                    (None, None) => Value::Null,
                }),
                self.index.series_type(),
                self.index.name(),
            ),
            JoinKey::Column(_) => super::range_index(pairs.len()),
        };
        Ok(DataFrame {
            index,
            nrows: pairs.len(),
            columns,
        })
    }

    /// Inner join on a column present on both sides
    pub fn join(&self, other: &DataFrame, on: &str) -> Result<DataFrame> {
        self.inner_join(other, on)
    }

    pub fn inner_join(&self, other: &DataFrame, on: &str) -> Result<DataFrame> {
        let key = JoinKey::column(on);
        self.join_with(other, &key, &key, JoinType::Inner)
    }

    pub fn left_join(&self, other: &DataFrame, on: &str) -> Result<DataFrame> {
        let key = JoinKey::column(on);
        self.join_with(other, &key, &key, JoinType::Left)
    }

    pub fn right_join(&self, other: &DataFrame, on: &str) -> Result<DataFrame> {
        let key = JoinKey::column(on);
        self.join_with(other, &key, &key, JoinType::Right)
    }

    pub fn full_join(&self, other: &DataFrame, on: &str) -> Result<DataFrame> {
        let key = JoinKey::column(on);
        self.join_with(other, &key, &key, JoinType::Full)
    }

    /// Inner join matching the row indexes of both sides
    pub fn join_on_index(&self, other: &DataFrame) -> Result<DataFrame> {
        self.join_with(other, &JoinKey::Index, &JoinKey::Index, JoinType::Inner)
    }

    pub fn left_join_on_index(&self, other: &DataFrame) -> Result<DataFrame> {
        self.join_with(other, &JoinKey::Index, &JoinKey::Index, JoinType::Left)
    }

    pub fn right_join_on_index(&self, other: &DataFrame) -> Result<DataFrame> {
        self.join_with(other, &JoinKey::Index, &JoinKey::Index, JoinType::Right)
    }

    pub fn full_join_on_index(&self, other: &DataFrame) -> Result<DataFrame> {
        self.join_with(other, &JoinKey::Index, &JoinKey::Index, JoinType::Full)
    }
}
