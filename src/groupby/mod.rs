use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display, Write};

use crate::dataframe::display::TableLayout;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// Separator between key values in a group's display key
pub const KEY_SEPARATOR: &str = "|~|";

/// Rows of a DataFrame partitioned by the values of one or more key columns
///
/// Groups keep the order in which their key first appears in the source.
/// Keys are compared structurally; the joined display key is only used for
/// naming groups.
#[derive(Debug)]
pub struct GroupBy<'a> {
    source: &'a DataFrame,
    keys: Vec<String>,
    groups: HashMap<Vec<Value>, Vec<usize>>,
    order: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Groups rows by the values of the given columns
    pub fn group_by(&self, keys: &[&str]) -> Result<GroupBy<'_>> {
        if keys.is_empty() {
            return Err(Error::InvalidInput(
                "no group by keys specified".to_string(),
            ));
        }
        let key_columns = keys
            .iter()
            .map(|&k| self.column(k))
            .collect::<Result<Vec<_>>>()?;

        let mut groups: HashMap<Vec<Value>, Vec<usize>> = HashMap::new();
        let mut order = Vec::new();
        for row in 0..self.nrows() {
            let key: Vec<Value> = key_columns.iter().map(|c| c.value_at(row)).collect();
            groups
                .entry(key)
                .or_insert_with_key(|key| {
                    order.push(key.clone());
                    Vec::new()
                })
                .push(row);
        }
        log::debug!("group_by {:?}: {} groups", keys, order.len());

        Ok(GroupBy {
            source: self,
            keys: keys.iter().map(|k| k.to_string()).collect(),
            groups,
            order,
        })
    }
}

impl<'a> GroupBy<'a> {
    /// Names of the key columns
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Display keys of every group, in first-seen order
    pub fn group_keys(&self) -> Vec<String> {
        self.order.iter().map(|key| display_key(key)).collect()
    }

    /// Source row positions of every group, in first-seen order
    pub fn indices(&self) -> Vec<(String, Vec<usize>)> {
        self.order
            .iter()
            .map(|key| (display_key(key), self.positions(key).to_vec()))
            .collect()
    }

    /// One DataFrame per group, rows in source order, each with a default index
    pub fn groups(&self) -> Vec<(String, DataFrame)> {
        self.order
            .iter()
            .map(|key| (display_key(key), self.materialize(key)))
            .collect()
    }

    /// The group whose display key is `key`
    pub fn get_group(&self, key: &str) -> Result<DataFrame> {
        self.order
            .iter()
            .find(|k| display_key(k) == key)
            .map(|k| self.materialize(k))
            .ok_or_else(|| Error::InvalidInput(format!("group not found: {}", key)))
    }

    /// Applies `agg` to every group and stacks the single-row results
    ///
    /// `agg` must return at most one row. Groups for which it returns no rows
    /// are skipped. The output gets a default index.
    pub fn aggregate<F>(&self, mut agg: F) -> Result<DataFrame>
    where
        F: FnMut(&DataFrame) -> Result<DataFrame>,
    {
        let mut out: Option<DataFrame> = None;
        for key in &self.order {
            let group = self.materialize(key);
            let result = agg(&group)?;
            match result.nrows() {
                0 => {
                    log::warn!(
                        "aggregate returned no rows for group {}, skipping it",
                        display_key(key)
                    );
                    continue;
                }
                1 => {}
                n => {
                    return Err(Error::InvalidOperation(format!(
                        "aggregate must return a single row, group {} returned {}",
                        display_key(key),
                        n
                    )))
                }
            }
            match out.as_mut() {
                None => out = Some(result),
                Some(acc) => append_row(acc, &result)?,
            }
        }
        let mut out = out.ok_or_else(|| {
            Error::EmptyData("aggregate produced no rows".to_string())
        })?;
        out.reset_index();
        Ok(out)
    }

    fn positions(&self, key: &[Value]) -> &[usize] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn materialize(&self, key: &[Value]) -> DataFrame {
        let mut group = self.source.take_rows(self.positions(key));
        group.reset_index();
        group
    }
}

// Appends the single row of `row` to `acc`, column by column
fn append_row(acc: &mut DataFrame, row: &DataFrame) -> Result<()> {
    if row.ncols() != acc.ncols() {
        return Err(Error::LengthMismatch {
            expected: acc.ncols(),
            actual: row.ncols(),
        });
    }
    for (target, source) in acc.columns.iter_mut().zip(&row.columns) {
        target.append(source.value_at(0));
    }
    acc.nrows += 1;
    acc.index.append(Value::Int(acc.nrows as i64 - 1));
    Ok(())
}

fn display_key(key: &[Value]) -> String {
    key.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

// Key columns first, then the rest; repeated key values inside a group are left blank
impl Display for GroupBy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source;
        if source.nrows() == 0 || source.ncols() == 0 {
            return Ok(());
        }
        let key_set: HashSet<&str> = self.keys.iter().map(String::as_str).collect();
        let mut columns: Vec<_> = self
            .keys
            .iter()
            .filter_map(|k| source.column(k).ok())
            .collect();
        let nkeys = columns.len();
        columns.extend(
            source
                .columns()
                .iter()
                .filter(|c| !key_set.contains(c.name())),
        );

        let layout = TableLayout::new(source.index(), columns);
        layout.write_header(f)?;
        let mut first = true;
        for key in &self.order {
            for (i, &row) in self.positions(key).iter().enumerate() {
                if !first {
                    f.write_char('\n')?;
                }
                first = false;
                layout.write_row(f, row, if i > 0 { nkeys } else { 0 })?;
            }
        }
        Ok(())
    }
}
