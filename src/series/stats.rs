//! Descriptive statistics and value counting for Series

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::value::Value;

use super::Series;

impl Series {
    /// Arithmetic mean of the valid values; booleans count as 0/1
    ///
    /// Returns NaN when there are no valid values.
    pub fn mean(&self) -> Result<f64> {
        if !self.is_numeric() {
            return Err(Error::InvalidOperation(format!(
                "mean is only supported for numeric types, column {} is {}",
                self.name(),
                self.series_type()
            )));
        }
        let (sum, count) = (0..self.len())
            .filter_map(|i| self.value_at(i).to_f64())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        Ok(sum / count as f64)
    }

    /// Nearest-rank quantile: the value at `floor(q * len)` of a sorted copy
    ///
    /// NA values sort last, so a rank that lands on them returns `Value::Null`.
    pub fn quantile(&self, q: f64) -> Result<Value> {
        if !self.is_numeric() {
            return Err(Error::InvalidOperation(format!(
                "quantile is only supported for numeric types, column {} is {}",
                self.name(),
                self.series_type()
            )));
        }
        if !(0.0..=1.0).contains(&q) {
            return Err(Error::InvalidInput(format!(
                "quantile must be between 0 and 1, but got {}",
                q
            )));
        }
        if self.is_empty() {
            return Err(Error::EmptyData(format!(
                "cannot compute quantile of empty series {}",
                self.name()
            )));
        }
        let mut sorted = self.copy();
        sorted.sort();
        let rank = ((self.len() as f64 * q).floor() as usize).min(self.len() - 1);
        Ok(sorted.value_at(rank))
    }

    pub fn median(&self) -> Result<Value> {
        self.quantile(0.5)
    }

    /// One of the most frequent values, `None` for an empty Series
    ///
    /// Ties go to the value seen first.
    pub fn mode(&self) -> Option<Value> {
        let counts = self.value_counts();
        let mut best: Option<(Value, usize)> = None;
        for value in self.values() {
            let count = counts.get(&value).copied().unwrap_or(0);
            match &best {
                Some((_, best_count)) if *best_count >= count => {}
                _ => best = Some((value, count)),
            }
        }
        best.map(|(value, _)| value)
    }

    /// Occurrences of each distinct value; NA is counted under `Value::Null`
    pub fn value_counts(&self) -> HashMap<Value, usize> {
        let mut counts = HashMap::new();
        for value in self.values() {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Number of positions holding `value`
    pub fn count(&self, value: &Value) -> usize {
        (0..self.len()).filter(|&i| &self.value_at(i) == value).count()
    }

    /// Number of distinct values (NA counts as one value)
    pub fn n_unique(&self) -> usize {
        self.values().into_iter().collect::<HashSet<_>>().len()
    }

    /// True if no value occurs twice
    pub fn unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.values().into_iter().all(|v| seen.insert(v))
    }

    /// True if every value equals the first one
    pub fn homogeneous(&self) -> Result<bool> {
        if self.is_empty() {
            return Err(Error::EmptyData(
                "cannot check homogeneity of an empty series".to_string(),
            ));
        }
        let first = self.value_at(0);
        Ok((1..self.len()).all(|i| self.value_at(i) == first))
    }
}
