pub mod element;
mod sort;
mod stats;
pub mod validity;

use std::fmt::{self, Display};

use crate::error::{Error, Result};
use crate::value::{SeriesType, Value};

pub use self::element::{
    BooleanElement, Element, Elements, FloatElement, IntElement, StringElement,
};
pub(crate) use self::sort::{apply_permutation, merge_sort_indices, validate_permutation};
pub use self::validity::Bitset;

/// A named, typed, nullable column
///
/// Storage is homogeneous. The validity bitset is only allocated once some
/// element becomes NA; while it is `None` every element is valid.
#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    elements: Elements,
    validity: Option<Bitset>,
}

impl Series {
    /// Creates a Series by coercing every value into `series_type`
    ///
    /// Values that cannot be coerced are stored as NA.
    pub fn new<I, V>(values: I, series_type: SeriesType, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let mut series = Series {
            name: name.into(),
            elements: Elements::from_values(series_type, &values),
            validity: None,
        };
        series.detect_validity();
        series
    }

    /// Creates a Series with an explicit validity mask (`false` marks NA)
    pub fn with_validity<I, V>(
        values: I,
        mask: &[bool],
        series_type: SeriesType,
        name: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut series = Series::new(values, series_type, name);
        if mask.len() != series.len() {
            return Err(Error::LengthMismatch {
                expected: series.len(),
                actual: mask.len(),
            });
        }
        let mut bitset = Bitset::new(series.len());
        for (i, &valid) in mask.iter().enumerate() {
            if !valid || series.elements.is_na(i) {
                series.elements.set(i, &Value::Null);
                bitset.clear(i)?;
            }
        }
        series.validity = Some(bitset);
        Ok(series)
    }

    /// Creates a Series of `size` zero values
    pub fn new_empty(series_type: SeriesType, size: usize, name: impl Into<String>) -> Self {
        Series {
            name: name.into(),
            elements: Elements::with_len(series_type, size),
            validity: None,
        }
    }

    /// Creates an Int Series holding `start..end`
    pub fn new_range(start: i64, end: i64, name: impl Into<String>) -> Self {
        Series::new(start..end.max(start), SeriesType::Int, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn series_type(&self) -> SeriesType {
        self.elements.series_type()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Value at position `i`, `Value::Null` for NA slots
    pub fn get(&self, i: usize) -> Result<Value> {
        if i >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.len(),
            });
        }
        Ok(self.value_at(i))
    }

    /// Writes `value` at position `i` using the column's coercion rules
    pub fn set(&mut self, i: usize, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let became_na = self
            .elements
            .set(i, &value)
            .ok_or(Error::IndexOutOfBounds {
                index: i,
                size: self.len(),
            })?;
        if let Some(bitset) = self.validity.as_mut() {
            if became_na {
                bitset.clear(i)?;
            } else {
                bitset.set(i)?;
            }
        } else if became_na {
            self.detect_validity();
        }
        Ok(())
    }

    /// All values in order, `Value::Null` for NA slots
    pub fn values(&self) -> Vec<Value> {
        (0..self.len()).map(|i| self.value_at(i)).collect()
    }

    /// Deep copy; storage and bitset are never shared
    pub fn copy(&self) -> Series {
        self.clone()
    }

    /// Copy that optionally zeroes every value while keeping the validity mask
    pub fn copy_with_validity(&self, copy_values: bool) -> Series {
        if copy_values {
            return self.clone();
        }
        let mut elements = Elements::with_len(self.series_type(), self.len());
        for i in 0..self.len() {
            if self.is_null(i) {
                elements.set(i, &Value::Null);
            }
        }
        Series {
            name: self.name.clone(),
            elements,
            validity: self.validity.clone(),
        }
    }

    /// Appends one value using the same coercion rules as `set`
    pub fn append(&mut self, value: impl Into<Value>) {
        let became_na = self.elements.push(&value.into());
        let len = self.len();
        if let Some(bitset) = self.validity.as_mut() {
            bitset.ensure_capacity(len);
            if became_na {
                // len - 1 is in range after ensure_capacity
                let _ = bitset.clear(len - 1);
            }
        } else if became_na {
            self.detect_validity();
        }
    }

    /// New Series over rows `[start, end)`
    pub fn slice(&self, start: usize, end: usize) -> Result<Series> {
        if end > self.len() || start > end {
            return Err(Error::SliceBounds {
                start,
                end,
                len: self.len(),
            });
        }
        let positions: Vec<usize> = (start..end).collect();
        let mut sliced = Series {
            name: self.name.clone(),
            elements: self.elements.take(&positions),
            validity: None,
        };
        match &self.validity {
            Some(bitset) => {
                let bits: Vec<bool> = positions.iter().map(|&p| bitset.get(p)).collect();
                sliced.validity = Some(Bitset::from_bools(&bits));
            }
            None => sliced.detect_validity(),
        }
        Ok(sliced)
    }

    /// First `n` values
    pub fn head(&self, n: usize) -> Result<Series> {
        self.slice(0, n)
    }

    /// Last `n` values
    pub fn tail(&self, n: usize) -> Result<Series> {
        if n > self.len() {
            return Err(Error::SliceBounds {
                start: 0,
                end: n,
                len: self.len(),
            });
        }
        self.slice(self.len() - n, self.len())
    }

    /// Copy with every NA replaced by `value`
    pub fn fill_na(&self, value: impl Into<Value>) -> Series {
        let mut filled = self.clone();
        filled.mut_fill_na(value);
        filled
    }

    /// Replaces every NA with `value` in place
    ///
    /// A slot stays NA if `value` cannot be coerced into the column type.
    pub fn mut_fill_na(&mut self, value: impl Into<Value>) {
        let value = value.into();
        for i in 0..self.len() {
            if self.is_null(i) {
                // i < len, the write cannot go out of range
                let _ = self.set(i, value.clone());
            }
        }
    }

    /// New Series holding only the valid values, in order
    pub fn drop_na(&self) -> Series {
        let positions: Vec<usize> = (0..self.len()).filter(|&i| self.is_valid(i)).collect();
        self.take(&positions)
    }

    /// Sorts ascending in place; stable, NA values last
    pub fn sort(&mut self) {
        let positions = self.sorted_index();
        apply_permutation(&positions, |a, b| self.swap_unchecked(a, b));
    }

    /// Positions that would sort the Series ascending (stable, NA last)
    pub fn sorted_index(&self) -> Vec<usize> {
        merge_sort_indices(self.len(), |a, b| self.less(a, b))
    }

    /// Reorders in place so position `p` receives the value previously at `positions[p]`
    pub fn order(&mut self, positions: &[usize]) -> Result<()> {
        validate_permutation(positions, self.len())?;
        apply_permutation(positions, |a, b| self.swap_unchecked(a, b));
        Ok(())
    }

    /// Swaps the values (and validity) at two positions
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        for i in [a, b] {
            if i >= self.len() {
                return Err(Error::IndexOutOfBounds {
                    index: i,
                    size: self.len(),
                });
            }
        }
        self.swap_unchecked(a, b);
        Ok(())
    }

    /// `true` for NA slots and for positions past the end
    pub fn is_null(&self, i: usize) -> bool {
        if i >= self.len() {
            return true;
        }
        match &self.validity {
            Some(bitset) => !bitset.get(i),
            None => self.elements.is_na(i),
        }
    }

    pub fn is_valid(&self, i: usize) -> bool {
        !self.is_null(i)
    }

    pub fn count_nulls(&self) -> usize {
        match &self.validity {
            Some(bitset) => self.len() - bitset.count(),
            None => (0..self.len()).filter(|&i| self.elements.is_na(i)).count(),
        }
    }

    pub fn any_null(&self) -> bool {
        self.count_nulls() > 0
    }

    /// `true` at every NA position
    pub fn null_mask(&self) -> Vec<bool> {
        (0..self.len()).map(|i| self.is_null(i)).collect()
    }

    /// The validity bitset, `None` when every value is valid
    pub fn validity(&self) -> Option<&Bitset> {
        self.validity.as_ref()
    }

    /// Int, Float and Boolean Series are numeric
    pub fn is_numeric(&self) -> bool {
        self.series_type().is_numeric()
    }

    pub fn is_object(&self) -> bool {
        !self.is_numeric()
    }

    /// New Series holding the values at `positions`, in that order
    pub(crate) fn take(&self, positions: &[usize]) -> Series {
        let mut taken = Series {
            name: self.name.clone(),
            elements: self.elements.take(positions),
            validity: None,
        };
        if let Some(bitset) = &self.validity {
            let bits: Vec<bool> = positions.iter().map(|&p| bitset.get(p)).collect();
            if bits.iter().any(|valid| !valid) {
                taken.validity = Some(Bitset::from_bools(&bits));
            }
        } else {
            taken.detect_validity();
        }
        taken
    }

    pub(crate) fn value_at(&self, i: usize) -> Value {
        if self.is_null(i) {
            return Value::Null;
        }
        self.elements.get(i).unwrap_or(Value::Null)
    }

    pub(crate) fn swap_unchecked(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.elements.swap(a, b);
        if let Some(bitset) = self.validity.as_mut() {
            let (va, vb) = (bitset.get(a), bitset.get(b));
            if va != vb {
                let _ = if vb { bitset.set(a) } else { bitset.clear(a) };
                let _ = if va { bitset.set(b) } else { bitset.clear(b) };
            }
        }
    }

    /// NA sorts after every value; two NAs compare equal
    pub(crate) fn less(&self, a: usize, b: usize) -> bool {
        match (self.is_null(a), self.is_null(b)) {
            (true, _) => false,
            (false, true) => true,
            (false, false) => self.elements.cmp_values(a, b) == std::cmp::Ordering::Less,
        }
    }

    /// Allocates a bitset if any element is NA
    fn detect_validity(&mut self) {
        let bits: Vec<bool> = (0..self.len()).map(|i| !self.elements.is_na(i)).collect();
        if bits.iter().any(|valid| !valid) {
            self.validity = Some(Bitset::from_bools(&bits));
        }
    }
}

// Logical equality: an all-valid bitset equals no bitset
impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.series_type() == other.series_type()
            && self.values() == other.values()
            && self.null_mask() == other.null_mask()
    }
}

impl Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values().iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "{{{} [{}] {}}}",
            self.name,
            values.join(" "),
            self.series_type()
        )
    }
}
