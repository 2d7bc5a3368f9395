//! Typed element storage backing a Series
//!
//! Each backend stores a value plus an NA flag and applies its own coercion
//! rules when a `Value` is written into it.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::value::{SeriesType, Value};

/// A single stored cell of a known type
pub trait Element: Debug + Clone + Default + PartialEq {
    /// Series type this element belongs to
    const SERIES_TYPE: SeriesType;

    /// Writes `value`, coercing it; values that cannot be coerced become NA
    fn set(&mut self, value: &Value);

    /// Reads the stored value, `Value::Null` when NA
    fn get(&self) -> Value;

    fn is_na(&self) -> bool;

    fn from_value(value: &Value) -> Self {
        let mut element = Self::default();
        element.set(value);
        element
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntElement {
    value: i64,
    na: bool,
}

impl Element for IntElement {
    const SERIES_TYPE: SeriesType = SeriesType::Int;

    fn set(&mut self, value: &Value) {
        let coerced = match value {
            Value::Int(v) => Some(*v),
            Value::Boolean(v) => Some(i64::from(*v)),
            // truncates; NaN, infinities and out-of-range floats give None
            Value::Float(v) => num_traits::cast::<f64, i64>(*v),
            Value::String(_) | Value::Null => None,
        };
        match coerced {
            Some(v) => {
                self.value = v;
                self.na = false;
            }
            None => self.na = true,
        }
    }

    fn get(&self) -> Value {
        if self.na {
            Value::Null
        } else {
            Value::Int(self.value)
        }
    }

    fn is_na(&self) -> bool {
        self.na
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatElement {
    value: f64,
    na: bool,
}

impl Element for FloatElement {
    const SERIES_TYPE: SeriesType = SeriesType::Float;

    fn set(&mut self, value: &Value) {
        let coerced = match value {
            Value::Float(v) if v.is_finite() => Some(*v),
            Value::Float(_) => None,
            Value::Int(v) => Some(*v as f64),
            Value::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::String(_) | Value::Null => None,
        };
        match coerced {
            Some(v) => {
                self.value = v;
                self.na = false;
            }
            None => self.na = true,
        }
    }

    fn get(&self) -> Value {
        if self.na {
            Value::Null
        } else {
            Value::Float(self.value)
        }
    }

    fn is_na(&self) -> bool {
        self.na
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanElement {
    value: bool,
    na: bool,
}

impl Element for BooleanElement {
    const SERIES_TYPE: SeriesType = SeriesType::Boolean;

    fn set(&mut self, value: &Value) {
        let coerced = match value {
            Value::Int(v) => Some(*v != 0),
            Value::Boolean(v) => Some(*v),
            Value::Float(v) if v.is_finite() => Some(*v != 0.0),
            Value::Float(_) => None,
            Value::String(_) | Value::Null => None,
        };
        match coerced {
            Some(v) => {
                self.value = v;
                self.na = false;
            }
            None => self.na = true,
        }
    }

    fn get(&self) -> Value {
        if self.na {
            Value::Null
        } else {
            Value::Boolean(self.value)
        }
    }

    fn is_na(&self) -> bool {
        self.na
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringElement {
    value: String,
    na: bool,
}

impl Element for StringElement {
    const SERIES_TYPE: SeriesType = SeriesType::String;

    fn set(&mut self, value: &Value) {
        let coerced = match value {
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(format!("{:.6}", v)),
            Value::Boolean(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::Null => None,
        };
        match coerced {
            Some(v) => {
                self.value = v;
                self.na = false;
            }
            None => self.na = true,
        }
    }

    fn get(&self) -> Value {
        if self.na {
            Value::Null
        } else {
            Value::String(self.value.clone())
        }
    }

    fn is_na(&self) -> bool {
        self.na
    }
}

/// Homogeneous storage for one Series
#[derive(Debug, Clone, PartialEq)]
pub enum Elements {
    Int(Vec<IntElement>),
    Float(Vec<FloatElement>),
    Boolean(Vec<BooleanElement>),
    String(Vec<StringElement>),
}

macro_rules! dispatch {
    ($elements:expr, $v:ident => $body:expr) => {
        match $elements {
            Elements::Int($v) => $body,
            Elements::Float($v) => $body,
            Elements::Boolean($v) => $body,
            Elements::String($v) => $body,
        }
    };
}

impl Elements {
    /// Allocates `len` valid zero elements
    pub fn with_len(series_type: SeriesType, len: usize) -> Self {
        match series_type {
            SeriesType::Int => Elements::Int(vec![IntElement::default(); len]),
            SeriesType::Float => Elements::Float(vec![FloatElement::default(); len]),
            SeriesType::Boolean => Elements::Boolean(vec![BooleanElement::default(); len]),
            SeriesType::String => Elements::String(vec![StringElement::default(); len]),
        }
    }

    /// Builds storage by coercing every value
    pub fn from_values<'a, I>(series_type: SeriesType, values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let values = values.into_iter();
        match series_type {
            SeriesType::Int => Elements::Int(values.map(IntElement::from_value).collect()),
            SeriesType::Float => Elements::Float(values.map(FloatElement::from_value).collect()),
            SeriesType::Boolean => {
                Elements::Boolean(values.map(BooleanElement::from_value).collect())
            }
            SeriesType::String => Elements::String(values.map(StringElement::from_value).collect()),
        }
    }

    pub fn series_type(&self) -> SeriesType {
        match self {
            Elements::Int(_) => IntElement::SERIES_TYPE,
            Elements::Float(_) => FloatElement::SERIES_TYPE,
            Elements::Boolean(_) => BooleanElement::SERIES_TYPE,
            Elements::String(_) => StringElement::SERIES_TYPE,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `i`, `None` when out of range
    pub fn get(&self, i: usize) -> Option<Value> {
        dispatch!(self, v => v.get(i).map(Element::get))
    }

    /// Coerces `value` into slot `i`; returns whether the slot is now NA
    pub fn set(&mut self, i: usize, value: &Value) -> Option<bool> {
        dispatch!(self, v => v.get_mut(i).map(|e| {
            e.set(value);
            e.is_na()
        }))
    }

    pub fn is_na(&self, i: usize) -> bool {
        dispatch!(self, v => v.get(i).map_or(false, Element::is_na))
    }

    /// Appends one coerced value; returns whether it became NA
    pub fn push(&mut self, value: &Value) -> bool {
        dispatch!(self, v => {
            v.push(Element::from_value(value));
            v.last().map_or(false, Element::is_na)
        })
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        dispatch!(self, v => v.swap(a, b))
    }

    /// New storage holding the elements at `positions`, in that order
    pub fn take(&self, positions: &[usize]) -> Self {
        match self {
            Elements::Int(v) => Elements::Int(positions.iter().map(|&p| v[p].clone()).collect()),
            Elements::Float(v) => {
                Elements::Float(positions.iter().map(|&p| v[p].clone()).collect())
            }
            Elements::Boolean(v) => {
                Elements::Boolean(positions.iter().map(|&p| v[p].clone()).collect())
            }
            Elements::String(v) => {
                Elements::String(positions.iter().map(|&p| v[p].clone()).collect())
            }
        }
    }

    /// Compares the stored values at `a` and `b`, ignoring NA flags
    pub fn cmp_values(&self, a: usize, b: usize) -> Ordering {
        match self {
            Elements::Int(v) => v[a].value.cmp(&v[b].value),
            Elements::Float(v) => v[a]
                .value
                .partial_cmp(&v[b].value)
                .unwrap_or(Ordering::Equal),
            Elements::Boolean(v) => v[a].value.cmp(&v[b].value),
            Elements::String(v) => v[a].value.cmp(&v[b].value),
        }
    }
}
