//! Simulator parameter values and ordered parameter sets.

use std::fmt::{self, Display};
use std::ops::{Add, Mul};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Numeric value bound to a simulator parameter name.
///
/// Integer and floating values are kept apart so that integral parameters
/// (talent levels, stats) reach the simulator as integer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integral parameter value.
    Int(i64),
    /// Floating point parameter value.
    Float(f64),
}

impl ParamValue {
    /// Returns the value widened to `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Int(value) => value as f64,
            ParamValue::Float(value) => value,
        }
    }

    /// Scales the value by an integral step index.
    pub fn scaled(self, step: u32) -> ParamValue {
        self * ParamValue::Int(i64::from(step))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl Add for ParamValue {
    type Output = ParamValue;

    fn add(self, rhs: ParamValue) -> ParamValue {
        match (self, rhs) {
            (ParamValue::Int(lhs), ParamValue::Int(rhs)) => ParamValue::Int(lhs + rhs),
            (lhs, rhs) => ParamValue::Float(lhs.as_f64() + rhs.as_f64()),
        }
    }
}

impl Mul for ParamValue {
    type Output = ParamValue;

    fn mul(self, rhs: ParamValue) -> ParamValue {
        match (self, rhs) {
            (ParamValue::Int(lhs), ParamValue::Int(rhs)) => ParamValue::Int(lhs * rhs),
            (lhs, rhs) => ParamValue::Float(lhs.as_f64() * rhs.as_f64()),
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParamValue::Int(value) => write!(f, "{value}"),
            // Whole floats keep a decimal so they never read back as integers.
            ParamValue::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            ParamValue::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Ordered mapping from parameter name to value.
///
/// Insertion order is preserved and determines the order of `key=value`
/// tokens on the simulator command line. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSet {
    entries: IndexMap<String, ParamValue>,
}

impl ParamSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a parameter set from `(name, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.insert(name, value);
        }
        set
    }

    /// Builds a single-entry parameter set.
    pub fn single(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let mut set = Self::new();
        set.insert(name, value);
        set
    }

    /// Inserts or replaces a value, keeping the original position of an existing name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.entries.get(name).copied()
    }

    /// Returns `true` when `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no names are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamValue)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    /// Renders every entry as a `name=value` token in insertion order.
    pub fn to_tokens(&self) -> Vec<String> {
        self.iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect()
    }

    pub(crate) fn entry_mut(&mut self, name: &str) -> Option<&mut ParamValue> {
        self.entries.get_mut(name)
    }
}

impl<K, V> FromIterator<(K, V)> for ParamSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
