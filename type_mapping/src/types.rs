//! Parameter value definitions
//!
//! This module provides the dynamic value type carried by query parameters
//! and the ordered map that holds them.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use indexmap::IndexMap;

/// Dynamic parameter value, as parsed from a query string or produced by a merge
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Bool(bool),
    Text(String),
    List(Vec<ParamValue>),
    Map(ParamMap),
    Null,
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

// Integral numbers are written without a fraction so `pageIdx` stays `0`, not `0.0`
impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Text(s) => serializer.serialize_str(s),
            ParamValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ParamValue::Map(map) => map.serialize(serializer),
            ParamValue::Null => serializer.serialize_unit(),
        }
    }
}

/// Map from parameter name to value, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap(IndexMap<String, ParamValue>);

impl ParamMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ParamValue> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value of `key`, if it holds a number
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ParamValue::as_number)
    }

    /// Text value of `key`, if it holds a string
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    /// Strings held by `key`. A single string counts as a one-element list
    /// and empty strings are dropped.
    pub fn list_of_text(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(ParamValue::Text(s)) if !s.is_empty() => vec![s.clone()],
            Some(ParamValue::List(items)) => items
                .iter()
                .filter_map(|item| match item {
                    ParamValue::Text(s) if !s.is_empty() => Some(s.clone()),
                    ParamValue::Number(_) | ParamValue::Bool(_) => Some(crate::coerce::to_text(item)),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Serialize for ParamMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, ParamValue)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ParamMap {
    type Item = (String, ParamValue);
    type IntoIter = indexmap::map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Convert basic Rust types to ParamValue
impl From<String> for ParamValue {
    fn from(val: String) -> Self {
        ParamValue::Text(val)
    }
}

impl From<&str> for ParamValue {
    fn from(val: &str) -> Self {
        ParamValue::Text(val.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(val: f64) -> Self {
        ParamValue::Number(val)
    }
}

impl From<i32> for ParamValue {
    fn from(val: i32) -> Self {
        ParamValue::Number(val as f64)
    }
}

impl From<i64> for ParamValue {
    fn from(val: i64) -> Self {
        ParamValue::Number(val as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(val: bool) -> Self {
        ParamValue::Bool(val)
    }
}

impl From<ParamMap> for ParamValue {
    fn from(val: ParamMap) -> Self {
        ParamValue::Map(val)
    }
}

impl<T> From<Vec<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(val: Vec<T>) -> Self {
        ParamValue::List(val.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => ParamValue::Null,
        }
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(val: serde_json::Value) -> Self {
        match val {
            serde_json::Value::Null => ParamValue::Null,
            serde_json::Value::Bool(b) => ParamValue::Bool(b),
            serde_json::Value::Number(n) => ParamValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => ParamValue::Text(s),
            serde_json::Value::Array(items) => {
                ParamValue::List(items.into_iter().map(ParamValue::from).collect())
            }
            serde_json::Value::Object(map) => ParamValue::Map(
                map.into_iter()
                    .map(|(key, value)| (key, ParamValue::from(value)))
                    .collect(),
            ),
        }
    }
}
