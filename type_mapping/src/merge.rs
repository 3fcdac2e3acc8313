//! Default parameter schema and merging
//!
//! A [`ParamSchema`] lists every parameter a listing endpoint recognizes
//! together with its default value. The variant of each [`DefaultParam`]
//! fixes the type an override is coerced to.

use crate::coerce::{to_bool, to_number, to_text};
use crate::types::{ParamMap, ParamValue};
use serde::ser::{Serialize, Serializer};

/// A default value tagged with the type overrides are coerced to
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultParam {
    Number(f64),
    Bool(bool),
    Text(String),
    Nested(ParamSchema),
    /// Overrides are taken as-is (label lists and other structured values)
    Passthrough(ParamValue),
}

impl DefaultParam {
    /// The default value itself, with nested schemas expanded
    pub fn value(&self) -> ParamValue {
        match self {
            DefaultParam::Number(n) => ParamValue::Number(*n),
            DefaultParam::Bool(b) => ParamValue::Bool(*b),
            DefaultParam::Text(s) => ParamValue::Text(s.clone()),
            DefaultParam::Nested(schema) => ParamValue::Map(schema.defaults()),
            DefaultParam::Passthrough(value) => value.clone(),
        }
    }

    /// Coerce an override to this default's type
    pub fn coerce(&self, value: &ParamValue) -> ParamValue {
        match self {
            DefaultParam::Number(_) => ParamValue::Number(to_number(value)),
            DefaultParam::Bool(_) => ParamValue::Bool(to_bool(value)),
            DefaultParam::Text(_) => ParamValue::Text(to_text(value)),
            DefaultParam::Nested(schema) => {
                let empty = ParamMap::new();
                let nested = value.as_map().unwrap_or(&empty);
                ParamValue::Map(merge(schema, nested))
            }
            DefaultParam::Passthrough(_) => value.clone(),
        }
    }
}

/// Ordered set of recognized parameters and their defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSchema {
    entries: Vec<(String, DefaultParam)>,
}

impl ParamSchema {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a parameter. A key added twice keeps its first position and the latest default.
    pub fn with(mut self, key: &str, default: DefaultParam) -> Self {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = default,
            None => self.entries.push((key.to_string(), default)),
        }
        self
    }

    pub fn number(self, key: &str, default: f64) -> Self {
        self.with(key, DefaultParam::Number(default))
    }

    pub fn boolean(self, key: &str, default: bool) -> Self {
        self.with(key, DefaultParam::Bool(default))
    }

    pub fn text(self, key: &str, default: &str) -> Self {
        self.with(key, DefaultParam::Text(default.to_string()))
    }

    pub fn nested(self, key: &str, schema: ParamSchema) -> Self {
        self.with(key, DefaultParam::Nested(schema))
    }

    pub fn passthrough(self, key: &str, default: impl Into<ParamValue>) -> Self {
        self.with(key, DefaultParam::Passthrough(default.into()))
    }

    pub fn get(&self, key: &str) -> Option<&DefaultParam> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, default)| default)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefaultParam)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The full default parameter set
    pub fn defaults(&self) -> ParamMap {
        self.entries
            .iter()
            .map(|(key, default)| (key.clone(), default.value()))
            .collect()
    }
}

impl Serialize for ParamSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.defaults().serialize(serializer)
    }
}

/// Merge caller overrides into the defaults.
///
/// The result has exactly the schema's keys. Keys only present in
/// `overrides` are dropped; present overrides are coerced to the type of
/// the corresponding default.
pub fn merge(schema: &ParamSchema, overrides: &ParamMap) -> ParamMap {
    schema
        .iter()
        .map(|(key, default)| {
            let value = match overrides.get(key) {
                Some(value) => default.coerce(value),
                None => default.value(),
            };
            (key.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_string::parse_query_string;

    fn catalog_schema() -> ParamSchema {
        ParamSchema::new()
            .text("txt", "")
            .number("maxPrice", 0.0)
            .passthrough("labels", ParamValue::List(vec![]))
            .text("sortBy", "")
            .number("sortDir", 1.0)
            .number("pageIdx", 0.0)
            .boolean("onlyMine", false)
    }

    #[test]
    fn test_empty_overrides_yield_defaults() {
        let schema = catalog_schema();
        let merged = merge(&schema, &ParamMap::new());
        assert_eq!(merged, schema.defaults());
    }

    #[test]
    fn test_merge_keeps_exact_key_set() {
        let schema = catalog_schema();
        let overrides = parse_query_string("txt=car&unknown=1&__proto__=x&pageIdx=2");
        let merged = merge(&schema, &overrides);

        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        let expected: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, expected);
        assert!(!merged.contains_key("unknown"));
    }

    #[test]
    fn test_merge_follows_schema_order() {
        let schema = ParamSchema::new()
            .text("txt", "")
            .number("maxPrice", 0.0)
            .text("sortBy", "")
            .number("pageIdx", 0.0);
        let overrides = parse_query_string("pageIdx=1&sortBy=price&txt=car&maxPrice=9");
        let merged = merge(&schema, &overrides);

        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["txt", "maxPrice", "sortBy", "pageIdx"]);
        assert_eq!(
            serde_json::to_string(&merged).unwrap(),
            r#"{"txt":"car","maxPrice":9,"sortBy":"price","pageIdx":1}"#
        );
        assert_eq!(
            serde_json::to_string(&schema).unwrap(),
            r#"{"txt":"","maxPrice":0,"sortBy":"","pageIdx":0}"#
        );
    }

    #[test]
    fn test_overrides_are_coerced_to_default_types() {
        let schema = catalog_schema();
        let overrides = parse_query_string("maxPrice=50&sortDir=-1&pageIdx=3&onlyMine=yes&txt=12");
        let merged = merge(&schema, &overrides);

        assert_eq!(merged.number("maxPrice"), Some(50.0));
        assert_eq!(merged.number("sortDir"), Some(-1.0));
        assert_eq!(merged.number("pageIdx"), Some(3.0));
        assert_eq!(merged.get("onlyMine"), Some(&ParamValue::Bool(true)));
        assert_eq!(merged.text("txt"), Some("12"));
    }

    #[test]
    fn test_unparseable_number_becomes_nan() {
        let schema = catalog_schema();
        let merged = merge(&schema, &parse_query_string("pageIdx=abc"));
        assert!(merged.number("pageIdx").unwrap().is_nan());
    }

    #[test]
    fn test_passthrough_keeps_override_shape() {
        let schema = catalog_schema();

        let merged = merge(&schema, &parse_query_string("labels[]=Doll&labels[]=Art"));
        assert_eq!(merged.get("labels"), Some(&ParamValue::from(vec!["Doll", "Art"])));

        let merged = merge(&schema, &parse_query_string("labels=Doll"));
        assert_eq!(merged.get("labels"), Some(&ParamValue::from("Doll")));
    }

    #[test]
    fn test_nested_defaults_recurse() {
        let schema = ParamSchema::new().nested(
            "price",
            ParamSchema::new().number("min", 0.0).number("max", 100.0),
        );

        let merged = merge(&schema, &parse_query_string("price[min]=5&price[other]=1"));
        let price = merged.get("price").and_then(ParamValue::as_map).unwrap();
        assert_eq!(price.number("min"), Some(5.0));
        assert_eq!(price.number("max"), Some(100.0));
        assert!(!price.contains_key("other"));
    }

    #[test]
    fn test_nested_with_non_map_override_uses_defaults() {
        let schema = ParamSchema::new().nested(
            "price",
            ParamSchema::new().number("min", 0.0).number("max", 100.0),
        );

        let merged = merge(&schema, &parse_query_string("price=cheap"));
        let price = merged.get("price").and_then(ParamValue::as_map).unwrap();
        assert_eq!(price.number("min"), Some(0.0));
        assert_eq!(price.number("max"), Some(100.0));
    }

    #[test]
    fn test_schema_serializes_as_defaults() {
        let json = serde_json::to_value(catalog_schema()).unwrap();
        assert_eq!(json["sortDir"], serde_json::json!(1));
        assert_eq!(json["labels"], serde_json::json!([]));
        assert_eq!(json["txt"], serde_json::json!(""));
    }
}
