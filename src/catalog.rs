//! Catalog flavors
//!
//! Items and toys share the query engine and the record lifecycle; this
//! module holds what differs between them: default listing parameters,
//! writable fields and the visited-records cookie name.

use serde_json::{Map, Value};
use store_object::{GenericStore, Queryable};
use type_mapping::{to_bool, to_number, to_text, ParamSchema, ParamValue};

use crate::core::ToyHaus;
use crate::errors::ToyHausError;
use crate::models::{Creator, Item, Toy};

/// Default listing parameters for items
pub fn item_default_params() -> ParamSchema {
    ParamSchema::new()
        .text("txt", "")
        .number("maxPrice", 0.0)
        .passthrough("labels", ParamValue::List(Vec::new()))
        .text("sortBy", "")
        .number("sortDir", 1.0)
        .number("pageIdx", 0.0)
}

/// Default listing parameters for toys
pub fn toy_default_params() -> ParamSchema {
    ParamSchema::new()
        .text("txt", "")
        .number("minPrice", 0.0)
        .number("maxPrice", 0.0)
        .passthrough("labels", ParamValue::List(Vec::new()))
        .text("inStock", "all")
        .text("sortBy", "")
        .number("sortDir", 1.0)
        .number("pageIdx", 0.0)
}

/// A catalog collection exposed through listing and CRUD operations
pub trait CatalogRecord: Queryable {
    /// Name of the cookie tracking recently viewed ids
    fn visited_cookie() -> &'static str;

    fn default_params() -> ParamSchema;

    fn store(haus: &ToyHaus) -> &GenericStore<Self>;

    /// Fields a client may set, with the value each takes when absent on create
    fn writable_fields() -> Vec<(&'static str, Value)>;

    /// Keep only the writable fields of a request body, coerced to their stored types.
    /// A body that is not an object yields an empty patch.
    fn sanitize(body: &Value) -> Map<String, Value> {
        let Some(fields) = body.as_object() else {
            return Map::new();
        };

        Self::writable_fields()
            .into_iter()
            .filter_map(|(name, _)| {
                fields
                    .get(name)
                    .map(|value| (name.to_string(), coerce_field(name, value)))
            })
            .collect()
    }

    /// Build a new, not yet stored record from a request body
    fn from_body(body: &Value, creator: Option<Creator>) -> Result<Self, ToyHausError> {
        let mut fields: Map<String, Value> = Self::writable_fields()
            .into_iter()
            .map(|(name, default)| (name.to_string(), default))
            .collect();
        fields.extend(Self::sanitize(body));

        if let Some(creator) = creator {
            fields.insert(
                "creator".to_string(),
                serde_json::to_value(creator).map_err(store_object::StoreError::from)?,
            );
        }

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            ToyHausError::invalid_input(format!(
                "Invalid {} body: {}",
                Self::collection_name(),
                e
            ))
        })
    }
}

fn coerce_field(name: &str, value: &Value) -> Value {
    let param = ParamValue::from(value.clone());
    match name {
        "price" => {
            let price = to_number(&param);
            if price.is_finite() {
                Value::from(price)
            } else {
                Value::from(0)
            }
        }
        "inStock" => Value::Bool(to_bool(&param)),
        "labels" => match value {
            Value::Array(labels) => Value::Array(
                labels
                    .iter()
                    .map(|label| Value::String(to_text(&ParamValue::from(label.clone()))))
                    .collect(),
            ),
            Value::String(label) if !label.is_empty() => Value::Array(vec![value.clone()]),
            _ => Value::Array(Vec::new()),
        },
        _ => match value {
            Value::Null => Value::String(String::new()),
            _ => Value::String(to_text(&param)),
        },
    }
}

impl CatalogRecord for Item {
    fn visited_cookie() -> &'static str {
        "visitedItems"
    }

    fn default_params() -> ParamSchema {
        item_default_params()
    }

    fn store(haus: &ToyHaus) -> &GenericStore<Self> {
        haus.items()
    }

    fn writable_fields() -> Vec<(&'static str, Value)> {
        vec![
            ("title", Value::from("")),
            ("description", Value::from("")),
            ("price", Value::from(0)),
            ("labels", Value::Array(Vec::new())),
        ]
    }
}

impl CatalogRecord for Toy {
    fn visited_cookie() -> &'static str {
        "visitedToys"
    }

    fn default_params() -> ParamSchema {
        toy_default_params()
    }

    fn store(haus: &ToyHaus) -> &GenericStore<Self> {
        haus.toys()
    }

    fn writable_fields() -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from("")),
            ("description", Value::from("")),
            ("price", Value::from(0)),
            ("labels", Value::Array(Vec::new())),
            ("inStock", Value::Bool(true)),
        ]
    }
}
