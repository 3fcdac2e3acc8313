//! Typed listing parameters
//!
//! [`QueryParams`] reads a merged parameter map produced by
//! `type_mapping::merge` into the options the query engine understands.

use super::ordering::{SortField, SortOrder};
use type_mapping::{to_number, to_text, ParamMap};

/// Stock status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl StockFilter {
    /// `true`/`inStock` and `false`/`outOfStock` select a status; anything else keeps all
    pub fn parse(value: &str) -> Self {
        match value {
            "true" | "inStock" => StockFilter::InStock,
            "false" | "outOfStock" => StockFilter::OutOfStock,
            _ => StockFilter::All,
        }
    }

    pub fn flag(&self) -> Option<bool> {
        match self {
            StockFilter::All => None,
            StockFilter::InStock => Some(true),
            StockFilter::OutOfStock => Some(false),
        }
    }
}

/// Listing options
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub txt: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub labels: Vec<String>,
    pub in_stock: StockFilter,
    pub sort_by: Option<SortField>,
    pub sort_dir: SortOrder,
    pub page_idx: f64,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            txt: String::new(),
            min_price: None,
            max_price: None,
            labels: Vec::new(),
            in_stock: StockFilter::All,
            sort_by: None,
            sort_dir: SortOrder::Asc,
            page_idx: 0.0,
        }
    }
}

impl QueryParams {
    /// Read options from a merged parameter map. Missing keys fall back to
    /// [`QueryParams::default`]. A price bound of zero or NaN counts as unset.
    pub fn from_map(params: &ParamMap) -> Self {
        let bound = |key: &str| {
            params
                .get(key)
                .map(to_number)
                .filter(|n| *n != 0.0 && !n.is_nan())
        };

        Self {
            txt: params.get("txt").map(to_text).unwrap_or_default(),
            min_price: bound("minPrice"),
            max_price: bound("maxPrice"),
            labels: params.list_of_text("labels"),
            in_stock: params
                .get("inStock")
                .map(|v| StockFilter::parse(&to_text(v)))
                .unwrap_or_default(),
            sort_by: params
                .get("sortBy")
                .and_then(|v| SortField::parse(&to_text(v))),
            sort_dir: params
                .get("sortDir")
                .map(|v| SortOrder::from_direction(to_number(v)))
                .unwrap_or(SortOrder::Asc),
            page_idx: params.get("pageIdx").map(to_number).unwrap_or(0.0),
        }
    }
}
