//! Record filters
//!
//! Each filter is a predicate over a [`Queryable`] record.

use crate::traits::Queryable;

/// A single filter condition
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    /// Case-insensitive substring of title or description (needle stored lowercased)
    Text(String),
    /// Price must be at least the bound
    MinPrice(f64),
    /// Price must be at most the bound
    MaxPrice(f64),
    /// Record must carry every label
    AllLabels(Vec<String>),
    /// Stock status must equal the flag
    InStock(bool),
}

impl QueryFilter {
    /// Text condition
    pub fn text(needle: &str) -> Self {
        Self::Text(needle.to_lowercase())
    }

    /// Lower price bound
    pub fn min_price(bound: f64) -> Self {
        Self::MinPrice(bound)
    }

    /// Upper price bound
    pub fn max_price(bound: f64) -> Self {
        Self::MaxPrice(bound)
    }

    /// Filter by records that have all of the specified labels
    pub fn has_all_labels(labels: Vec<String>) -> Self {
        Self::AllLabels(labels)
    }

    /// Stock status condition
    pub fn in_stock(flag: bool) -> Self {
        Self::InStock(flag)
    }

    /// Whether `record` passes this filter
    pub fn matches<T: Queryable>(&self, record: &T) -> bool {
        match self {
            QueryFilter::Text(needle) => {
                record.title().to_lowercase().contains(needle.as_str())
                    || record
                        .description()
                        .is_some_and(|d| d.to_lowercase().contains(needle.as_str()))
            }
            QueryFilter::MinPrice(bound) => record.price() >= *bound,
            QueryFilter::MaxPrice(bound) => record.price() <= *bound,
            QueryFilter::AllLabels(labels) => labels
                .iter()
                .all(|label| record.labels().iter().any(|l| l == label)),
            // Records without a stock flag never match a stock condition
            QueryFilter::InStock(flag) => record.in_stock() == Some(*flag),
        }
    }
}
