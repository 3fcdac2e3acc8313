//! Sort field and direction

use crate::traits::Queryable;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Negative directions sort descending, everything else ascending
    pub fn from_direction(direction: f64) -> Self {
        if direction < 0.0 {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Fields a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Price,
    CreatedAt,
}

impl SortField {
    /// Resolve a `sortBy` value. `title` and `name` both address the text field.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" | "name" => Some(SortField::Title),
            "price" => Some(SortField::Price),
            "createdAt" => Some(SortField::CreatedAt),
            _ => None,
        }
    }

    /// Ascending comparison of two records on this field
    pub fn compare<T: Queryable>(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortField::Title => compare_text(a.title(), b.title()),
            SortField::Price => a.price().total_cmp(&b.price()),
            SortField::CreatedAt => a.created_at().cmp(&b.created_at()),
        }
    }
}

/// Case-folded comparison with the raw strings as tie-break
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
