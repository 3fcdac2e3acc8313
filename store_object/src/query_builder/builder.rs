//! Query builder utilities
//!
//! This module provides the listing pipeline over an in-memory collection.

use super::filter::QueryFilter;
use super::ordering::{SortField, SortOrder};
use super::pagination::Pagination;
use super::params::QueryParams;
use crate::traits::Queryable;
use serde::Serialize;
use type_mapping::ParamMap;

/// Query builder for constructing listing queries
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pub(crate) conditions: Vec<QueryFilter>,
    pub(crate) order_by: Option<(SortField, SortOrder)>,
    pub(crate) pagination: Option<Pagination>,
}

/// A page of records plus the metadata clients need to page through them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    pub records: Vec<T>,
    /// Records matching the filters, before pagination
    pub total_count: usize,
    pub page_count: usize,
    /// The effective parameters the query ran with
    pub query_params: ParamMap,
}

impl<T> QueryResult<T> {
    pub fn with_query_params(mut self, query_params: ParamMap) -> Self {
        self.query_params = query_params;
        self
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the pipeline for typed listing options
    pub fn from_params(params: &QueryParams, page_size: usize) -> Self {
        let mut builder = Self::new();

        if !params.txt.is_empty() {
            builder = builder.text(&params.txt);
        }
        if let Some(min) = params.min_price {
            builder = builder.min_price(min);
        }
        if let Some(max) = params.max_price {
            builder = builder.max_price(max);
        }
        if !params.labels.is_empty() {
            builder = builder.labels(params.labels.clone());
        }
        if let Some(flag) = params.in_stock.flag() {
            builder = builder.stock(flag);
        }
        if let Some(field) = params.sort_by {
            builder = builder.order_by(field, params.sort_dir);
        }

        builder.page(params.page_idx, page_size)
    }

    /// Add a filter condition
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.conditions.push(filter);
        self
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(mut self, filters: Vec<QueryFilter>) -> Self {
        self.conditions.extend(filters);
        self
    }

    pub fn text(self, needle: &str) -> Self {
        self.filter(QueryFilter::text(needle))
    }

    pub fn min_price(self, bound: f64) -> Self {
        self.filter(QueryFilter::min_price(bound))
    }

    pub fn max_price(self, bound: f64) -> Self {
        self.filter(QueryFilter::max_price(bound))
    }

    /// Filter by records that have all of the specified labels
    pub fn labels(self, labels: Vec<String>) -> Self {
        self.filter(QueryFilter::has_all_labels(labels))
    }

    pub fn stock(self, in_stock: bool) -> Self {
        self.filter(QueryFilter::in_stock(in_stock))
    }

    /// Set ordering; a later call replaces an earlier one
    pub fn order_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.order_by = Some((field, order));
        self
    }

    /// Select page `page_idx` of `page_size` records
    pub fn page(mut self, page_idx: f64, page_size: usize) -> Self {
        self.pagination = Some(Pagination::new(page_idx, page_size));
        self
    }

    /// Run filters, sort and pagination over `records`
    pub fn apply<T: Queryable>(&self, records: &[T]) -> QueryResult<T> {
        let mut matched: Vec<&T> = records.iter().collect();

        for condition in &self.conditions {
            matched.retain(|record| condition.matches(*record));
        }

        // sort_by is stable, equal keys keep collection order
        if let Some((field, order)) = self.order_by {
            matched.sort_by(|a, b| order.apply(field.compare(*a, *b)));
        }

        let total_count = matched.len();
        let (range, page_count) = match &self.pagination {
            Some(pagination) => (pagination.range(total_count), pagination.page_count(total_count)),
            None => (0..total_count, usize::from(total_count > 0)),
        };

        QueryResult {
            records: matched[range].iter().map(|record| (*record).clone()).collect(),
            total_count,
            page_count,
            query_params: ParamMap::new(),
        }
    }
}
