//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{Queryable, Record, StoreObject};

// Error types
pub use crate::errors::StoreError;

// Core store functionality
pub use crate::generic_store::GenericStore;

// Id generation
pub use crate::id_type::make_id;

// Query building
pub use crate::query_builder::{
    QueryBuilder, QueryParams, QueryResult, SortField, SortOrder, StockFilter,
};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
