//! Store Object - Core collection layer for ToyHaus
//!
//! This crate provides the foundational types and traits for collection operations,
//! including the JSON-backed generic store, the in-memory query engine and id generation.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;

pub mod errors;
pub mod generic_store;
pub mod id_type;
pub mod prelude;
pub mod query_builder;
pub mod traits;

pub use errors::StoreError;
pub use generic_store::GenericStore;
pub use id_type::{make_id, DEFAULT_ID_LENGTH};
pub use query_builder::{
    QueryBuilder, QueryParams, QueryResult, SortField, SortOrder, StockFilter,
};
pub use traits::*;
