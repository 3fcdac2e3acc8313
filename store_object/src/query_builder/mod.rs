//! In-memory query engine
//!
//! Filters, sorts and paginates a collection snapshot. Filters run first in
//! the order they were added, then the stable sort, then pagination.

pub mod builder;
pub mod filter;
pub mod ordering;
pub mod pagination;
pub mod params;


pub use builder::{QueryBuilder, QueryResult};
pub use filter::QueryFilter;
pub use ordering::{SortField, SortOrder};
pub use pagination::Pagination;
pub use params::{QueryParams, StockFilter};
