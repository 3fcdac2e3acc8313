//! Typed mapping between raw request parameters and server-side defaults.
//! This crate provides the parameter schema, coercion rules and query-string
//! parsing shared by every listing endpoint in the toyhaus ecosystem.

pub mod coerce;
pub mod merge;
pub mod query_string;
pub mod types;

// Re-export commonly used items
pub use coerce::{to_bool, to_number, to_text};
pub use merge::{merge, DefaultParam, ParamSchema};
pub use query_string::parse_query_string;
pub use types::{ParamMap, ParamValue};
