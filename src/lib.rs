//! # ToyHaus
//!
//! A small catalog backend: item, toy and user collections persisted as JSON
//! documents, listed through a filter/sort/paginate query engine.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toyhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let haus = ToyHaus::open(config).await?;
//!
//!     let mut overrides = ParamMap::new();
//!     overrides.insert("txt", "robot");
//!     overrides.insert("sortBy", "price");
//!
//!     let page = haus.query::<Toy>(&overrides).await;
//!     println!("{} of {} toys", page.records.len(), page.total_count);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod auth;
pub mod catalog;
pub mod core;
pub mod errors;
pub mod models;
pub mod prelude;
pub mod seed;
pub mod users;

// Re-export the main public types for convenience
pub use crate::core::ToyHaus;
pub use errors::ToyHausError;

// Re-export centralized config
pub use config::{AppConfig, AuthConfig, QueryConfig, ServerConfig, StorageConfig};

// Re-export internal crates used in the public API
pub use store_object;
pub use type_mapping;
pub use async_trait;
