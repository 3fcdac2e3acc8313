//! Traits for collection operations
//!
//! This module contains all the traits that define the interface for collection
//! operations in the toyhaus library.

pub mod core;
pub mod record;

// Re-export all public items for convenience
pub use self::core::StoreObject;
pub use record::{Queryable, Record};
