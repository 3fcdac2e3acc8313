//! Convenience re-exports for common ToyHaus usage
//!
//! ```rust
//! use toyhaus::prelude::*;
//! ```

// Core ToyHaus components
pub use crate::auth::TokenCipher;
pub use crate::catalog::CatalogRecord;
pub use crate::core::ToyHaus;
pub use crate::errors::ToyHausError;
pub use crate::models::{Creator, Item, MiniUser, PublicUser, Toy, User};
pub use crate::users::{Credentials, SignupRequest, UserService};

// Re-export centralized config
pub use config::{AppConfig, AuthConfig, QueryConfig, ServerConfig, StorageConfig};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Query parameters
pub use type_mapping::{merge, parse_query_string, ParamMap, ParamSchema, ParamValue};

// Common external dependencies
pub use anyhow;
pub use tokio;
