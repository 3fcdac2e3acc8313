//! Shared application state type.

use std::sync::Arc;
use toyhaus::ToyHaus;

/// Application state shared across all handlers.
pub type AppState = Arc<ToyHaus>;
