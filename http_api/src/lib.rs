//! HTTP surface of the ToyHaus catalog.
//!
//! Routes live under `/api`; anything else is served from the configured
//! static directory with an `index.html` fallback.

pub mod cookies;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
