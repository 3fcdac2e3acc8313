//! Route definitions and router construction.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use toyhaus::catalog::CatalogRecord;
use toyhaus::models::{Item, Toy};
use toyhaus::ToyHaus;

use crate::handlers;
use crate::state::AppState;

/// Build the CORS layer for the configured origins.
///
/// Credentials are allowed, so methods and headers are listed explicitly.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Listing and CRUD routes for one catalog flavor
fn catalog_routes<T: CatalogRecord>() -> Router<AppState> {
    use handlers::catalog;

    Router::new()
        .route("/", get(catalog::list::<T>).post(catalog::create::<T>))
        .route(
            "/default-query-params",
            get(catalog::default_query_params::<T>),
        )
        .route("/labels", get(catalog::labels::<T>))
        .route("/page-count", get(catalog::page_count::<T>))
        .route(
            "/:id",
            get(catalog::get::<T>)
                .put(catalog::update::<T>)
                .delete(catalog::remove::<T>),
        )
}

/// Build all API routes without the `/api` prefix.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/item", catalog_routes::<Item>())
        .nest("/toy", catalog_routes::<Toy>())
        // Users API
        .route("/user", get(handlers::users::list))
        .route(
            "/user/:id",
            get(handlers::users::get).delete(handlers::users::remove),
        )
        // Authentication
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/signup", post(handlers::auth::signup))
}

/// Create the application router.
///
/// API routes live under `/api`. When the configuration names a static
/// directory, every other path is served from it, falling back to
/// `index.html` for client-side routing.
pub fn create_router(haus: ToyHaus) -> Router {
    let server = haus.config().server.clone();
    let state: AppState = Arc::new(haus);

    let router = Router::new()
        .nest("/api", api_routes())
        .with_state(state);

    let router = match server.static_dir {
        Some(static_dir) => {
            let static_path = Path::new(&static_dir);
            let serve_dir =
                ServeDir::new(static_path).fallback(ServeFile::new(static_path.join("index.html")));
            router.fallback_service(serve_dir)
        }
        None => router,
    };

    router
        .layer(build_cors_layer(&server.cors_origins))
        .layer(TraceLayer::new_for_http())
}
