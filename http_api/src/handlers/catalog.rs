//! Catalog handlers - listing and CRUD for items and toys.
//!
//! Every handler is generic over the catalog flavor and mounted once per
//! collection.

use axum::extract::{Path, RawQuery, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use toyhaus::catalog::CatalogRecord;
use toyhaus::models::Creator;
use toyhaus::store_object::{QueryResult, StoreObject};
use toyhaus::type_mapping::{parse_query_string, ParamSchema};

use crate::cookies;
use crate::error::HttpError;
use crate::handlers::logged_in_user;
use crate::state::AppState;

/// List records with the request's query string merged into the defaults.
pub async fn list<T: CatalogRecord>(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<QueryResult<T>> {
    let overrides = parse_query_string(query.as_deref().unwrap_or_default());
    Json(state.query::<T>(&overrides).await)
}

pub async fn default_query_params<T: CatalogRecord>() -> Json<ParamSchema> {
    Json(T::default_params())
}

pub async fn labels<T: CatalogRecord>(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(T::store(&state).labels().await)
}

pub async fn page_count<T: CatalogRecord>(State(state): State<AppState>) -> String {
    state.page_count::<T>().await.to_string()
}

/// Get a single record, tracking the id in the visited-records cookie.
///
/// A client that already viewed the maximum number of distinct records is
/// turned away until the cookie expires.
pub async fn get<T: CatalogRecord>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let server = &state.config().server;
    let mut visited = cookies::visited_ids(&headers, T::visited_cookie());

    if !visited.contains(&id) {
        if visited.len() >= server.max_visited {
            return Err(HttpError::Unauthorized("Wait for a bit".to_string()));
        }
        visited.push(id.clone());
    }

    let record = T::store(&state).get_by_id(&id).await?;
    let cookie = cookies::visited_cookie(
        T::visited_cookie(),
        &visited,
        server.visited_cookie_max_age_seconds,
    )?;

    Ok(([(SET_COOKIE, cookie)], Json(record)).into_response())
}

/// Create a record; a logged-in caller becomes its creator.
pub async fn create<T: CatalogRecord>(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<Json<T>, HttpError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let creator = logged_in_user(&state, &headers).map(|user| Creator::from(&user));

    let record = T::from_body(&body, creator)?;
    Ok(Json(state.create(record).await?))
}

/// Shallow-merge the writable fields of the body into an existing record.
pub async fn update<T: CatalogRecord>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<T>, HttpError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let patch = Value::Object(T::sanitize(&body));

    Ok(Json(T::store(&state).update(&id, patch).await?))
}

pub async fn remove<T: CatalogRecord>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, HttpError> {
    Ok(Json(T::store(&state).remove(&id).await?))
}
