//! User handlers

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use toyhaus::models::PublicUser;
use tracing::info;

use crate::error::HttpError;
use crate::handlers::logged_in_user;
use crate::state::AppState;

/// List all users. Admins only.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PublicUser>>, HttpError> {
    match logged_in_user(&state, &headers) {
        Some(user) if user.is_admin => Ok(Json(state.users().query().await)),
        _ => Err(HttpError::Unauthorized("Cannot get users".to_string())),
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PublicUser>, HttpError> {
    Ok(Json(state.users().get_by_id(&user_id).await?))
}

/// Remove a user that created no items or toys. Admins only.
pub async fn remove(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<&'static str, HttpError> {
    if !logged_in_user(&state, &headers).is_some_and(|user| user.is_admin) {
        return Err(HttpError::Unauthorized("Not allowed".to_string()));
    }

    state.remove_user(&user_id).await?;
    info!("User {} removed", user_id);
    Ok("Removed!")
}
