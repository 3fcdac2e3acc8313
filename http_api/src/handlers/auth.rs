//! Login, logout and signup

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use toyhaus::users::{Credentials, SignupRequest};
use tracing::warn;

use crate::cookies;
use crate::error::HttpError;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<Credentials>>,
) -> Result<Response, HttpError> {
    let credentials = body.map(|Json(credentials)| credentials).unwrap_or_default();
    let user = state
        .users()
        .login(&credentials)
        .await
        .map_err(|e| HttpError::Unauthorized(format!("Login failed: {}", e)))?;

    let cookie = cookies::login_cookie(&state.tokens().get_login_token(&user))?;
    Ok(([(SET_COOKIE, cookie)], Json(user)).into_response())
}

pub async fn logout() -> impl IntoResponse {
    ([(SET_COOKIE, cookies::clear_login_cookie())], "Logged out")
}

pub async fn signup(
    State(state): State<AppState>,
    body: Option<Json<SignupRequest>>,
) -> Result<Response, HttpError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let user = state.users().signup(request).await.map_err(|e| {
        warn!("Signup failed: {}", e);
        HttpError::Forbidden("Signup failed".to_string())
    })?;

    let cookie = cookies::login_cookie(&state.tokens().get_login_token(&user))?;
    Ok(([(SET_COOKIE, cookie)], Json(user)).into_response())
}
