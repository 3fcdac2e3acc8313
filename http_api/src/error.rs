//! HTTP error types and mappings.
//!
//! Errors are answered with a plain-text body and a non-2xx status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use toyhaus::store_object::StoreError;
use toyhaus::ToyHausError;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => HttpError::NotFound(msg),
            StoreError::InvalidInput(msg) => HttpError::BadRequest(msg),
            other => HttpError::Internal(other.to_string()),
        }
    }
}

impl From<ToyHausError> for HttpError {
    fn from(err: ToyHausError) -> Self {
        match err {
            ToyHausError::Store(store_err) => store_err.into(),
            ToyHausError::Config(e) => HttpError::Internal(e.to_string()),
            // The catalog answers every authorization failure with 401
            ToyHausError::InvalidCredentials(msg)
            | ToyHausError::Forbidden(msg) => HttpError::Unauthorized(msg),
        }
    }
}
