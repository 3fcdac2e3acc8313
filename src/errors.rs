//! Error types for the ToyHaus crate
//!
//! This module contains all error types that can be returned by ToyHaus operations.

use config::ConfigError;
use store_object::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToyHausError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    Forbidden(String),
}

impl ToyHausError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ToyHausError::Store(StoreError::InvalidInput(message.into()))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ToyHausError::Store(e) if e.is_not_found())
    }
}
