//! Whole-document JSON persistence
//!
//! A collection is stored as one pretty-printed JSON array. It is read once
//! at startup and rewritten in full after every mutation.

use crate::errors::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read the collection document at `path`
pub async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::persistence(path, e))?;

    serde_json::from_str(&content).map_err(|e| {
        StoreError::InvalidInput(format!(
            "Malformed document '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Rewrite the collection document at `path`
pub async fn write_document<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(records)?;

    tokio::fs::write(path, content)
        .await
        .map_err(|e| StoreError::persistence(path, e))
}

/// Write a fresh document, creating parent directories as needed
pub async fn create_document<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::persistence(parent, e))?;
    }
    write_document(path, records).await
}
