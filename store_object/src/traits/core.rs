//! Trait definitions
//!
//! This module defines core traits for collection operations.

use crate::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait that defines common collection operations for all entities
#[async_trait]
pub trait StoreObject: Send + Sync + Debug {
    /// The model type that this object represents
    type Model: Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>;

    /// Store a new record under a freshly assigned id
    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError>;

    /// Get a record by its id, `NotFound` when absent
    async fn get_by_id(&self, id: &str) -> Result<Self::Model, StoreError>;

    /// List all records in insertion order
    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError>;

    /// Shallow-merge the fields of `patch` over the record with `id`
    async fn update(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Self::Model, StoreError>;

    /// Remove a record by its id and return it
    async fn remove(&self, id: &str) -> Result<Self::Model, StoreError>;

    /// Count all records
    async fn count(&self) -> Result<usize, StoreError>;
}
