//! Generic store implementations
//!
//! This module provides the record lifecycle for every collection.

use super::core::GenericStore;
use crate::errors::StoreError;
use crate::id_type::make_id;
use crate::traits::{Record, StoreObject};
use async_trait::async_trait;
use serde_json::Value;

/// Id draws before a create gives up
const MAX_ID_ATTEMPTS: usize = 64;

/// Current time in milliseconds since the Unix epoch
#[inline]
fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Overlay the fields of `patch` on `existing`, skipping immutable fields
fn merge_fields<T: Record>(
    existing: &T,
    patch: &serde_json::Map<String, Value>,
) -> Result<T, StoreError> {
    let mut fields = match serde_json::to_value(existing)? {
        Value::Object(fields) => fields,
        other => {
            return Err(StoreError::InvalidInput(format!(
                "{} record does not serialize to an object: {}",
                T::collection_name(),
                other
            )))
        }
    };

    let immutable = T::immutable_fields();
    for (key, value) in patch {
        if !immutable.contains(&key.as_str()) {
            fields.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        StoreError::InvalidInput(format!(
            "Invalid fields for {}: {}",
            T::collection_name(),
            e
        ))
    })
}

/// Pick an id of `length` characters not used by `records`
fn unused_id<T: Record>(records: &[T], length: usize) -> Result<String, StoreError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = make_id(length);
        if !records.iter().any(|r| r.id() == candidate) {
            return Ok(candidate);
        }
    }
    Err(StoreError::InvalidInput(format!(
        "No free {} id of length {} after {} attempts",
        T::collection_name(),
        length,
        MAX_ID_ATTEMPTS
    )))
}

impl<T: Record> GenericStore<T> {
    /// Create a record after `check` accepts the current collection.
    ///
    /// `check` runs under the write lock, so uniqueness rules it enforces
    /// hold against concurrent creates.
    pub async fn create_checked<F>(&self, data: T, check: F) -> Result<T, StoreError>
    where
        F: FnOnce(&[T]) -> Result<(), StoreError> + Send,
    {
        let id_length = self.id_length;
        let created = self
            .mutate("create", move |records| {
                check(records)?;

                let mut record = data;
                record.set_id(unused_id(records, id_length)?);
                record.stamp_created(now_millis());
                records.push(record.clone());
                Ok(record)
            })
            .await?;

        tracing::info!("{} {} saved successfully", T::collection_name(), created.id());
        Ok(created)
    }
}

#[async_trait]
impl<T> StoreObject for GenericStore<T>
where
    T: Record,
{
    type Model = T;

    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        self.create_checked(data, |_| Ok(())).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Self::Model, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::collection_name(), id))
    }

    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError> {
        Ok(self.snapshot().await)
    }

    async fn update(&self, id: &str, patch: Value) -> Result<Self::Model, StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::InvalidInput(format!(
                "Update for {} '{}' must be an object",
                T::collection_name(),
                id
            )));
        };

        let updated = self
            .mutate("update", |records| {
                let idx = records
                    .iter()
                    .position(|record| record.id() == id)
                    .ok_or_else(|| StoreError::not_found(T::collection_name(), id))?;

                let mut merged = merge_fields(&records[idx], &patch)?;
                merged.stamp_updated(now_millis());
                records[idx] = merged.clone();
                Ok(merged)
            })
            .await?;

        tracing::info!("{} {} updated successfully", T::collection_name(), id);
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<Self::Model, StoreError> {
        let removed = self
            .mutate("remove", |records| {
                let idx = records
                    .iter()
                    .position(|record| record.id() == id)
                    .ok_or_else(|| StoreError::not_found(T::collection_name(), id))?;
                Ok(records.remove(idx))
            })
            .await?;

        tracing::info!("{} {} removed successfully", T::collection_name(), id);
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().await.len())
    }
}
