use crate::debug_log;
use crate::errors::StoreError;
use crate::generic_store::persistence;
use crate::query_builder::{QueryBuilder, QueryParams, QueryResult};
use crate::traits::{Queryable, Record};
use crate::DEFAULT_ID_LENGTH;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use type_mapping::ParamMap;

/// Generic collection store backed by a single JSON document.
///
/// Records live in memory in insertion order. Mutations are serialized by
/// `write_lock`, applied to a copy of the records, persisted, and only then
/// published, so readers never wait on a rewrite and a failed rewrite leaves
/// the in-memory collection untouched.
pub struct GenericStore<T: Record> {
    pub(crate) path: PathBuf,
    pub(crate) records: RwLock<Vec<T>>,
    pub(crate) write_lock: Mutex<()>,
    pub(crate) id_length: usize,
}

impl<T: Record> std::fmt::Debug for GenericStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericStore")
            .field("collection", &T::collection_name())
            .field("path", &self.path)
            .field("id_length", &self.id_length)
            .finish()
    }
}

impl<T: Record> GenericStore<T> {
    /// Load the collection document at `path`.
    ///
    /// A missing or malformed document, or one with duplicate ids, is an error;
    /// there is no partial load.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records: Vec<T> = persistence::read_document(&path).await?;
        let store = Self::from_records(path, records)?;

        tracing::info!(
            "Loaded {} {} record(s) from {}",
            store.records.read().await.len(),
            T::collection_name(),
            store.path.display()
        );
        Ok(store)
    }

    /// Build a store over records already in memory. Nothing is written until the first mutation.
    pub fn from_records(path: impl Into<PathBuf>, records: Vec<T>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(StoreError::InvalidInput(format!(
                    "Duplicate {} id '{}' in '{}'",
                    T::collection_name(),
                    record.id(),
                    path.display()
                )));
            }
        }

        Ok(Self {
            path,
            records: RwLock::new(records),
            write_lock: Mutex::new(()),
            id_length: DEFAULT_ID_LENGTH,
        })
    }

    /// Override the length of generated ids; at least one character is used
    pub fn with_id_length(mut self, id_length: usize) -> Self {
        self.id_length = id_length.max(1);
        self
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current records
    pub async fn snapshot(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn exists(&self, id: &str) -> bool {
        self.records.read().await.iter().any(|record| record.id() == id)
    }

    /// Run `mutation` against a copy of the records, persist the copy and publish it.
    ///
    /// Errors returned by `mutation` abort before anything is written.
    pub(crate) async fn mutate<R, F>(&self, operation: &str, mutation: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, StoreError> + Send,
        R: Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut next = self.records.read().await.clone();
        let output = mutation(&mut next)?;

        debug_log!(
            "[{}] Rewriting {} with {} record(s)",
            operation,
            self.path.display(),
            next.len()
        );

        if let Err(e) = persistence::write_document(&self.path, &next).await {
            tracing::error!(
                "{} {} failed, collection left unchanged in memory: {}",
                T::collection_name(),
                operation,
                e
            );
            return Err(e);
        }

        *self.records.write().await = next;
        Ok(output)
    }
}

impl<T: Queryable> GenericStore<T> {
    /// Run a listing with merged parameters and the configured page size
    pub async fn query(&self, params: &ParamMap, page_size: usize) -> QueryResult<T> {
        let typed = QueryParams::from_map(params);
        self.find(QueryBuilder::from_params(&typed, page_size))
            .await
            .with_query_params(params.clone())
    }

    /// Run a prepared query
    pub async fn find(&self, query: QueryBuilder) -> QueryResult<T> {
        let records = self.records.read().await;
        query.apply(&records)
    }

    /// Distinct labels across the collection, in first-seen order
    pub async fn labels(&self) -> Vec<String> {
        let records = self.records.read().await;
        let mut seen = HashSet::new();
        records
            .iter()
            .flat_map(|record| record.labels().iter())
            .filter(|label| seen.insert(label.as_str()))
            .cloned()
            .collect()
    }

    /// Pages needed to list the whole collection
    pub async fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.records.read().await.len().div_ceil(page_size)
    }

    /// Whether any record was created by `user_id`
    pub async fn has_records_by_creator(&self, user_id: &str) -> bool {
        self.records
            .read()
            .await
            .iter()
            .any(|record| record.creator_id() == Some(user_id))
    }
}
