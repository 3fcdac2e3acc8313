use super::core::GenericStore;
use super::persistence;
use crate::errors::StoreError;
use crate::traits::{Queryable, Record, StoreObject};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use type_mapping::ParamMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Widget {
    #[serde(rename = "_id", default)]
    id: String,
    title: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    updated_at: i64,
}

impl Record for Widget {
    fn collection_name() -> &'static str {
        "Widget"
    }
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn created_at(&self) -> i64 {
        self.created_at
    }
    fn stamp_created(&mut self, at: i64) {
        self.created_at = at;
        self.updated_at = at;
    }
    fn stamp_updated(&mut self, at: i64) {
        self.updated_at = at;
    }
}

impl Queryable for Widget {
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> Option<&str> {
        None
    }
    fn price(&self) -> f64 {
        self.price
    }
    fn labels(&self) -> &[String] {
        &self.labels
    }
    fn creator_id(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

fn widget(title: &str, price: f64) -> Widget {
    Widget {
        id: String::new(),
        title: title.to_string(),
        price,
        labels: Vec::new(),
        owner: None,
        created_at: 0,
        updated_at: 0,
    }
}

async fn empty_store(dir: &tempfile::TempDir) -> (GenericStore<Widget>, PathBuf) {
    let path = dir.path().join("widget.json");
    persistence::create_document::<Widget>(&path, &[]).await.unwrap();
    (GenericStore::load(&path).await.unwrap(), path)
}

#[tokio::test]
async fn test_load_missing_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = GenericStore::<Widget>::load(dir.path().join("missing.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Persistence { .. }));
}

#[tokio::test]
async fn test_load_malformed_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widget.json");
    tokio::fs::write(&path, "[{\"_id\": \"a\", ").await.unwrap();

    let err = GenericStore::<Widget>::load(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[tokio::test]
async fn test_load_duplicate_ids_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widget.json");
    let doc = json!([
        {"_id": "same", "title": "a"},
        {"_id": "same", "title": "b"}
    ]);
    tokio::fs::write(&path, doc.to_string()).await.unwrap();

    let err = GenericStore::<Widget>::load(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[tokio::test]
async fn test_create_then_get_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = empty_store(&dir).await;

    let created = store.create(widget("Spinner", 12.0)).await.unwrap();
    assert_eq!(created.id.len(), 6);
    assert!(created.id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(created.created_at > 0);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_persists_pretty_document() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = empty_store(&dir).await;

    let created = store.create(widget("Spinner", 12.0)).await.unwrap();

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(content.contains("\n  {"), "expected 2-space indent: {}", content);

    let reloaded = GenericStore::<Widget>::load(&path).await.unwrap();
    assert_eq!(reloaded.get_by_id(&created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_remove_then_get_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = empty_store(&dir).await;

    let created = store.create(widget("Yo-yo", 3.0)).await.unwrap();
    let removed = store.remove(&created.id).await.unwrap();
    assert_eq!(removed, created);

    let err = store.get_by_id(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_remove_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = empty_store(&dir).await;
    assert!(store.remove("nope").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_update_merges_fields_and_refreshes_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = empty_store(&dir).await;

    let mut original = widget("Kite", 20.0);
    original.labels = vec!["Outdoor".to_string()];
    let created = store.create(original).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = store
        .update(
            &created.id,
            json!({"price": 25.0, "_id": "hijack", "createdAt": 1}),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Kite");
    assert_eq!(updated.labels, vec!["Outdoor".to_string()]);
    assert_eq!(updated.price, 25.0);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(store.get_by_id(&created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_missing_leaves_collection_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = empty_store(&dir).await;
    store.create(widget("Ball", 2.0)).await.unwrap();

    let before = store.snapshot().await;
    let document_before = tokio::fs::read_to_string(&path).await.unwrap();

    let err = store.update("nope", json!({"price": 1.0})).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.snapshot().await, before);
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), document_before);
}

#[tokio::test]
async fn test_update_rejects_invalid_patches() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = empty_store(&dir).await;
    let created = store.create(widget("Ball", 2.0)).await.unwrap();

    let err = store.update(&created.id, json!(["price"])).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let err = store
        .update(&created.id, json!({"price": "cheap"}))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
    assert_eq!(store.get_by_id(&created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_failed_rewrite_keeps_memory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = empty_store(&dir).await;
    store.create(widget("Ball", 2.0)).await.unwrap();
    let before = store.snapshot().await;

    // Replace the document with a directory so the rewrite fails
    tokio::fs::remove_file(&path).await.unwrap();
    tokio::fs::create_dir(&path).await.unwrap();

    let err = store.create(widget("Top", 1.0)).await.unwrap_err();
    assert!(matches!(err, StoreError::Persistence { .. }));
    assert_eq!(store.snapshot().await, before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_keep_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = empty_store(&dir).await;
    // One-character ids force the uniqueness retry loop to do work
    let store = Arc::new(store.with_id_length(1));

    let handles: Vec<_> = (0..40)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(widget(&format!("w{}", i), i as f64)).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let created = handle.await.unwrap().unwrap();
        assert!(ids.insert(created.id));
    }

    assert_eq!(store.count().await.unwrap(), 40);
    let reloaded = GenericStore::<Widget>::load(&path).await.unwrap();
    assert_eq!(reloaded.count().await.unwrap(), 40);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_create_checked_rejects_concurrent_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let (store, path) = empty_store(&dir).await;
    let store = Arc::new(store);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .create_checked(widget("Unique", 1.0), |records| {
                        if records.iter().any(|w| w.title == "Unique") {
                            Err(StoreError::InvalidInput("taken".to_string()))
                        } else {
                            Ok(())
                        }
                    })
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) => assert!(matches!(e, StoreError::InvalidInput(_))),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.count().await.unwrap(), 1);
    let reloaded = GenericStore::<Widget>::load(&path).await.unwrap();
    assert_eq!(reloaded.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_exhausted_id_space_fails_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let taken: Vec<Widget> = ('0'..='9')
        .chain('a'..='z')
        .chain('A'..='Z')
        .map(|c| {
            let mut w = widget("Filler", 1.0);
            w.id = c.to_string();
            w
        })
        .collect();
    let store = GenericStore::from_records(dir.path().join("widget.json"), taken)
        .unwrap()
        .with_id_length(1);

    let err = store.create(widget("One more", 1.0)).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
    assert_eq!(store.count().await.unwrap(), 62);
    assert!(!dir.path().join("widget.json").exists());
}

#[tokio::test]
async fn test_zero_id_length_still_assigns_ids() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = empty_store(&dir).await;
    let store = store.with_id_length(0);

    let first = store.create(widget("A", 1.0)).await.unwrap();
    let second = store.create(widget("B", 1.0)).await.unwrap();
    assert_eq!(first.id.len(), 1);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_query_labels_and_creators() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = empty_store(&dir).await;

    for (title, price, labels, owner) in [
        ("a", 5.0, vec!["Doll", "Art"], Some("u1")),
        ("b", 1.0, vec!["Art"], None),
        ("c", 3.0, vec!["Puzzle", "Doll"], None),
    ] {
        let mut w = widget(title, price);
        w.labels = labels.into_iter().map(String::from).collect();
        w.owner = owner.map(String::from);
        store.create(w).await.unwrap();
    }

    assert_eq!(store.labels().await, vec!["Doll", "Art", "Puzzle"]);
    assert!(store.has_records_by_creator("u1").await);
    assert!(!store.has_records_by_creator("u2").await);
    let first = store.snapshot().await.remove(0);
    assert!(store.exists(&first.id).await);
    assert!(!store.exists("nope").await);
    assert_eq!(store.page_count(2).await, 2);

    let mut params = ParamMap::new();
    params.insert("sortBy", "price");
    params.insert("sortDir", -1);
    let result = store.query(&params, 10).await;
    let titles: Vec<&str> = result.records.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c", "b"]);
    assert_eq!(result.query_params, params);
}
