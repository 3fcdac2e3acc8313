//! Integration tests for the catalog lifecycle
//!
//! Opens a ToyHaus over temporary JSON documents and drives listings,
//! creation, updates and removal through the public API.

use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use toyhaus::prelude::*;

async fn write_json(path: &Path, value: serde_json::Value) {
    tokio::fs::write(path, serde_json::to_string_pretty(&value).unwrap())
        .await
        .unwrap();
}

async fn setup_haus(page_size: usize) -> (TempDir, ToyHaus) {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path();

    write_json(
        &data.join("item.json"),
        json!([
            { "_id": "i1", "title": "Red Car", "description": "fast", "price": 20, "labels": ["On wheels"], "createdAt": 3 },
            { "_id": "i2", "title": "blue car", "description": "slow", "price": 5, "labels": ["On wheels", "Baby"], "createdAt": 1 },
            { "_id": "i3", "title": "Puzzle Box", "description": "1000 pieces", "price": 35, "labels": ["Puzzle"], "createdAt": 2 }
        ]),
    )
    .await;
    write_json(
        &data.join("toy.json"),
        json!([
            { "_id": "t1", "name": "Robot", "price": 120, "labels": ["Battery Powered"], "inStock": true, "createdAt": 1 },
            { "_id": "t2", "name": "Doll House", "price": 80, "labels": ["Doll"], "inStock": false, "createdAt": 2 }
        ]),
    )
    .await;
    write_json(
        &data.join("user.json"),
        json!([
            { "_id": "admin1", "fullname": "Admin", "username": "admin", "password": "admin", "isAdmin": true }
        ]),
    )
    .await;

    let mut config = AppConfig::default();
    config.storage = StorageConfig::new(data.display().to_string());
    config.query = QueryConfig::new(page_size);

    let haus = ToyHaus::open(config).await.unwrap();
    (dir, haus)
}

#[tokio::test]
async fn test_default_listing() {
    let (_dir, haus) = setup_haus(10).await;
    let page = haus.query::<Item>(&ParamMap::new()).await;

    assert_eq!(page.total_count, 3);
    assert_eq!(page.page_count, 1);
    let ids: Vec<&str> = page.records.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["i1", "i2", "i3"]);
    assert_eq!(page.query_params, merge(&Item::default_params(), &ParamMap::new()));
}

#[tokio::test]
async fn test_filtered_sorted_listing_from_query_string() {
    let (_dir, haus) = setup_haus(10).await;
    let overrides = parse_query_string("?txt=CAR&maxPrice=30&sortBy=price&sortDir=-1");
    let page = haus.query::<Item>(&overrides).await;

    let titles: Vec<&str> = page.records.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Red Car", "blue car"]);
    assert_eq!(page.query_params.number("sortDir"), Some(-1.0));
}

#[tokio::test]
async fn test_label_superset_and_stock_filters() {
    let (_dir, haus) = setup_haus(10).await;

    let items = haus
        .query::<Item>(&parse_query_string("labels[]=On wheels&labels[]=Baby"))
        .await;
    assert_eq!(items.total_count, 1);
    assert_eq!(items.records[0].id, "i2");

    let toys = haus.query::<Toy>(&parse_query_string("inStock=false")).await;
    assert_eq!(toys.records.len(), 1);
    assert_eq!(toys.records[0].name, "Doll House");

    let all = haus.query::<Toy>(&parse_query_string("inStock=all")).await;
    assert_eq!(all.total_count, 2);
}

#[tokio::test]
async fn test_pagination() {
    let (_dir, haus) = setup_haus(2).await;

    let first = haus.query::<Item>(&parse_query_string("pageIdx=0")).await;
    let second = haus.query::<Item>(&parse_query_string("pageIdx=1")).await;
    let beyond = haus.query::<Item>(&parse_query_string("pageIdx=5")).await;

    assert_eq!(first.records.len(), 2);
    assert_eq!(second.records.len(), 1);
    assert!(beyond.records.is_empty());
    assert_eq!(first.page_count, 2);
    assert_eq!(haus.page_count::<Item>().await, 2);
}

#[tokio::test]
async fn test_create_update_remove_persists() {
    let (dir, haus) = setup_haus(10).await;
    let admin = haus.users().store().get_by_id("admin1").await.unwrap();
    let creator = Creator::from(&admin.to_mini());

    let toy = Toy::from_body(
        &json!({ "name": "Kite", "price": "15", "labels": ["Outdoor"], "_id": "forged" }),
        Some(creator),
    )
    .unwrap();
    let created = haus.create(toy).await.unwrap();
    assert_ne!(created.id, "forged");
    assert_eq!(created.id.len(), 6);
    assert_eq!(created.price, 15.0);

    let patch = Value::Object(Toy::sanitize(&json!({ "price": 18, "inStock": false })));
    let updated = haus.toys().update(&created.id, patch).await.unwrap();
    assert_eq!(updated.price, 18.0);
    assert_eq!(updated.name, "Kite");
    assert!(!updated.in_stock);

    let err = haus.remove_user("admin1").await.unwrap_err();
    assert!(matches!(err, ToyHausError::Forbidden(_)));

    let reloaded = GenericStore::<Toy>::load(dir.path().join("toy.json")).await.unwrap();
    assert_eq!(reloaded.get_by_id(&created.id).await.unwrap(), updated);

    let removed = haus.toys().remove(&created.id).await.unwrap();
    assert_eq!(removed.id, created.id);
    assert!(haus.toys().get_by_id(&created.id).await.unwrap_err().is_not_found());
    assert_eq!(haus.remove_user("admin1").await.unwrap().username, "admin");
}

#[tokio::test]
async fn test_labels_in_first_seen_order() {
    let (_dir, haus) = setup_haus(10).await;
    assert_eq!(haus.items().labels().await, vec!["On wheels", "Baby", "Puzzle"]);
}

#[tokio::test]
async fn test_login_token_round_trip() {
    let (_dir, haus) = setup_haus(10).await;
    let user = haus
        .users()
        .login(&Credentials {
            username: "admin".to_string(),
            password: "admin".to_string(),
        })
        .await
        .unwrap();

    let token = haus.tokens().get_login_token(&user);
    assert_eq!(haus.logged_in_user(Some(&token)), Some(user));
    assert_eq!(haus.logged_in_user(Some("bogus")), None);
    assert_eq!(haus.logged_in_user(None), None);
}
