use std::sync::Arc;

use jbk_keygen::dao::api_key::{ApiKeyRow, create_api_key, get_api_key_by_id, list_api_keys};
use jbk_keygen::dao::init_db;
use jbk_keygen::gateway::{GatewayError, KeyStore, SqliteKeyStore};
use jbk_keygen::keys::{KEY_PREFIX, KEY_SUFFIX_LEN, KeyType};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

async fn setup_test_env() -> Arc<Pool<Sqlite>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create pool");
    init_db(&pool, "data/init.sql").await.expect("DB init failed");
    Arc::new(pool)
}

fn stored_row(id: &str, usage: i64, created_at: &str) -> ApiKeyRow {
    ApiKeyRow {
        id: id.to_string(),
        name: format!("key {}", id),
        key: "JBK-Key-ABcd1234EFgh5678IJkl9012".to_string(),
        key_type: "Testing".to_string(),
        usage,
        created_at: created_at.to_string(),
    }
}

#[tokio::test]
async fn test_create_assigns_token_and_zero_usage() {
    let pool = setup_test_env().await;
    let store = SqliteKeyStore::new(pool.clone());

    let record = store
        .create("Test Key #42", KeyType::Production)
        .await
        .expect("create failed");

    assert_eq!(record.name, "Test Key #42");
    assert_eq!(record.key_type, KeyType::Production);
    assert_eq!(record.usage, 0);
    assert!(record.key.starts_with(KEY_PREFIX));
    let suffix = &record.key[KEY_PREFIX.len()..];
    assert_eq!(suffix.len(), KEY_SUFFIX_LEN);
    assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));

    // stored with the full-word type
    let stored = get_api_key_by_id(&pool, &record.id)
        .await
        .expect("get failed")
        .expect("row should exist");
    assert_eq!(stored.key_type, "Production");
}

#[tokio::test]
async fn test_create_rejects_blank_names_before_any_insert() {
    let pool = setup_test_env().await;
    let store = SqliteKeyStore::new(pool.clone());

    let err = store.create("   ", KeyType::Development).await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation { .. }));

    let rows = list_api_keys(&pool).await.expect("list failed");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first_and_strictly_decoded() {
    let pool = setup_test_env().await;
    let store = SqliteKeyStore::new(pool.clone());

    create_api_key(&pool, &stored_row("a", 0, "2025-06-01T10:00:00+00:00"))
        .await
        .expect("insert failed");
    create_api_key(&pool, &stored_row("b", 0, "2025-06-02T10:00:00+00:00"))
        .await
        .expect("insert failed");

    let records = store.list().await.expect("list failed");
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);

    // a malformed stored type surfaces as a decode error, not as data
    let mut bad = stored_row("c", 0, "2025-06-03T10:00:00+00:00");
    bad.key_type = "Banana".to_string();
    create_api_key(&pool, &bad).await.expect("insert failed");

    let err = store.list().await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode { .. }));
}

#[tokio::test]
async fn test_rename_updates_both_fields_in_one_call() {
    let pool = setup_test_env().await;
    let store = SqliteKeyStore::new(pool.clone());

    create_api_key(&pool, &stored_row("r1", 0, "2025-06-01T10:00:00+00:00"))
        .await
        .expect("insert failed");

    store
        .rename("r1", "Updated key r1", KeyType::Production)
        .await
        .expect("rename failed");

    let stored = get_api_key_by_id(&pool, "r1")
        .await
        .expect("get failed")
        .expect("row should exist");
    assert_eq!(stored.name, "Updated key r1");
    assert_eq!(stored.key_type, "Production");
}

#[tokio::test]
async fn test_rename_unknown_id_is_a_store_error() {
    let pool = setup_test_env().await;
    let store = SqliteKeyStore::new(pool);

    let err = store
        .rename("ghost", "name", KeyType::Testing)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Store { operation: "rename", .. }));
}

#[tokio::test]
async fn test_delete_refuses_inactive_keys() {
    let pool = setup_test_env().await;
    let store = SqliteKeyStore::new(pool.clone());

    create_api_key(&pool, &stored_row("hot", 1500, "2025-06-01T10:00:00+00:00"))
        .await
        .expect("insert failed");

    let err = store.delete("hot").await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation { .. }));

    // the record is still there
    let stored = get_api_key_by_id(&pool, "hot").await.expect("get failed");
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_delete_removes_active_keys() {
    let pool = setup_test_env().await;
    let store = SqliteKeyStore::new(pool.clone());

    create_api_key(&pool, &stored_row("cold", 999, "2025-06-01T10:00:00+00:00"))
        .await
        .expect("insert failed");

    store.delete("cold").await.expect("delete failed");
    let stored = get_api_key_by_id(&pool, "cold").await.expect("get failed");
    assert!(stored.is_none());
}
