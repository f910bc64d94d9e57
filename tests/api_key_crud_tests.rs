use jbk_keygen::dao::api_key::{
    ApiKeyRow, create_api_key, delete_api_key, get_api_key_by_id, list_api_keys,
    update_api_key_name, update_api_key_name_and_type,
};
use jbk_keygen::dao::init_db;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Fresh in-memory database per test.
async fn setup_test_env() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create pool");
    init_db(&pool, "data/init.sql").await.expect("DB init failed");
    pool
}

fn sample_row(id: &str, name: &str, created_at: &str) -> ApiKeyRow {
    ApiKeyRow {
        id: id.to_string(),
        name: name.to_string(),
        key: "JBK-Key-ABcd1234EFgh5678IJkl9012".to_string(),
        key_type: "Development".to_string(),
        usage: 0,
        created_at: created_at.to_string(),
    }
}

#[tokio::test]
async fn test_api_key_crud_operations() {
    let pool = setup_test_env().await;

    let row = sample_row("crud-1", "crud test key", "2025-06-01T10:00:00+00:00");

    // Test Create
    let rows = create_api_key(&pool, &row).await.expect("create_api_key failed");
    assert_eq!(rows, 1);

    // Test Get by ID
    let fetched = get_api_key_by_id(&pool, &row.id)
        .await
        .expect("get_api_key_by_id failed")
        .expect("row should exist");
    assert_eq!(fetched.name, row.name);
    assert_eq!(fetched.key_type, "Development");
    assert_eq!(fetched.usage, 0);

    // Test Update (name only)
    let updated = update_api_key_name(&pool, &row.id, "renamed key")
        .await
        .expect("update_api_key_name failed");
    assert_eq!(updated, 1);

    // Test Update (name and type together)
    let updated = update_api_key_name_and_type(&pool, &row.id, "renamed again", "Production")
        .await
        .expect("update_api_key_name_and_type failed");
    assert_eq!(updated, 1);

    let fetched = get_api_key_by_id(&pool, &row.id)
        .await
        .expect("get_api_key_by_id failed")
        .expect("row should exist");
    assert_eq!(fetched.name, "renamed again");
    assert_eq!(fetched.key_type, "Production");

    // Test Delete
    let deleted = delete_api_key(&pool, &row.id).await.expect("delete_api_key failed");
    assert_eq!(deleted, 1);
    let gone = get_api_key_by_id(&pool, &row.id)
        .await
        .expect("get_api_key_by_id failed");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let pool = setup_test_env().await;

    create_api_key(&pool, &sample_row("old", "old key", "2025-06-01T10:00:00+00:00"))
        .await
        .expect("create failed");
    create_api_key(&pool, &sample_row("new", "new key", "2025-06-03T10:00:00+00:00"))
        .await
        .expect("create failed");
    create_api_key(&pool, &sample_row("mid", "mid key", "2025-06-02T10:00:00+00:00"))
        .await
        .expect("create failed");

    let rows = list_api_keys(&pool).await.expect("list_api_keys failed");
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[tokio::test]
async fn test_updates_on_unknown_id_affect_no_rows() {
    let pool = setup_test_env().await;

    let updated = update_api_key_name_and_type(&pool, "nope", "name", "Testing")
        .await
        .expect("update failed");
    assert_eq!(updated, 0);

    let deleted = delete_api_key(&pool, "nope").await.expect("delete failed");
    assert_eq!(deleted, 0);
}
