use serde::{Deserialize, Serialize};
use sqlx::{Result, SqlitePool};

/// Raw `api_keys` row as stored. Decoding into the typed domain record
/// happens at the gateway boundary, not here.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ApiKeyRow {
    pub id: String,
    pub name: String,
    pub key: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub key_type: String,
    pub usage: i64,
    pub created_at: String,
}

/// Create a new API key row (async)
pub async fn create_api_key(pool: &SqlitePool, row: &ApiKeyRow) -> Result<u64> {
    let res = sqlx::query(
        r#"
        INSERT INTO api_keys (id, name, key, type, usage, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
    "#,
    )
    .bind(&row.id)
    .bind(&row.name)
    .bind(&row.key)
    .bind(&row.key_type)
    .bind(row.usage)
    .bind(&row.created_at)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

/// Read an API key row by id (async)
pub async fn get_api_key_by_id(pool: &SqlitePool, id: &str) -> Result<Option<ApiKeyRow>> {
    let row = sqlx::query_as::<_, ApiKeyRow>("SELECT * FROM api_keys WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// List all API key rows, newest first (async)
pub async fn list_api_keys(pool: &SqlitePool) -> Result<Vec<ApiKeyRow>> {
    let rows = sqlx::query_as::<_, ApiKeyRow>(
        "SELECT * FROM api_keys ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Update the name of an API key row by id (async)
pub async fn update_api_key_name(pool: &SqlitePool, id: &str, name: &str) -> Result<u64> {
    let res = sqlx::query("UPDATE api_keys SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

/// Update both name and type of an API key row in a single statement (async)
pub async fn update_api_key_name_and_type(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    key_type: &str,
) -> Result<u64> {
    let res = sqlx::query("UPDATE api_keys SET name = ?, type = ? WHERE id = ?")
        .bind(name)
        .bind(key_type)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

/// Delete an API key row by id (async)
pub async fn delete_api_key(pool: &SqlitePool, id: &str) -> Result<u64> {
    let res = sqlx::query("DELETE FROM api_keys WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
