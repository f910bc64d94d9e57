use axum::{http::StatusCode, response::Json};
use chrono::Utc;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::error;
use uuid::Uuid;

use crate::dao::SQLITE_POOL;
use crate::dao::api_key::{
    ApiKeyRow, create_api_key as insert_api_key, delete_api_key as remove_api_key, list_api_keys,
    update_api_key_name, update_api_key_name_and_type,
};
use crate::web::dto::api_key_dto::*;

type ApiResponse = (StatusCode, Json<Value>);

fn pool() -> Result<&'static SqlitePool, ApiResponse> {
    SQLITE_POOL.get().map(|p| p.as_ref()).ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "database not initialized" })),
    ))
}

fn store_error(context: &str, e: sqlx::Error) -> ApiResponse {
    error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

/// `GET /api-keys`: all rows, newest first.
pub async fn list_all_api_keys() -> ApiResponse {
    let pool = match pool() {
        Ok(pool) => pool,
        Err(resp) => return resp,
    };
    match list_api_keys(pool).await {
        Ok(rows) => (StatusCode::OK, Json(json!(rows))),
        Err(e) => store_error("Failed to list API keys", e),
    }
}

/// `POST /api-keys`: insert the supplied fields, assign id/created_at.
pub async fn create_new_api_key(Json(request): Json<CreateApiKeyRequest>) -> ApiResponse {
    let pool = match pool() {
        Ok(pool) => pool,
        Err(resp) => return resp,
    };
    let row = ApiKeyRow {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        key: request.key,
        key_type: request.key_type,
        usage: request.usage,
        created_at: Utc::now().to_rfc3339(),
    };
    match insert_api_key(pool, &row).await {
        Ok(_) => (StatusCode::OK, Json(json!(row))),
        Err(e) => store_error("Failed to create API key", e),
    }
}

/// `DELETE /api-keys` with body `{id}`.
pub async fn delete_existing_api_key(Json(request): Json<DeleteApiKeyRequest>) -> ApiResponse {
    let Some(id) = request.id.filter(|id| !id.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing id" })),
        );
    };
    let pool = match pool() {
        Ok(pool) => pool,
        Err(resp) => return resp,
    };
    match remove_api_key(pool, &id).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => store_error("Failed to delete API key", e),
    }
}

/// `PATCH /api-keys` with body `{id, name, type?}`. Updates the name,
/// and the type as well when one is supplied.
pub async fn update_existing_api_key(Json(request): Json<UpdateApiKeyRequest>) -> ApiResponse {
    let id = request.id.filter(|v| !v.trim().is_empty());
    let name = request.name.filter(|v| !v.trim().is_empty());
    let (Some(id), Some(name)) = (id, name) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing id or name" })),
        );
    };
    let pool = match pool() {
        Ok(pool) => pool,
        Err(resp) => return resp,
    };
    let result = match request.key_type {
        Some(key_type) => update_api_key_name_and_type(pool, &id, &name, &key_type).await,
        None => update_api_key_name(pool, &id, &name).await,
    };
    match result {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => store_error("Failed to update API key", e),
    }
}
