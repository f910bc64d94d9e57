use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::error;
use uuid::Uuid;

use crate::dao::api_key::{
    ApiKeyRow, create_api_key, delete_api_key, get_api_key_by_id, list_api_keys,
    update_api_key_name_and_type,
};
use crate::gateway::{GatewayError, KeyStore, validate_name};
use crate::keys::{ApiKeyRecord, KeyType, generate_key, is_inactive};

/// Key store backed by the local `api_keys` table.
///
/// Mutations on the same record are serialized through a per-id lock so
/// that rapid repeated edits or deletes cannot interleave their round
/// trips.
pub struct SqliteKeyStore {
    pool: Arc<SqlitePool>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SqliteKeyStore {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            pool,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_for(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[async_trait]
impl KeyStore for SqliteKeyStore {
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, GatewayError> {
        let rows = list_api_keys(&self.pool).await.map_err(|e| {
            error!("Failed to list API keys: {}", e);
            GatewayError::store("list", e)
        })?;
        rows.iter()
            .map(|row| ApiKeyRecord::from_row(row).map_err(GatewayError::from))
            .collect()
    }

    async fn create(&self, name: &str, key_type: KeyType) -> Result<ApiKeyRecord, GatewayError> {
        validate_name(name)?;
        let row = ApiKeyRow {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            key: generate_key(),
            key_type: key_type.as_full_word().to_string(),
            usage: 0,
            created_at: Utc::now().to_rfc3339(),
        };
        create_api_key(&self.pool, &row).await.map_err(|e| {
            error!("Failed to create API key: {}", e);
            GatewayError::store("create", e)
        })?;
        Ok(ApiKeyRecord::from_row(&row)?)
    }

    async fn rename(
        &self,
        id: &str,
        new_name: &str,
        new_type: KeyType,
    ) -> Result<(), GatewayError> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        let rows = update_api_key_name_and_type(&self.pool, id, new_name, new_type.as_full_word())
            .await
            .map_err(|e| {
                error!("Failed to update API key {}: {}", id, e);
                GatewayError::store("rename", e)
            })?;
        if rows == 0 {
            return Err(GatewayError::store("rename", "no such API key"));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        let row = get_api_key_by_id(&self.pool, id)
            .await
            .map_err(|e| GatewayError::store("delete", e))?
            .ok_or_else(|| GatewayError::store("delete", "no such API key"))?;
        let record = ApiKeyRecord::from_row(&row)?;
        if is_inactive(&record) {
            return Err(GatewayError::validation(
                "Inactive API keys cannot be deleted.",
            ));
        }

        let rows = delete_api_key(&self.pool, id).await.map_err(|e| {
            error!("Failed to delete API key {}: {}", id, e);
            GatewayError::store("delete", e)
        })?;
        if rows == 0 {
            return Err(GatewayError::store("delete", "no such API key"));
        }

        // the record is gone, so its lock entry can go too
        self.locks.lock().await.remove(id);
        Ok(())
    }
}
