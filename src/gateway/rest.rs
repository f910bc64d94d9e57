use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::error;

use crate::dao::api_key::ApiKeyRow;
use crate::gateway::{GatewayError, KeyStore, validate_name};
use crate::keys::{ApiKeyRecord, KeyType, generate_key, is_inactive};

/// Key store speaking the `/api-keys` HTTP surface, for collaborators
/// running against a remote playground instance.
pub struct RestKeyStore {
    http: HttpClient,
    base_url: String,
}

impl RestKeyStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api-keys", self.base_url)
    }

    /// Pull the error message out of a non-2xx `{"error": ...}` body.
    async fn store_failure(operation: &'static str, resp: reqwest::Response) -> GatewayError {
        let status = resp.status();
        let message = match resp.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status)),
            Err(_) => format!("HTTP {}", status),
        };
        error!("Store call {} failed: {}", operation, message);
        GatewayError::store(operation, message)
    }

    async fn fetch_record(&self, id: &str) -> Result<ApiKeyRecord, GatewayError> {
        self.list()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| GatewayError::store("delete", "no such API key"))
    }
}

#[async_trait]
impl KeyStore for RestKeyStore {
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, GatewayError> {
        let resp = self
            .http
            .get(self.endpoint())
            .send()
            .await
            .map_err(|e| GatewayError::store("list", e))?;
        if !resp.status().is_success() {
            return Err(Self::store_failure("list", resp).await);
        }
        let rows: Vec<ApiKeyRow> = resp.json().await.map_err(|e| GatewayError::store("list", e))?;
        rows.iter()
            .map(|row| ApiKeyRecord::from_row(row).map_err(GatewayError::from))
            .collect()
    }

    async fn create(&self, name: &str, key_type: KeyType) -> Result<ApiKeyRecord, GatewayError> {
        validate_name(name)?;
        let body = json!({
            "name": name,
            "key": generate_key(),
            "type": key_type.as_full_word(),
            "usage": 0,
        });
        let resp = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::store("create", e))?;
        if !resp.status().is_success() {
            return Err(Self::store_failure("create", resp).await);
        }
        let row: ApiKeyRow = resp.json().await.map_err(|e| GatewayError::store("create", e))?;
        Ok(ApiKeyRecord::from_row(&row)?)
    }

    async fn rename(
        &self,
        id: &str,
        new_name: &str,
        new_type: KeyType,
    ) -> Result<(), GatewayError> {
        let body = json!({
            "id": id,
            "name": new_name,
            "type": new_type.as_full_word(),
        });
        let resp = self
            .http
            .patch(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::store("rename", e))?;
        if !resp.status().is_success() {
            return Err(Self::store_failure("rename", resp).await);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        // Inactive keys are read-only; check before issuing the call.
        let record = self.fetch_record(id).await?;
        if is_inactive(&record) {
            return Err(GatewayError::validation(
                "Inactive API keys cannot be deleted.",
            ));
        }
        let resp = self
            .http
            .delete(self.endpoint())
            .json(&json!({ "id": id }))
            .send()
            .await
            .map_err(|e| GatewayError::store("delete", e))?;
        if !resp.status().is_success() {
            return Err(Self::store_failure("delete", resp).await);
        }
        Ok(())
    }
}
