use serde::{Deserialize, Serialize};

/// `POST /api-keys` body. The caller supplies the secret token and the
/// usage counter verbatim; the store assigns id and created_at.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateApiKeyRequest {
    pub name: String,
    pub key: String,
    #[serde(rename = "type")]
    pub key_type: String,
    #[serde(default)]
    pub usage: i64,
}

/// `DELETE /api-keys` body. `id` is optional so that its absence maps to
/// a 400 rather than a deserialization failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteApiKeyRequest {
    pub id: Option<String>,
}

/// `PATCH /api-keys` body. `type` is accepted alongside `name` so the
/// route matches what the playground's rename flow actually sends.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateApiKeyRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub key_type: Option<String>,
}
