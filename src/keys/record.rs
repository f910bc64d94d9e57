use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dao::api_key::ApiKeyRow;

/// Environment category of a key, stored as a full word in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    Development,
    Production,
    Testing,
}

impl KeyType {
    /// Parse a stored full word, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, DecodeError> {
        match value.to_lowercase().as_str() {
            "development" => Ok(KeyType::Development),
            "production" => Ok(KeyType::Production),
            "testing" => Ok(KeyType::Testing),
            _ => Err(DecodeError::UnknownType {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_full_word(&self) -> &'static str {
        match self {
            KeyType::Development => "Development",
            KeyType::Production => "Production",
            KeyType::Testing => "Testing",
        }
    }

    pub fn short_code(&self) -> &'static str {
        match self {
            KeyType::Development => "dev",
            KeyType::Production => "prod",
            KeyType::Testing => "test",
        }
    }
}

/// Failure to convert a raw stored row into a typed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    UnknownType { value: String },
    BadTimestamp { value: String },
    NegativeUsage { value: i64 },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnknownType { value } => write!(f, "Unknown key type: {}", value),
            DecodeError::BadTimestamp { value } => write!(f, "Bad created_at timestamp: {}", value),
            DecodeError::NegativeUsage { value } => write!(f, "Negative usage counter: {}", value),
        }
    }
}

impl std::error::Error for DecodeError {}

/// One API key's stored fields, strictly typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiKeyRecord {
    pub id: String,
    pub name: String,
    pub key: String,
    pub key_type: KeyType,
    pub usage: i64,
    pub created_at: DateTime<Utc>,
}

impl ApiKeyRecord {
    /// Validate and convert a raw store row at the boundary.
    pub fn from_row(row: &ApiKeyRow) -> Result<Self, DecodeError> {
        let key_type = KeyType::parse(&row.key_type)?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|_| DecodeError::BadTimestamp {
                value: row.created_at.clone(),
            })?
            .with_timezone(&Utc);
        if row.usage < 0 {
            return Err(DecodeError::NegativeUsage { value: row.usage });
        }
        Ok(ApiKeyRecord {
            id: row.id.clone(),
            name: row.name.clone(),
            key: row.key.clone(),
            key_type,
            usage: row.usage,
            created_at,
        })
    }
}
