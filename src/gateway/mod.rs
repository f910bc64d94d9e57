//! Store gateway: the single seam between the UI layer and wherever the
//! key records actually live. The view only ever talks to a `KeyStore`.

mod rest;
mod sqlite;

pub use rest::RestKeyStore;
pub use sqlite::SqliteKeyStore;

use async_trait::async_trait;

use crate::keys::{ApiKeyRecord, DecodeError, KeyType};

/// Errors surfaced by a key store. Validation failures are local
/// precondition checks and never reach the store itself.
#[derive(Debug)]
pub enum GatewayError {
    /// A local precondition failed (empty name, delete on an inactive key).
    Validation { message: String },
    /// The store rejected or failed an operation. No retry is attempted.
    Store {
        operation: &'static str,
        message: String,
    },
    /// The store returned a row that does not fit the record schema.
    Decode { source: DecodeError },
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation {
            message: message.into(),
        }
    }

    pub fn store(operation: &'static str, message: impl ToString) -> Self {
        GatewayError::Store {
            operation,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Validation { message } => write!(f, "Validation error: {}", message),
            GatewayError::Store { operation, message } => {
                write!(f, "Store error during {}: {}", operation, message)
            }
            GatewayError::Decode { source } => write!(f, "Decode error: {}", source),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<DecodeError> for GatewayError {
    fn from(source: DecodeError) -> Self {
        GatewayError::Decode { source }
    }
}

/// The four operations every key store backend provides. Implementations
/// are last-write-wins: no retries, no optimistic concurrency.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Fetch all records, newest first.
    async fn list(&self) -> Result<Vec<ApiKeyRecord>, GatewayError>;

    /// Create a record with a freshly generated secret token, zero usage
    /// and the current time as `created_at`.
    async fn create(&self, name: &str, key_type: KeyType) -> Result<ApiKeyRecord, GatewayError>;

    /// Update name and type together in a single store call.
    async fn rename(
        &self,
        id: &str,
        new_name: &str,
        new_type: KeyType,
    ) -> Result<(), GatewayError>;

    /// Delete a record. Refused locally while the record is inactive.
    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}

/// Shared create precondition: the name must contain something visible.
pub(crate) fn validate_name(name: &str) -> Result<(), GatewayError> {
    if name.trim().is_empty() {
        return Err(GatewayError::validation("Key Name cannot be empty."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_fail_validation() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("\t\n").is_err());
        assert!(validate_name("Test Key #42").is_ok());
    }
}
