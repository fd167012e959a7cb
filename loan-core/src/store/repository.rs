use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Key-value persistence for wizard drafts.
///
/// A value read back with `load` is exactly the value last passed to `save`
/// for that key. Clearing a key that was never saved is not an error.
#[async_trait]
pub trait FormStore: Send + Sync {
    async fn save(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    async fn load(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    async fn clear(
        &self,
        key: &str,
    ) -> Result<(), StoreError>;
}
