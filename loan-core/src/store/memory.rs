//! Process-local store, used by tests and throwaway sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::factory::{StoreConfig, StoreFactory};
use super::repository::{FormStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl FormStore for InMemoryStore {
    async fn save(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn load(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn clear(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// [`StoreFactory`] for the `"memory"` backend.
///
/// The connection string is ignored; every `create` returns a fresh, empty
/// store.
pub struct InMemoryStoreFactory;

#[async_trait]
impl StoreFactory for InMemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Box<dyn FormStore>, StoreError> {
        Ok(Box::new(InMemoryStore::new()))
    }
}
