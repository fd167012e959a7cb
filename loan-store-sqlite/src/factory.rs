use async_trait::async_trait;

use loan_core::store::{FormStore, StoreConfig, StoreError, StoreFactory};

use crate::repository::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`loan_core::store::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use loan_core::store::StoreRegistry;
/// use loan_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted values:
    /// * A bare file path, e.g. `"home-online.db"`. Created if missing.
    /// * `"sqlite::memory:"` for an ephemeral database.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn FormStore>, StoreError> {
        if config.connection_string.trim().is_empty() {
            return Err(StoreError::Configuration(
                "sqlite backend needs a connection_string".to_string(),
            ));
        }

        let store = SqliteStore::new(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use loan_core::store::{StoreConfig, StoreError, StoreFactory};

    use super::SqliteStoreFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn creates_in_memory_store() {
        let config = StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: "sqlite::memory:".to_string(),
        };

        let result = SqliteStoreFactory.create(&config).await;
        assert!(
            result.is_ok(),
            "failed to create in-memory store: {:#?}",
            result.err()
        );
    }

    #[tokio::test]
    async fn blank_connection_string_is_a_configuration_error() {
        let config = StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: "  ".to_string(),
        };

        assert!(matches!(
            SqliteStoreFactory.create(&config).await,
            Err(StoreError::Configuration(_))
        ));
    }
}
