pub mod app_config;
pub mod file_store;
pub mod pg_store;
pub mod redis_store;
pub mod seed;

use app_config::{StorageBackend, StorageConfig};
use horizon_core::{LedgerStore, MemoryStore, StoreError};
use std::sync::Arc;

pub use file_store::FileStore;
pub use pg_store::PostgresStore;
pub use redis_store::RedisStore;

/// Build the storage engine named in config
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn LedgerStore>, StoreError> {
    let store: Arc<dyn LedgerStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::open(&config.data_dir).await?),
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| StoreError::backend("storage.redis_url is required for the redis backend"))?;
            Arc::new(RedisStore::new(url, &config.redis_prefix)?)
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| StoreError::backend("storage.database_url is required for the postgres backend"))?;
            Arc::new(PostgresStore::connect(url).await?)
        }
    };
    tracing::info!("Using {} ledger store", store.name());
    Ok(store)
}
