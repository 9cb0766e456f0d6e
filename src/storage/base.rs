use std::sync::Arc;

use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage, no_storage::NoStorage};
use crate::config::StorageConfig;
use crate::error::ApiError;

/// Durable storage for the last known user profile.
///
/// Synchronous on purpose: hydration runs before any network call. Values are
/// raw strings so the session store decides what counts as malformed.
pub trait ProfileStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>, ApiError>;
    fn save(&self, value: &str) -> Result<(), ApiError>;
    fn remove(&self) -> Result<(), ApiError>;
    fn is_enabled(&self) -> bool {
        // NoStorage returns false so logs can say persistence is off
        true
    }
}

/// Creates a concrete storage implementation based on the StorageConfig.
pub fn create_storage(config: &StorageConfig) -> Arc<dyn ProfileStorage> {
    match config {
        StorageConfig::File { path } => {
            info!("Persisting session profile to '{}'", path);
            Arc::new(FileStorage::new(path))
        }
        StorageConfig::Memory => {
            info!("Session profile kept in memory only");
            Arc::new(MemoryStorage::new())
        }
        StorageConfig::Disabled => {
            info!("Session profile persistence is disabled. Using NoStorage.");
            Arc::new(NoStorage::new())
        }
    }
}
