use std::sync::RwLock;

use super::ProfileStorage;
use crate::error::ApiError;

/// Process-lifetime storage, the equivalent of a tab that is never reloaded.
#[derive(Default)]
pub struct MemoryStorage {
    value: RwLock<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `value`, as if a previous run had saved it.
    pub fn with_value(value: impl Into<String>) -> Self {
        MemoryStorage {
            value: RwLock::new(Some(value.into())),
        }
    }
}

fn poisoned() -> ApiError {
    ApiError::Storage("memory storage lock poisoned".to_string())
}

impl ProfileStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, ApiError> {
        Ok(self.value.read().map_err(|_| poisoned())?.clone())
    }

    fn save(&self, value: &str) -> Result<(), ApiError> {
        *self.value.write().map_err(|_| poisoned())? = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), ApiError> {
        *self.value.write().map_err(|_| poisoned())? = None;
        Ok(())
    }
}
