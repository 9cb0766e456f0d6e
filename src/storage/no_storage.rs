use super::ProfileStorage;
use crate::error::ApiError;

/// Persistence switched off: nothing is ever loaded and writes are dropped.
pub struct NoStorage;

impl NoStorage {
    pub fn new() -> Self {
        NoStorage
    }
}

impl Default for NoStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStorage for NoStorage {
    fn load(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }

    fn save(&self, _value: &str) -> Result<(), ApiError> {
        Ok(())
    }

    fn remove(&self) -> Result<(), ApiError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_storage_forgets_everything() {
        let storage = NoStorage::new();
        storage.save("{}").unwrap();
        assert_eq!(storage.load().unwrap(), None);
        assert!(!storage.is_enabled());
    }
}
