use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ProfileStorage;
use crate::error::ApiError;

/// Keeps the profile in a single JSON file.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileStorage {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, ApiError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApiError::Storage(format!(
                "failed to read '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, value: &str) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::Storage(format!("failed to create '{}': {}", parent.display(), e))
            })?;
        }
        fs::write(&self.path, value).map_err(|e| {
            ApiError::Storage(format!("failed to write '{}': {}", self.path.display(), e))
        })?;
        debug!("Saved session profile to '{}'", self.path.display());
        Ok(())
    }

    fn remove(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(format!(
                "failed to remove '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }
}
