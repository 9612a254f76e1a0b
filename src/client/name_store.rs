//! Persisted display name.
//!
//! The widget remembers the user's display name across runs, never
//! expiring it. [`FileNameStore`] keeps it in a small JSON document;
//! [`MemoryNameStore`] keeps it in memory for tests and ephemeral runs.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::domain::DisplayName;
use crate::error::ChatError;

/// Storage for the display name.
pub trait NameStore {
    /// Returns the stored name, or `None` if nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::NameStore`] if the storage cannot be read.
    fn load(&self) -> Result<Option<DisplayName>, ChatError>;

    /// Persists `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::NameStore`] if the storage cannot be written.
    fn store(&self, name: &DisplayName) -> Result<(), ChatError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredName {
    name: String,
}

/// JSON file holding `{"name": "..."}`.
#[derive(Debug, Clone)]
pub struct FileNameStore {
    path: PathBuf,
}

impl FileNameStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NameStore for FileNameStore {
    fn load(&self) -> Result<Option<DisplayName>, ChatError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ChatError::NameStore(format!(
                    "{}: {e}",
                    self.path.display()
                )));
            }
        };
        let stored: StoredName = serde_json::from_str(&raw)?;
        Ok(DisplayName::parse(&stored.name).ok())
    }

    fn store(&self, name: &DisplayName) -> Result<(), ChatError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChatError::NameStore(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string(&StoredName {
            name: name.to_string(),
        })?;
        std::fs::write(&self.path, json)
            .map_err(|e| ChatError::NameStore(format!("{}: {e}", self.path.display())))
    }
}

/// In-memory store; forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryNameStore {
    name: Mutex<Option<DisplayName>>,
}

impl NameStore for MemoryNameStore {
    fn load(&self) -> Result<Option<DisplayName>, ChatError> {
        self.name
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| ChatError::NameStore("name lock poisoned".to_string()))
    }

    fn store(&self, name: &DisplayName) -> Result<(), ChatError> {
        let mut guard = self
            .name
            .lock()
            .map_err(|_| ChatError::NameStore("name lock poisoned".to_string()))?;
        *guard = Some(name.clone());
        Ok(())
    }
}
