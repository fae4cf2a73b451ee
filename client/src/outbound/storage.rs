//! File-backed session vault.
//!
//! Persists the durable session slice as a small JSON document, standing in
//! for the browser-local storage the portal UI kept it in. A missing file is
//! the empty state, not an error.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::ports::{PersistedSession, SessionVault, SessionVaultError};

/// Vault adapter storing state in one JSON file.
pub struct FileSessionVault {
    path: PathBuf,
}

impl FileSessionVault {
    /// Build a vault over the given file path. Parent directories are
    /// created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionVault for FileSessionVault {
    fn load(&self) -> Result<PersistedSession, SessionVaultError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Ok(PersistedSession::default());
            }
            Err(error) => {
                return Err(SessionVaultError::io(format!(
                    "read {}: {error}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_str(&raw).map_err(|error| {
            SessionVaultError::serialization(format!("decode {}: {error}", self.path.display()))
        })
    }

    fn save(&self, state: &PersistedSession) -> Result<(), SessionVaultError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|error| {
                    SessionVaultError::io(format!("create {}: {error}", parent.display()))
                })?;
            }
        }
        let raw = serde_json::to_string_pretty(state).map_err(|error| {
            SessionVaultError::serialization(format!("encode session state: {error}"))
        })?;
        std::fs::write(&self.path, raw).map_err(|error| {
            SessionVaultError::io(format!("write {}: {error}", self.path.display()))
        })
    }
}
