//! Driven port for the persisted slice of the session.
//!
//! Exactly two strings survive a restart: the bearer token and the route the
//! user was heading to when a login redirect interrupted them. The session
//! store is the only caller; adapters (file-backed in
//! [`crate::outbound::storage`], in-memory below) own the storage details.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::define_port_error;

/// The durable slice of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    /// Bearer token from the last successful login, if any.
    #[serde(default)]
    pub token: Option<String>,
    /// Route the user intended to reach before being sent to login.
    #[serde(default)]
    pub intended_route: Option<String>,
}

define_port_error! {
    /// Errors surfaced by session persistence adapters.
    pub enum SessionVaultError {
        /// Underlying storage could not be read or written.
        Io { message: String } =>
            "session storage failed: {message}",
        /// Stored state could not be encoded or decoded.
        Serialization { message: String } =>
            "session state serialization failed: {message}",
    }
}

/// Port for loading and saving the durable session slice.
///
/// Operations are synchronous: the navigation guard must be able to record an
/// intended route without suspending mid-transition.
#[cfg_attr(test, mockall::automock)]
pub trait SessionVault: Send + Sync {
    /// Load the persisted state, or the empty default when nothing is stored.
    fn load(&self) -> Result<PersistedSession, SessionVaultError>;

    /// Replace the persisted state.
    fn save(&self, state: &PersistedSession) -> Result<(), SessionVaultError>;
}

/// In-memory vault used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemorySessionVault {
    state: Mutex<PersistedSession>,
}

impl InMemorySessionVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vault pre-seeded with state, as if left by an earlier run.
    pub fn seeded(state: PersistedSession) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl SessionVault for InMemorySessionVault {
    fn load(&self) -> Result<PersistedSession, SessionVaultError> {
        Ok(self.state.lock().clone())
    }

    fn save(&self, state: &PersistedSession) -> Result<(), SessionVaultError> {
        *self.state.lock() = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn in_memory_vault_round_trips_state() {
        let vault = InMemorySessionVault::new();
        let state = PersistedSession {
            token: Some("tok".to_owned()),
            intended_route: Some("/claims".to_owned()),
        };
        vault.save(&state).expect("save succeeds");
        assert_eq!(vault.load().expect("load succeeds"), state);
    }

    #[test]
    fn empty_vault_loads_the_default() {
        let vault = InMemorySessionVault::new();
        assert_eq!(
            vault.load().expect("load succeeds"),
            PersistedSession::default()
        );
    }
}
