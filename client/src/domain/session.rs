//! The client-side session: who is logged in, and with what token.
//!
//! The store is the single owner of session state. Everything else (the
//! navigation guard, the HTTP gateway, the view services) reads snapshots or
//! asks the store to transition. The durable slice (token and intended route)
//! lives behind the [`SessionVault`] port so it survives restarts; vault
//! failures degrade to an ephemeral session rather than failing the caller,
//! keeping every operation total.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

use crate::domain::ports::{PersistedSession, SessionVault};
use crate::models::Role;

/// Identity attached to an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Backend account identifier.
    pub id: i64,
    /// Access role used by the navigation guard.
    pub role: Role,
}

/// Immutable snapshot of the session at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<AuthenticatedUser>,
}

impl Session {
    /// Whether a bearer token is held. A session with no token is never
    /// considered logged in.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token, if one is held.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The authenticated identity, when known.
    ///
    /// After a restart the token is restored from the vault but the identity
    /// is not; role-gated navigation then falls through to the unauthorized
    /// view until the user logs in again.
    pub fn user(&self) -> Option<AuthenticatedUser> {
        self.user
    }

    /// The session's role, when the identity is known.
    pub fn role(&self) -> Option<Role> {
        self.user.map(|user| user.role)
    }
}

/// Process-wide owner of the current session.
pub struct SessionStore {
    inner: RwLock<Session>,
    vault: Arc<dyn SessionVault>,
}

impl SessionStore {
    /// Build a store over the given vault, restoring any persisted token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use client::domain::ports::InMemorySessionVault;
    /// use client::domain::SessionStore;
    ///
    /// let store = SessionStore::restore(Arc::new(InMemorySessionVault::new()));
    /// assert!(!store.current().is_logged_in());
    /// ```
    pub fn restore(vault: Arc<dyn SessionVault>) -> Self {
        let token = match vault.load() {
            Ok(state) => state.token,
            Err(error) => {
                warn!(%error, "session vault unreadable; starting an ephemeral session");
                None
            }
        };
        Self {
            inner: RwLock::new(Session { token, user: None }),
            vault,
        }
    }

    /// Snapshot the current session.
    pub fn current(&self) -> Session {
        self.inner.read().clone()
    }

    /// The bearer token, if one is held.
    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    /// The authenticated identity, when known.
    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        self.inner.read().user
    }

    /// Whether a bearer token is held.
    pub fn is_logged_in(&self) -> bool {
        self.inner.read().token.is_some()
    }

    /// Record a successful login and persist the token.
    pub fn login(&self, token: String, user: AuthenticatedUser) {
        {
            let mut session = self.inner.write();
            session.token = Some(token.clone());
            session.user = Some(user);
        }
        self.persist_token(Some(token));
    }

    /// Clear the session. Side effect only; no network call is made.
    pub fn logout(&self) {
        {
            let mut session = self.inner.write();
            session.token = None;
            session.user = None;
        }
        self.persist_token(None);
    }

    /// Atomically clear an authenticated session, reporting whether this call
    /// performed the transition.
    ///
    /// This is the single-shot gate for 401 recovery: when several in-flight
    /// requests fail at once, exactly one caller observes `true` and runs the
    /// redirect; the rest see a session that is already cleared.
    pub fn invalidate(&self) -> bool {
        let had_token = {
            let mut session = self.inner.write();
            let had_token = session.token.is_some();
            session.token = None;
            session.user = None;
            had_token
        };
        if had_token {
            self.persist_token(None);
        }
        had_token
    }

    /// Persist the route the user was heading to before a login redirect.
    pub fn remember_intended(&self, path: &str) {
        self.update_vault(|state| state.intended_route = Some(path.to_owned()));
    }

    /// Consume the persisted intended route, if one was recorded.
    pub fn take_intended(&self) -> Option<String> {
        let mut intended = None;
        self.update_vault(|state| intended = state.intended_route.take());
        intended
    }

    fn persist_token(&self, token: Option<String>) {
        self.update_vault(|state| state.token = token);
    }

    fn update_vault(&self, apply: impl FnOnce(&mut PersistedSession)) {
        let mut state = match self.vault.load() {
            Ok(state) => state,
            Err(error) => {
                warn!(%error, "session vault unreadable; rewriting from scratch");
                PersistedSession::default()
            }
        };
        apply(&mut state);
        if let Err(error) = self.vault.save(&state) {
            warn!(%error, "failed to persist session state");
        }
    }
}
