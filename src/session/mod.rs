//! Session Management
//!
//! The authenticated identity of the dashboard: a bearer token plus the
//! user profile it belongs to. The pair is held in memory and mirrored to a
//! durable [`SessionStore`] under two keys that are always written and
//! cleared together.
//!
//! ## Lifecycle
//!
//! 1. [`SessionManager::restore`] loads the pair at startup
//! 2. [`SessionManager::establish`] saves it after login/register
//! 3. [`SessionManager::clear`] drops it on logout

mod store;

pub use store::{FileStore, MemoryStore, SessionStore, StoreError, StoreResult};

use crate::api::User;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "dupetube_token";

/// Storage key for the serialized user profile
pub const USER_KEY: &str = "dupetube_user";

/// An authenticated identity
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Owns the in-memory session and its persistence boundary
pub struct SessionManager {
    store: Box<dyn SessionStore>,
    current: Option<Session>,
}

impl SessionManager {
    /// Load the persisted session, if a complete one exists.
    ///
    /// A store holding only one of the two keys, or a user record that does
    /// not parse, yields no session and both keys are removed.
    pub fn restore(store: Box<dyn SessionStore>) -> Self {
        let current = match Self::load(store.as_ref()) {
            Ok(current) => current,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored session");
                None
            }
        };

        if current.is_none() {
            if let Err(e) = store.remove_items(&[TOKEN_KEY, USER_KEY]) {
                tracing::warn!(error = %e, "Failed to clear incomplete session");
            }
        } else {
            tracing::info!("Restored stored session");
        }

        Self { store, current }
    }

    fn load(store: &dyn SessionStore) -> StoreResult<Option<Session>> {
        let token = store.get(TOKEN_KEY)?;
        let user = store.get(USER_KEY)?;

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };

        if token.is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<User>(&user) {
            Ok(user) => Ok(Some(Session { token, user })),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user profile is unreadable");
                Ok(None)
            }
        }
    }

    /// Current session, if authenticated
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the session with a new token/user pair.
    ///
    /// The in-memory session is updated even when persisting fails; the
    /// error is returned so the caller can report it.
    pub fn establish(&mut self, token: String, user: User) -> StoreResult<()> {
        let serialized = serde_json::to_string(&user)?;
        self.current = Some(Session { token, user });

        let token = self.token().unwrap_or_default();
        self.store
            .set_items(&[(TOKEN_KEY, token), (USER_KEY, serialized.as_str())])
    }

    /// Drop the session from memory and from the store
    pub fn clear(&mut self) -> StoreResult<()> {
        self.current = None;
        self.store.remove_items(&[TOKEN_KEY, USER_KEY])
    }
}
