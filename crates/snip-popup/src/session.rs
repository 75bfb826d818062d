//! Durable session state for the popup context.
//!
//! Two things live in the storage area: the current user (the `"user"` key,
//! read by every controller) and the auth client's own session (the
//! `"session"` key, never exposed to the rendering layer).

use snip_core::auth::{AuthError, AuthResult, AuthSession, AuthUser, SessionPersistence};

use crate::storage::{StorageArea, StorageResult};

const USER_KEY: &str = "user";
const SESSION_KEY: &str = "session";

/// Durable register holding the signed-in user across popup reloads.
///
/// A plain persisted slot: no locking, last write wins. `set(None)` clears
/// it.
pub trait UserSlot: Clone {
    fn get(&self) -> StorageResult<Option<AuthUser>>;
    fn set(&self, user: Option<&AuthUser>) -> StorageResult<()>;
}

/// `UserSlot` backed by the `"user"` key of a storage area.
#[derive(Debug, Clone)]
pub struct StoredUserSlot {
    area: StorageArea,
}

impl StoredUserSlot {
    #[must_use]
    pub const fn new(area: StorageArea) -> Self {
        Self { area }
    }
}

impl UserSlot for StoredUserSlot {
    fn get(&self) -> StorageResult<Option<AuthUser>> {
        self.area.get(USER_KEY)
    }

    fn set(&self, user: Option<&AuthUser>) -> StorageResult<()> {
        match user {
            Some(user) => self.area.set(USER_KEY, user),
            None => self.area.remove(USER_KEY),
        }
    }
}

/// Session persistence for the auth client, backed by the `"session"` key.
#[derive(Debug, Clone)]
pub struct StoredSession {
    area: StorageArea,
}

impl StoredSession {
    #[must_use]
    pub const fn new(area: StorageArea) -> Self {
        Self { area }
    }
}

impl SessionPersistence for StoredSession {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        self.area
            .get(SESSION_KEY)
            .map_err(|error| AuthError::Storage(error.to_string()))
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        self.area
            .set(SESSION_KEY, session)
            .map_err(|error| AuthError::Storage(error.to_string()))
    }

    fn clear_session(&self) -> AuthResult<()> {
        self.area
            .remove(SESSION_KEY)
            .map_err(|error| AuthError::Storage(error.to_string()))
    }
}
