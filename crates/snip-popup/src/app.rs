//! Popup wiring: the one struct the rendering layer drives.

use thiserror::Error;

use snip_core::auth::{AuthError, AuthService, AuthUser, SignUpOutcome};
use snip_core::models::{Note, NoteId};
use snip_core::store::{RemoteNoteStore, StoreError};

use crate::auth::AuthController;
use crate::bridge::BackgroundBridge;
use crate::notes::NoteSyncController;
use crate::session::UserSlot;

#[derive(Debug, Error)]
pub enum PopupError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The popup's state machine: auth on one side, note sync on the other.
///
/// The note cache is refreshed in exactly two places: right after a session
/// is established (`init`, `login`, `signup` with an immediate session) and
/// in the explicit `reload` action. Cache mutations never schedule another
/// fetch.
pub struct PopupApp<A, S, U, B> {
    auth: AuthController<A, U, B>,
    notes: NoteSyncController<S, U>,
}

impl<A, S, U, B> PopupApp<A, S, U, B>
where
    A: AuthService,
    S: RemoteNoteStore,
    U: UserSlot,
    B: BackgroundBridge,
{
    pub fn new(auth_service: A, note_store: S, users: U, bridge: B) -> Self {
        Self {
            auth: AuthController::new(auth_service, users.clone(), bridge),
            notes: NoteSyncController::new(note_store, users),
        }
    }

    /// Startup path: restore an existing session, then load its notes.
    ///
    /// Call once per popup lifetime.
    pub async fn init(&mut self) -> Result<Option<AuthUser>, PopupError> {
        let Some(session) = self.auth.restore_session().await? else {
            return Ok(None);
        };
        self.notes.refresh().await?;
        Ok(Some(session.user))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthUser, PopupError> {
        let user = self.auth.login(email, password).await?;
        self.notes.refresh().await?;
        Ok(user)
    }

    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<SignUpOutcome, PopupError> {
        let outcome = self.auth.signup(email, password).await?;
        if matches!(outcome, SignUpOutcome::SignedIn(_)) {
            self.notes.refresh().await?;
        }
        Ok(outcome)
    }

    /// Sign out and drop all signed-in state.
    pub async fn logout(&mut self) -> Result<(), PopupError> {
        self.auth.logout().await?;
        self.notes.reset();
        Ok(())
    }

    /// Explicit, user-initiated re-fetch of the note list.
    pub async fn reload(&mut self) -> Result<(), PopupError> {
        self.notes.refresh().await.map_err(PopupError::from)
    }

    pub async fn add_note(&mut self, content: &str) -> Result<Option<Note>, PopupError> {
        self.notes.add(content).await.map_err(PopupError::from)
    }

    pub async fn update_note(&mut self, id: NoteId, content: &str) -> Result<(), PopupError> {
        self.notes.update(id, content).await.map_err(PopupError::from)
    }

    pub async fn delete_note(&mut self, id: NoteId) -> Result<(), PopupError> {
        self.notes.delete(id).await.map_err(PopupError::from)
    }

    /// Read-only note list for rendering.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        self.notes.notes()
    }

    pub fn current_user(&self) -> Result<Option<AuthUser>, PopupError> {
        self.auth.current_user().map_err(PopupError::from)
    }
}
