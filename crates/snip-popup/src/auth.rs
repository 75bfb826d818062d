//! Login, signup, restore, and logout orchestration for the popup context.

use snip_core::auth::{AuthError, AuthResult, AuthService, AuthSession, AuthUser, SignUpOutcome};

use crate::bridge::BackgroundBridge;
use crate::session::UserSlot;

/// Drives the auth service, keeps the durable user slot current, and hands
/// each newly established session to the background context exactly once.
///
/// No remote call is retried; a failure surfaces once and leaves the
/// previous state (including any prior session) untouched.
pub struct AuthController<A, U, B> {
    service: A,
    users: U,
    bridge: B,
}

impl<A: AuthService, U: UserSlot, B: BackgroundBridge> AuthController<A, U, B> {
    pub const fn new(service: A, users: U, bridge: B) -> Self {
        Self {
            service,
            users,
            bridge,
        }
    }

    /// Current user from the durable slot, if any.
    pub fn current_user(&self) -> AuthResult<Option<AuthUser>> {
        self.users
            .get()
            .map_err(|error| AuthError::Storage(error.to_string()))
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let session = self.service.sign_in(email, password).await?;
        self.establish(&session)?;
        Ok(session.user)
    }

    /// Sign up; a pending email confirmation yields no session and must not
    /// be treated as a signed-in state.
    pub async fn signup(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        let outcome = self.service.sign_up(email, password).await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.establish(session)?;
        }
        Ok(outcome)
    }

    /// Pick up an existing session from the auth service, if it holds one.
    ///
    /// Runs once per popup lifetime, at initialization.
    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        match self.service.current_session().await? {
            Some(session) => {
                self.establish(&session)?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    /// Sign out remotely, then clear the durable slot.
    ///
    /// When the sign-out call fails the slot keeps its previous state and
    /// the caller stays signed in.
    pub async fn logout(&self) -> AuthResult<()> {
        self.service.sign_out().await?;
        self.users
            .set(None)
            .map_err(|error| AuthError::Storage(error.to_string()))?;
        Ok(())
    }

    /// Record the session's user and forward the session to the background
    /// context. Invoked once per establishment, never per render.
    fn establish(&self, session: &AuthSession) -> AuthResult<()> {
        self.users
            .set(Some(&session.user))
            .map_err(|error| AuthError::Storage(error.to_string()))?;
        self.bridge.forward(session);
        tracing::debug!(user = %session.user.id, "session established");
        Ok(())
    }
}
