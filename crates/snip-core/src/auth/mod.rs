//! Supabase GoTrue auth client and the seams the popup controllers plug into.

use std::fmt;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SupabaseConfig;
use crate::util::{compact_text, unix_timestamp_now};

/// A stored session within this many seconds of expiry is treated as expired.
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// The authenticated identity a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Access/refresh token pair proving an identity to the remote services.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Result of a sign-up attempt.
///
/// `ConfirmationRequired` carries no session; callers must not treat it as a
/// signed-in state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(AuthSession),
    ConfirmationRequired,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Auth API error: {0}")]
    Api(String),
    #[error("Session storage error: {0}")]
    Storage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Durable storage the auth client keeps its own session in, so a later
/// process can pick the session back up without credentials.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Remote authentication collaborator contract.
///
/// `current_session` answers from the service's own durable storage;
/// `sign_out` likewise signs out whatever session the service holds.
#[allow(async_fn_in_trait)]
pub trait AuthService {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome>;
    async fn sign_out(&self) -> AuthResult<()>;
    async fn current_session(&self) -> AuthResult<Option<AuthSession>>;
}

/// GoTrue password-grant client with pluggable session persistence.
#[derive(Clone)]
pub struct SupabaseAuthClient<S: SessionPersistence> {
    auth_url: String,
    anon_key: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> SupabaseAuthClient<S> {
    pub fn new(config: &SupabaseConfig, store: S) -> AuthResult<Self> {
        Ok(Self {
            auth_url: config.auth_endpoint(),
            anon_key: config.anon_key().to_string(),
            client: Client::builder().build()?,
            store,
        })
    }

    /// Exchange a refresh token for a fresh session and persist it.
    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::Api("Refresh token must not be empty".to_string()));
        }

        let payload = serde_json::json!({ "refresh_token": refresh_token });
        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "refresh_token")])
                .json(&payload),
        );
        let response = self.send_auth_request(request).await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Refresh response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    fn public_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    async fn send_auth_request(&self, request: RequestBuilder) -> AuthResult<AuthResponse> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<AuthResponse>().await?)
    }
}

impl<S: SessionPersistence> AuthService for SupabaseAuthClient<S> {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({ "email": email, "password": password });
        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "password")])
                .json(&payload),
        );
        let response = self.send_auth_request(request).await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Sign-in response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({ "email": email, "password": password });
        let request = self.public_request(
            self.client
                .post(format!("{}/signup", self.auth_url))
                .json(&payload),
        );
        let response = self.send_auth_request(request).await?;
        match response.into_session()? {
            Some(session) => {
                self.store.save_session(&session)?;
                Ok(SignUpOutcome::SignedIn(session))
            }
            None => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let Some(session) = self.store.load_session()? else {
            // Nothing to revoke remotely.
            return Ok(());
        };

        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        // An already-invalid token still counts as signed out.
        if !(response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED) {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }

        self.store.clear_session()?;
        Ok(())
    }

    async fn current_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(stored) = self.store.load_session()? else {
            return Ok(None);
        };

        if !stored.is_expired() {
            return Ok(Some(stored));
        }

        match self.refresh_session(&stored.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(error) => {
                tracing::warn!("failed to refresh persisted session: {error}");
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::Api("Email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(AuthError::Api("Password is required".to_string()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<UserPayload>,
    // Sign-up with confirmation pending returns the bare user object instead
    // of a token envelope.
    id: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
}

impl From<UserPayload> for AuthUser {
    fn from(value: UserPayload) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

impl AuthResponse {
    /// `Ok(None)` means the service acknowledged the user but issued no
    /// tokens (email confirmation pending).
    fn into_session(self) -> AuthResult<Option<AuthSession>> {
        let Self {
            access_token,
            refresh_token,
            expires_at,
            expires_in,
            user,
            id,
            email,
        } = self;

        let user = user
            .map(AuthUser::from)
            .or_else(|| id.map(|id| AuthUser { id, email }));

        match (access_token, refresh_token) {
            (Some(access_token), Some(refresh_token)) => {
                let user = user.ok_or_else(|| {
                    AuthError::Api("Auth response did not include a user".to_string())
                })?;
                let expires_at = expires_at
                    .or_else(|| {
                        expires_in.map(|expires_in| unix_timestamp_now().saturating_add(expires_in))
                    })
                    .ok_or_else(|| {
                        AuthError::Api("Auth response did not include an expiry".to_string())
                    })?;
                Ok(Some(AuthSession {
                    access_token,
                    refresh_token,
                    expires_at,
                    user,
                }))
            }
            (None, None) if user.is_some() => Ok(None),
            _ => Err(AuthError::Api(
                "Auth response did not include a complete session".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    error: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<AuthErrorBody>(body) {
        if let Some(message) = payload
            .message
            .or(payload.msg)
            .or(payload.error_description)
            .or(payload.error)
        {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}
