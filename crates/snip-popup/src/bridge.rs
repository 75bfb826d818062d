//! One-way session hand-off into the background context.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use snip_core::auth::AuthSession;

/// Message kinds the popup context delivers to the background context.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "body", rename_all = "kebab-case")]
pub enum BackgroundMessage {
    /// Adopt or refresh this session. A newer message supersedes an older
    /// one; a duplicate is harmless.
    InitSession {
        access_token: String,
        refresh_token: String,
    },
}

impl fmt::Debug for BackgroundMessage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitSession { .. } => formatter
                .debug_struct("InitSession")
                .field("access_token", &"[REDACTED]")
                .field("refresh_token", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Send-only hand-off channel from the popup to the background context.
///
/// Delivery is best-effort and fire-and-forget: the caller neither blocks on
/// nor observes background processing. Controllers invoke this once per
/// established session, not on every render.
pub trait BackgroundBridge {
    fn forward(&self, session: &AuthSession);
}

/// Bridge over an unbounded in-process channel whose receiving half lives in
/// the background context.
#[derive(Debug, Clone)]
pub struct ChannelBridge {
    sender: mpsc::UnboundedSender<BackgroundMessage>,
}

impl ChannelBridge {
    /// Create a bridge plus the receiver the background context drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BackgroundMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl BackgroundBridge for ChannelBridge {
    fn forward(&self, session: &AuthSession) {
        let message = BackgroundMessage::InitSession {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
        };
        if self.sender.send(message).is_err() {
            tracing::warn!("background context is gone; dropping session hand-off");
        }
    }
}
