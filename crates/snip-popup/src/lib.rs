//! snip-popup - Popup-context state for Snip
//!
//! Everything the popup's rendering layer drives: the durable user slot,
//! the background session hand-off, the note cache, and the controllers
//! that keep them consistent with the remote services.

pub mod app;
pub mod auth;
pub mod bridge;
pub mod cache;
pub mod notes;
pub mod session;
pub mod storage;


pub use app::{PopupApp, PopupError};
pub use bridge::{BackgroundBridge, BackgroundMessage, ChannelBridge};
pub use cache::NoteCache;
