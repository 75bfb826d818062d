//! Data models for Snip

mod note;

pub use note::{Note, NoteId};
