//! Note synchronization between the remote store and the local cache.

use snip_core::models::{Note, NoteId};
use snip_core::store::{RemoteNoteStore, StoreError, StoreResult};
use snip_core::util::normalize_text_option;

use crate::cache::NoteCache;
use crate::session::UserSlot;

/// Orchestrates fetch/add/update/delete against the remote store and applies
/// confirmed results to the cache.
///
/// Nothing here re-fetches behind the caller's back: `refresh` runs only
/// when explicitly invoked, and cache mutations never trigger one. Every
/// mutation goes remote first; the cache changes only on success.
///
/// This layer does not serialize operations issued from separate popup
/// surfaces; concurrent completions apply in completion order, so the last
/// writer by completion time wins.
pub struct NoteSyncController<S, U> {
    store: S,
    users: U,
    cache: NoteCache,
}

impl<S: RemoteNoteStore, U: UserSlot> NoteSyncController<S, U> {
    pub fn new(store: S, users: U) -> Self {
        Self {
            store,
            users,
            cache: NoteCache::default(),
        }
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        self.cache.notes()
    }

    /// Fetch the signed-in user's notes and replace the cache wholesale.
    ///
    /// Idempotent: repeated calls with no intervening mutation produce
    /// identical cache contents. Without a signed-in user this fails locally
    /// and the remote store is never contacted.
    pub async fn refresh(&mut self) -> StoreResult<()> {
        let user_id = self.current_user_id()?;
        // Ownership scoping happens in the select filter; rows belonging to
        // any other user never enter the cache.
        let notes = self.store.select(&user_id).await?;
        tracing::debug!(count = notes.len(), "refreshed notes from remote store");
        self.cache.replace(notes);
        Ok(())
    }

    /// Create a note from trimmed content and append it to the cache.
    ///
    /// Empty or whitespace-only content is a success-without-effect no-op;
    /// the remote store is not contacted and `Ok(None)` is returned.
    pub async fn add(&mut self, content: &str) -> StoreResult<Option<Note>> {
        let Some(content) = normalize_text_option(Some(content.to_string())) else {
            return Ok(None);
        };
        let user_id = self.current_user_id()?;
        let note = self.store.insert(&user_id, &content).await?;
        self.cache.append(note.clone());
        Ok(Some(note))
    }

    /// Replace a note's content, remote first.
    ///
    /// The remote call echoes no note body back; on success the cache entry
    /// takes the submitted value.
    pub async fn update(&mut self, id: NoteId, content: &str) -> StoreResult<()> {
        self.current_user_id()?;
        self.store.update(id, content).await?;
        if !self.cache.set_content(id, content) {
            tracing::debug!(%id, "updated note is not in the local cache");
        }
        Ok(())
    }

    /// Delete a note, remote first; the cache entry goes only on success.
    pub async fn delete(&mut self, id: NoteId) -> StoreResult<()> {
        self.current_user_id()?;
        self.store.delete(id).await?;
        self.cache.remove(id);
        Ok(())
    }

    /// Empty the cache. Local only, used on logout.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    fn current_user_id(&self) -> StoreResult<String> {
        let user = self
            .users
            .get()
            .map_err(|error| StoreError::Storage(error.to_string()))?
            .ok_or(StoreError::NotSignedIn)?;
        Ok(user.id)
    }
}
