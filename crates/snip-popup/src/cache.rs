//! In-memory note cache for the popup context.

use snip_core::{Note, NoteId};

/// Ordered projection of the signed-in user's notes.
///
/// Insertion order is display order; it need not match the remote store's
/// order, only the most recent known state per note id. The cache is
/// passive: reads are public, writes happen only through the sync
/// controller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoteCache {
    notes: Vec<Note>,
}

impl NoteCache {
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub(crate) fn replace(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    pub(crate) fn append(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub(crate) fn set_content(&mut self, id: NoteId, content: &str) -> bool {
        if let Some(note) = self.notes.iter_mut().find(|note| note.id == id) {
            note.content = content.to_string();
            true
        } else {
            false
        }
    }

    pub(crate) fn remove(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        self.notes.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.notes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, content: &str) -> Note {
        Note {
            id: NoteId::from_raw(id),
            user_id: "u1".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut cache = NoteCache::default();
        cache.replace(vec![note(3, "c"), note(1, "a")]);
        cache.append(note(2, "b"));

        let ids: Vec<i64> = cache.notes().iter().map(|n| n.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn set_content_touches_only_the_matching_entry() {
        let mut cache = NoteCache::default();
        cache.replace(vec![note(1, "a"), note(2, "b")]);

        assert!(cache.set_content(NoteId::from_raw(1), "a2"));
        assert_eq!(cache.get(NoteId::from_raw(1)).unwrap().content, "a2");
        assert_eq!(cache.get(NoteId::from_raw(2)).unwrap().content, "b");
        assert!(!cache.set_content(NoteId::from_raw(9), "ghost"));
    }

    #[test]
    fn remove_reports_whether_anything_matched() {
        let mut cache = NoteCache::default();
        cache.replace(vec![note(1, "a")]);

        assert!(cache.remove(NoteId::from_raw(1)));
        assert!(!cache.remove(NoteId::from_raw(1)));
        assert!(cache.is_empty());
    }
}
