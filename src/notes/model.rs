//! Note data model and the note store contract.
//!
//! The sizing layer never reads note content itself. It only reacts to notes
//! being switched or deleted, and the browse panel lists titles.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StickyError};

/// Prefix of every note id
const NOTE_ID_PREFIX: &str = "note";

/// Serialized rich-text document of a freshly created note
pub const DEFAULT_NOTE_CONTENT: &str = r#"{"type":"doc","content":[{"type":"paragraph"}]}"#;

/// Opaque note identifier, e.g. `note_4f9a0c2b7d`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh id
    pub fn generate() -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self(format!("{}_{}", NOTE_ID_PREFIX, &simple[..10]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id asks the store to assign one
    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A note as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Serialized rich-text document (JSON)
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Unsaved note; the store assigns the id and timestamps on upsert
    pub fn draft(content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::default(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Title shown in the browse panel
    pub fn title(&self) -> String {
        super::content::title_from_json(&self.content)
    }
}

/// Note persistence surface provided by the host
pub trait NoteStore: Send + Sync {
    /// All notes, most recently updated first
    fn list(&self) -> Result<Vec<Note>>;
    fn get(&self, id: &NoteId) -> Result<Note>;
    /// Insert or update. A note with an unassigned id gets a fresh one.
    fn upsert(&self, note: Note) -> Result<Note>;
    fn delete(&self, id: &NoteId) -> Result<()>;
}

/// Process-local note store
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: Mutex<HashMap<NoteId, Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStore for MemoryNoteStore {
    fn list(&self) -> Result<Vec<Note>> {
        let mut notes: Vec<Note> = self.notes.lock().values().cloned().collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        Ok(notes)
    }

    fn get(&self, id: &NoteId) -> Result<Note> {
        self.notes
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| StickyError::NoteNotFound(id.to_string()))
    }

    fn upsert(&self, mut note: Note) -> Result<Note> {
        let mut notes = self.notes.lock();
        let now = Utc::now();

        if note.id.is_unassigned() {
            note.id = NoteId::generate();
        }
        if let Some(existing) = notes.get(&note.id) {
            note.created_at = existing.created_at;
        }
        note.updated_at = now;

        notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    fn delete(&self, id: &NoteId) -> Result<()> {
        self.notes.lock().remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = NoteId::generate();
        let b = NoteId::generate();
        assert!(a.as_str().starts_with("note_"));
        assert_eq!(a.as_str().len(), "note_".len() + 10);
        assert_ne!(a, b);
    }

    #[test]
    fn test_upsert_assigns_id_and_updates_in_place() {
        let store = MemoryNoteStore::new();
        let created = store.upsert(Note::draft(DEFAULT_NOTE_CONTENT)).unwrap();
        assert!(!created.id.is_unassigned());

        let mut edited = created.clone();
        edited.content = r#"{"type":"doc","content":[{"type":"text","text":"hi"}]}"#.into();
        let updated = store.upsert(edited).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.get(&created.id).unwrap().title(), "hi");
    }

    #[test]
    fn test_list_is_most_recent_first() {
        let store = MemoryNoteStore::new();
        let first = store.upsert(Note::draft(DEFAULT_NOTE_CONTENT)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = store.upsert(Note::draft(DEFAULT_NOTE_CONTENT)).unwrap();

        let ids: Vec<NoteId> = store.list().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_get_missing_note() {
        let store = MemoryNoteStore::new();
        let err = store.get(&NoteId::from("note_missing")).unwrap_err();
        assert!(matches!(err, StickyError::NoteNotFound(_)));
    }

    #[test]
    fn test_delete() {
        let store = MemoryNoteStore::new();
        let note = store.upsert(Note::draft(DEFAULT_NOTE_CONTENT)).unwrap();
        store.delete(&note.id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note::draft(DEFAULT_NOTE_CONTENT);
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
