//! Notes collaborator surface.
//!
//! ## Contents
//! - [`Note`], [`NoteId`] and the [`NoteStore`] contract the host implements
//! - [`MemoryNoteStore`] for tests and the replay tool
//! - Title extraction from serialized rich-text documents
//! - [`BrowsePalette`], the quick-switch list
//! - [`open_new_note_window`]

mod browse_panel;
mod content;
mod model;
mod window;

pub use browse_panel::{BrowsePalette, NoteListItem, PanelKey, MAX_VISIBLE_NOTES, UNTITLED};
pub use content::{title_from_content, title_from_json};
pub use model::{MemoryNoteStore, Note, NoteId, NoteStore, DEFAULT_NOTE_CONTENT};
pub use window::{note_url, open_new_note_window};
