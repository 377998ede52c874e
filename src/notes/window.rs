//! Opening additional note windows.

use tracing::info;

use super::model::{Note, NoteId, NoteStore, DEFAULT_NOTE_CONTENT};
use crate::bridge::{EditorView, WindowSpawner};
use crate::config::SizingConfig;
use crate::error::{Result, StickyError};

/// Route of the window showing `id`
pub fn note_url(id: &NoteId) -> String {
    format!("/{}", id)
}

/// Create a note and open it in a new window.
///
/// Refused while the current editor is still empty: one blank note at a time.
pub fn open_new_note_window<E, S, P>(
    editor: &E,
    store: &S,
    spawner: &P,
    config: &SizingConfig,
) -> Result<NoteId>
where
    E: EditorView + ?Sized,
    S: NoteStore + ?Sized,
    P: WindowSpawner + ?Sized,
{
    if editor.is_empty() {
        return Err(StickyError::EmptyNoteOpen);
    }

    let note = store.upsert(Note::draft(DEFAULT_NOTE_CONTENT))?;
    let url = note_url(&note.id);
    spawner.open_note_window(&url, config.new_window_size())?;

    info!(note_id = %note.id, url = %url, "Opened new note window");
    Ok(note.id)
}
