//! Browse panel for quick note switching.
//!
//! Headless model of the searchable note list: the host renders it and forwards
//! keys. Opening and closing the panel drives the browser transition resize.
//!
//! ## Behavior
//! - The active note is listed first
//! - Case-insensitive title filter; only the first 5 matches are shown
//! - The focused row resets to the top whenever the visible list changes
//! - ArrowUp/ArrowDown wrap around; Enter picks the focused note

use serde::{Deserialize, Serialize};

use super::model::{Note, NoteId, NoteStore};
use crate::error::Result;

/// Rows visible at once
pub const MAX_VISIBLE_NOTES: usize = 5;

/// Title shown for notes without text
pub const UNTITLED: &str = "Untitled";

/// Lightweight note data for display in the browse panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: NoteId,
    pub title: String,
    /// Whether this is the note open in this window
    pub is_current: bool,
}

impl NoteListItem {
    pub fn from_note(note: &Note, is_current: bool) -> Self {
        let title = note.title();
        Self {
            id: note.id.clone(),
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title
            },
            is_current,
        }
    }
}

/// Keys the panel handles; everything else goes to the search input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelKey {
    ArrowUp,
    ArrowDown,
    Enter,
}

#[derive(Debug, Default)]
pub struct BrowsePalette {
    all_notes: Vec<NoteListItem>,
    notes: Vec<NoteListItem>,
    query: String,
    selected_index: usize,
    is_open: bool,
}

impl BrowsePalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the note list (e.g. after the window regains focus)
    pub fn set_notes(&mut self, notes: &[Note], active: Option<&NoteId>) {
        let (mut current, others): (Vec<_>, Vec<_>) = notes
            .iter()
            .map(|note| NoteListItem::from_note(note, Some(&note.id) == active))
            .partition(|item| item.is_current);
        current.extend(others);
        self.all_notes = current;
        self.refilter();
    }

    /// Reload from the store, keeping the query
    pub fn refresh<S: NoteStore + ?Sized>(
        &mut self,
        store: &S,
        active: Option<&NoteId>,
    ) -> Result<()> {
        let notes = store.list()?;
        self.set_notes(&notes, active);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open or close. Either way the search and focus start fresh.
    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
        self.query.clear();
        self.refilter();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        let query = self.query.to_lowercase();
        self.notes = self
            .all_notes
            .iter()
            .filter(|note| note.title.to_lowercase().contains(&query))
            .take(MAX_VISIBLE_NOTES)
            .cloned()
            .collect();

        // Reset selection to first item
        self.selected_index = 0;
    }

    /// Rows currently shown
    pub fn visible(&self) -> &[NoteListItem] {
        &self.notes
    }

    /// Total notes, ignoring the filter
    pub fn total_count(&self) -> usize {
        self.all_notes.len()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Mouse hover focuses a row
    pub fn hover(&mut self, index: usize) {
        if index < self.notes.len() {
            self.selected_index = index;
        }
    }

    /// Move selection up, wrapping to the bottom
    pub fn move_up(&mut self) {
        if !self.notes.is_empty() {
            self.selected_index = if self.selected_index == 0 {
                self.notes.len() - 1
            } else {
                self.selected_index - 1
            };
        }
    }

    /// Move selection down, wrapping to the top
    pub fn move_down(&mut self) {
        if !self.notes.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.notes.len();
        }
    }

    pub fn get_selected_note_id(&self) -> Option<&NoteId> {
        self.notes.get(self.selected_index).map(|n| &n.id)
    }

    /// Handle a key. Returns the picked note on Enter; picking closes the panel.
    pub fn handle_key(&mut self, key: PanelKey) -> Option<NoteId> {
        match key {
            PanelKey::ArrowUp => {
                self.move_up();
                None
            }
            PanelKey::ArrowDown => {
                self.move_down();
                None
            }
            PanelKey::Enter => {
                let picked = self.get_selected_note_id().cloned()?;
                self.set_open(false);
                Some(picked)
            }
        }
    }

    /// Drop a deleted note from the list
    pub fn remove(&mut self, id: &NoteId) {
        self.all_notes.retain(|note| &note.id != id);
        self.refilter();
    }
}
