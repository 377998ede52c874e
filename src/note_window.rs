//! Per-window sizing facade.
//!
//! [`NoteWindowSizing`] is what the UI layer talks to. It owns the window's
//! [`SizingSession`] and bridge handles and routes every event to the matching
//! controller:
//!
//! | Event                        | Handler                                   |
//! |------------------------------|-------------------------------------------|
//! | editor transaction committed | [`NoteWindowSizing::handle_transaction`]  |
//! | native window resized        | [`NoteWindowSizing::handle_resized`]      |
//! | note browser opened/closed   | [`NoteWindowSizing::handle_browser_open_change`] |
//! | header double-click          | [`NoteWindowSizing::handle_header_double_click`] |
//! | header mouse-down            | [`NoteWindowSizing::handle_header_mouse_down`] |
//! | content scrolled             | [`NoteWindowSizing::handle_scroll`]       |
//! | note picked in the browser   | [`NoteWindowSizing::handle_note_selected`] |
//! | note deleted from the browser| [`NoteWindowSizing::handle_note_deleted`] |
//!
//! Events must be delivered one at a time from the UI event loop.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auto_resize::{self, AutoResizeOutcome};
use crate::bridge::{EditorView, WindowBridge};
use crate::config::SizingConfig;
use crate::error::ResultExt;
use crate::geometry::PhysicalSize;
use crate::manual_resize::{self, ResizeOrigin};
use crate::notes::NoteId;
use crate::scroll_shadow::{self, ScrollMetrics, ShadowOpacity};
use crate::session::SizingSession;
use crate::transaction::Transaction;
use crate::transition::{self, TransitionOutcome};
use crate::window_storage::WindowStorage;

/// Header window controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowCommand {
    Minimize,
    Maximize,
    Unmaximize,
    Close,
}

/// Where the window should navigate after a note change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Show this note
    ToNote(NoteId),
    /// Show a fresh, unsaved note
    ToNew,
}

pub struct NoteWindowSizing<W, E> {
    session: Arc<SizingSession>,
    window: W,
    editor: E,
    config: SizingConfig,
}

impl<W: WindowBridge, E: EditorView> NoteWindowSizing<W, E> {
    pub fn new(session: Arc<SizingSession>, window: W, editor: E, config: SizingConfig) -> Self {
        Self {
            session,
            window,
            editor,
            config,
        }
    }

    /// Start sizing the window labelled `window_id`, restoring its manual flag
    pub fn open(
        window_id: &str,
        storage: Arc<dyn WindowStorage>,
        window: W,
        editor: E,
        config: SizingConfig,
    ) -> Self {
        Self::new(
            Arc::new(SizingSession::open(window_id, storage)),
            window,
            editor,
            config,
        )
    }

    pub fn session(&self) -> &Arc<SizingSession> {
        &self.session
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    pub async fn handle_transaction(&self, transaction: &Transaction) -> AutoResizeOutcome {
        auto_resize::on_transaction(
            &self.session,
            &self.window,
            &self.editor,
            &self.config,
            transaction,
        )
        .await
    }

    pub fn handle_resized(&self, size: PhysicalSize) -> ResizeOrigin {
        manual_resize::on_resized(&self.session, &self.editor, size)
    }

    pub async fn handle_browser_open_change(&self, open: bool) -> TransitionOutcome {
        info!(window_id = self.session.window_id(), open, "Note browser toggled");
        transition::on_browser_open_change(
            &self.session,
            &self.window,
            &self.editor,
            &self.config,
            open,
        )
        .await
    }

    pub async fn handle_header_double_click(&self) -> TransitionOutcome {
        transition::on_header_double_click(&self.session, &self.window, &self.editor, &self.config)
            .await
    }

    /// Mouse-down on the header starts a native window drag
    pub async fn handle_header_mouse_down(&self) {
        self.window.start_dragging().await.warn_on_err();
    }

    pub async fn handle_window_command(&self, command: WindowCommand) {
        debug!(?command, "Window command");
        let result = match command {
            WindowCommand::Minimize => self.window.minimize().await,
            WindowCommand::Maximize => self.window.maximize().await,
            WindowCommand::Unmaximize => self.window.unmaximize().await,
            WindowCommand::Close => self.window.close().await,
        };
        result.warn_on_err();
    }

    pub fn handle_scroll(&self, metrics: &ScrollMetrics) -> ShadowOpacity {
        scroll_shadow::on_scroll(&self.editor, metrics, &self.config)
    }

    /// A note was picked in the browser: restore the pre-browser size first
    pub async fn handle_note_selected(&self, id: NoteId) -> Navigation {
        transition::restore_previous_size(&self.session, &self.window, &self.editor).await;
        Navigation::ToNote(id)
    }

    /// A note was deleted from the browser.
    ///
    /// Only deleting the note this window shows navigates away, to a fresh note.
    pub async fn handle_note_deleted(
        &self,
        deleted: &NoteId,
        active: Option<&NoteId>,
    ) -> Option<Navigation> {
        if active != Some(deleted) {
            return None;
        }
        transition::restore_previous_size(&self.session, &self.window, &self.editor).await;
        Some(Navigation::ToNew)
    }
}

#[cfg(test)]
#[path = "note_window_tests.rs"]
mod tests;
