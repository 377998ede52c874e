//! Native resized events: user drag or our own resize?
//!
//! The programmatic guard answers that. It is consumed by the very next
//! resized event whatever its cause, so an armed guard never outlives one
//! event.

use tracing::debug;

use crate::bridge::EditorView;
use crate::geometry::PhysicalSize;
use crate::logging;
use crate::session::SizingSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOrigin {
    /// Caused by a resize this layer issued
    Programmatic,
    /// The user resized the window by hand
    Manual,
}

/// Classify one native resized event and react to it
pub fn on_resized<E: EditorView + ?Sized>(
    session: &SizingSession,
    editor: &E,
    size: PhysicalSize,
) -> ResizeOrigin {
    if session.take_guard() {
        debug!(width = size.width, height = size.height, "Programmatic resize event consumed");
        return ResizeOrigin::Programmatic;
    }

    if session.mark_manually_resized() {
        logging::log_manual_resize(session.window_id(), size);
    } else {
        debug!(width = size.width, height = size.height, "Manual resize (auto-sizing already off)");
    }

    // Content keeps its own scrollbar instead of fighting the chosen size
    editor.set_content_scrollable(true);
    editor.focus();
    ResizeOrigin::Manual
}
