//! Host bridge seams.
//!
//! The sizing layer never talks to a toolkit directly. The host (a webview
//! shell, a native toolkit, or the [`crate::simulator`]) implements these traits:
//!
//! - [`WindowBridge`] - asynchronous native window calls. Every call is a host
//!   round trip and may fail once the window has been destroyed.
//! - [`EditorView`] - the rendered editor: a height oracle for the chrome, the
//!   content container's overflow, the two divider shadows, and focus.
//! - [`WindowSpawner`] - opens additional note windows.
//!
//! Native events (resized, focus changed) are delivered by the host calling the
//! matching `handle_*` method on [`crate::note_window::NoteWindowSizing`], one at a
//! time, from the UI event loop.

use crate::error::Result;
use crate::geometry::{MonitorGeometry, PhysicalPosition, PhysicalSize};
use crate::height::ChromeMeasurements;

/// Native window operations.
///
/// Implementations resolve each future once the host acknowledges the call.
/// Callers must not assume any session flag is unchanged across an `.await`.
#[allow(async_fn_in_trait)]
pub trait WindowBridge {
    /// Current outer size in physical pixels
    async fn outer_size(&self) -> Result<PhysicalSize>;

    /// Resize the window. Fires a native resized event once applied.
    async fn set_size(&self, size: PhysicalSize) -> Result<()>;

    async fn set_position(&self, position: PhysicalPosition) -> Result<()>;

    /// Monitor the window is on. `Ok(None)` when no monitor can be resolved
    /// (display disconnected mid-call).
    async fn current_monitor(&self) -> Result<Option<MonitorGeometry>>;

    /// Begin an OS-driven drag of the window (header mouse-down)
    async fn start_dragging(&self) -> Result<()>;

    async fn minimize(&self) -> Result<()>;

    async fn maximize(&self) -> Result<()>;

    async fn unmaximize(&self) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// The rendered editor surface.
///
/// All calls are synchronous view-tree operations on the UI thread.
pub trait EditorView {
    /// Measure header, menu bar, dividers and editor content right now
    fn measure_chrome(&self) -> ChromeMeasurements;

    /// Toggle whether the content container scrolls internally
    fn set_content_scrollable(&self, scrollable: bool);

    /// Set the top and bottom divider shadow opacities (0.0..=1.0)
    fn set_divider_opacity(&self, top: f64, bottom: f64);

    /// Put keyboard focus back into the editor
    fn focus(&self);

    /// Whether the document has no content
    fn is_empty(&self) -> bool;
}

/// Opens new top-level note windows
pub trait WindowSpawner {
    /// Open a window at `url` with a logical (width, height)
    fn open_note_window(&self, url: &str, logical_size: (f64, f64)) -> Result<()>;
}
