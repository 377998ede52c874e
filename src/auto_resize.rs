//! Content-driven window resizing.
//!
//! Runs once per committed editor transaction. Only inserts and deletes count;
//! everything else (selection, marks, attributes) is ignored. No debouncing:
//! rapid typing produces one calculation per transaction.

use tracing::debug;

use crate::bridge::{EditorView, WindowBridge};
use crate::config::SizingConfig;
use crate::error::ResultExt;
use crate::geometry::PhysicalSize;
use crate::height::compute_target_height;
use crate::session::{ResizeToken, SizingSession};
use crate::transaction::{classify, Transaction};

/// What one transaction did to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoResizeOutcome {
    /// Neither an insert nor a delete
    Ignored,
    /// The user resized this window by hand; content no longer drives its size
    Suspended,
    /// Some chrome element is not mounted yet
    Skipped,
    /// A host-bridge call failed; the window keeps its size
    Aborted,
    /// A manual resize or a newer calculation happened while this one awaited
    Superseded,
    /// Already at the content-fit height
    Unchanged,
    Resized(PhysicalSize),
}

fn superseded(session: &SizingSession, token: ResizeToken) -> bool {
    !session.is_current(token) || session.is_manually_resized()
}

/// Resize the window to fit its content after `transaction`.
///
/// Width is never changed. Flags are re-checked after every await, so a
/// manual resize that lands mid-calculation always wins.
pub async fn on_transaction<W, E>(
    session: &SizingSession,
    window: &W,
    editor: &E,
    config: &SizingConfig,
    transaction: &Transaction,
) -> AutoResizeOutcome
where
    W: WindowBridge + ?Sized,
    E: EditorView + ?Sized,
{
    let Some(kind) = classify(transaction) else {
        return AutoResizeOutcome::Ignored;
    };
    if session.is_manually_resized() {
        return AutoResizeOutcome::Suspended;
    }

    let token = session.issue_token();
    let chrome = editor.measure_chrome();
    if chrome.total_logical().is_none() {
        debug!(kind = kind.as_str(), "Chrome not mounted, skipping auto-resize");
        return AutoResizeOutcome::Skipped;
    }

    let Some(monitor) = window.current_monitor().await.warn_on_err().flatten() else {
        return AutoResizeOutcome::Aborted;
    };
    if superseded(session, token) {
        return AutoResizeOutcome::Superseded;
    }

    let Some(current) = window.outer_size().await.warn_on_err() else {
        return AutoResizeOutcome::Aborted;
    };
    if superseded(session, token) {
        return AutoResizeOutcome::Superseded;
    }

    let Some(plan) = compute_target_height(&chrome, &monitor, config) else {
        return AutoResizeOutcome::Skipped;
    };
    plan.apply_viewport_effects(editor);

    if current.height == plan.height {
        return AutoResizeOutcome::Unchanged;
    }

    let target = current.with_height(plan.height);
    debug!(
        kind = kind.as_str(),
        height = plan.height,
        scrollable = plan.scrollable,
        "Auto-resizing to content"
    );
    if session.resize_window(window, current, target, "auto").await {
        AutoResizeOutcome::Resized(target)
    } else {
        AutoResizeOutcome::Aborted
    }
}
