//! One-shot resizes driven by discrete UI transitions.
//!
//! - Note browser open/close: grow to the browser height, then restore the
//!   size captured on open
//! - Header double-click: snap to the content-fit height, or if already there,
//!   move to the monitor's top-right corner
//! - Note switch / delete: restore the captured size before navigating away
//!
//! Each resize goes through [`SizingSession::resize_window`], so the guard is
//! armed right before the native call.

use tracing::{debug, info};

use crate::bridge::{EditorView, WindowBridge};
use crate::config::SizingConfig;
use crate::error::ResultExt;
use crate::geometry::{PhysicalPosition, PhysicalSize};
use crate::height::compute_target_height;
use crate::session::SizingSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Resized(PhysicalSize),
    Repositioned(PhysicalPosition),
    /// Nothing needed to change
    Unchanged,
    /// Chrome not mounted yet
    Skipped,
    /// A host-bridge call failed
    Aborted,
    /// A manual resize or another calculation happened while awaiting
    Superseded,
}

/// The note browser opened or closed
pub async fn on_browser_open_change<W, E>(
    session: &SizingSession,
    window: &W,
    editor: &E,
    config: &SizingConfig,
    open: bool,
) -> TransitionOutcome
where
    W: WindowBridge + ?Sized,
    E: EditorView + ?Sized,
{
    if !open {
        return restore_previous_size(session, window, editor).await;
    }

    // Any calculation still in flight would undo the browser height
    session.issue_token();

    let Some(current) = window.outer_size().await.warn_on_err() else {
        return TransitionOutcome::Aborted;
    };
    session.capture_snapshot(current);

    let Some(monitor) = window.current_monitor().await.warn_on_err().flatten() else {
        return TransitionOutcome::Aborted;
    };

    let open_height = config.browser_open_height(&monitor);
    if current.height >= open_height {
        return TransitionOutcome::Unchanged;
    }

    let target = current.with_height(open_height);
    if session
        .resize_window(window, current, target, "browser_open")
        .await
    {
        TransitionOutcome::Resized(target)
    } else {
        TransitionOutcome::Aborted
    }
}

/// Put back the size captured when the note browser opened.
///
/// No snapshot means nothing to restore. The snapshot is only dropped once the
/// window is back at that size, so a failed restore can be retried.
pub async fn restore_previous_size<W, E>(
    session: &SizingSession,
    window: &W,
    editor: &E,
) -> TransitionOutcome
where
    W: WindowBridge + ?Sized,
    E: EditorView + ?Sized,
{
    session.issue_token();

    let Some(previous) = session.snapshot() else {
        debug!("No window size snapshot to restore");
        return TransitionOutcome::Unchanged;
    };

    let Some(current) = window.outer_size().await.warn_on_err() else {
        return TransitionOutcome::Aborted;
    };

    let resized = session
        .resize_window(window, current, previous, "restore")
        .await;
    editor.focus();

    if resized {
        session.take_snapshot();
        TransitionOutcome::Resized(previous)
    } else if current == previous {
        session.take_snapshot();
        TransitionOutcome::Unchanged
    } else {
        TransitionOutcome::Aborted
    }
}

/// Header double-click: snap to content, or collapse to the corner.
///
/// Both branches refocus the editor and, once the window call succeeds, turn
/// content-driven sizing back on.
pub async fn on_header_double_click<W, E>(
    session: &SizingSession,
    window: &W,
    editor: &E,
    config: &SizingConfig,
) -> TransitionOutcome
where
    W: WindowBridge + ?Sized,
    E: EditorView + ?Sized,
{
    let token = session.issue_token();
    let chrome = editor.measure_chrome();
    if chrome.total_logical().is_none() {
        return TransitionOutcome::Skipped;
    }

    let Some(monitor) = window.current_monitor().await.warn_on_err().flatten() else {
        return TransitionOutcome::Aborted;
    };
    if !session.is_current(token) {
        return TransitionOutcome::Superseded;
    }

    let Some(current) = window.outer_size().await.warn_on_err() else {
        return TransitionOutcome::Aborted;
    };
    if !session.is_current(token) {
        return TransitionOutcome::Superseded;
    }

    let Some(plan) = compute_target_height(&chrome, &monitor, config) else {
        return TransitionOutcome::Skipped;
    };

    if current.height == plan.height {
        let position = config.corner_position(&monitor, current);
        info!(x = position.x, y = position.y, "Collapsing window to corner");
        let moved = window.set_position(position).await.warn_on_err().is_some();
        editor.focus();
        if !moved {
            return TransitionOutcome::Aborted;
        }
        session.clear_manual_resize();
        return TransitionOutcome::Repositioned(position);
    }

    let target = current.with_height(plan.height);
    let resized = session
        .resize_window(window, current, target, "double_click")
        .await;
    editor.focus();
    if !resized {
        return TransitionOutcome::Aborted;
    }

    // Auto-sizing resumes only once the window really fits the content
    plan.apply_viewport_effects(editor);
    session.clear_manual_resize();
    TransitionOutcome::Resized(target)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pollster::block_on;

    use super::*;
    use crate::auto_resize::{self, AutoResizeOutcome};
    use crate::geometry::MonitorGeometry;
    use crate::height::ChromeMeasurements;
    use crate::simulator::{SimulatedEditor, SimulatedWindow};
    use crate::transaction::Transaction;
    use crate::window_storage::MemoryWindowStorage;

    fn monitor(scale_factor: f64) -> MonitorGeometry {
        MonitorGeometry {
            scale_factor,
            work_area_height: 1000,
            position: PhysicalPosition::new(0, 0),
            size: PhysicalSize::new(2560, 1440),
        }
    }

    fn setup(
        size: PhysicalSize,
        scale_factor: f64,
    ) -> (SizingSession, SimulatedWindow, SimulatedEditor) {
        (
            SizingSession::open("main_0", Arc::new(MemoryWindowStorage::new())),
            SimulatedWindow::new("main_0", size, monitor(scale_factor)),
            SimulatedEditor::new(ChromeMeasurements::mounted(228.0, 36.0, 34.0, 1.0, 1.0)),
        )
    }

    fn toggle_browser(
        session: &SizingSession,
        window: &SimulatedWindow,
        editor: &SimulatedEditor,
        open: bool,
    ) -> TransitionOutcome {
        block_on(on_browser_open_change(
            session,
            window,
            editor,
            &SizingConfig::default(),
            open,
        ))
    }

    fn double_click(
        session: &SizingSession,
        window: &SimulatedWindow,
        editor: &SimulatedEditor,
    ) -> TransitionOutcome {
        block_on(on_header_double_click(
            session,
            window,
            editor,
            &SizingConfig::default(),
        ))
    }

    #[test]
    fn test_browser_open_grows_and_close_restores() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 115), 1.0);

        let opened = toggle_browser(&session, &window, &editor, true);
        assert_eq!(opened, TransitionOutcome::Resized(PhysicalSize::new(400, 500)));
        assert_eq!(session.snapshot(), Some(PhysicalSize::new(400, 115)));

        session.take_guard();
        let closed = toggle_browser(&session, &window, &editor, false);
        assert_eq!(closed, TransitionOutcome::Resized(PhysicalSize::new(400, 115)));
        assert_eq!(window.size(), PhysicalSize::new(400, 115));
        assert_eq!(session.snapshot(), None);
        assert_eq!(editor.snapshot().focus_count, 1);
    }

    #[test]
    fn test_browser_open_on_tall_window_only_captures() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 640), 1.0);

        let opened = toggle_browser(&session, &window, &editor, true);
        assert_eq!(opened, TransitionOutcome::Unchanged);
        assert_eq!(session.snapshot(), Some(PhysicalSize::new(400, 640)));
        assert!(window.set_size_calls().is_empty());
    }

    #[test]
    fn test_close_without_snapshot_is_noop() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 300), 1.0);
        let closed = toggle_browser(&session, &window, &editor, false);
        assert_eq!(closed, TransitionOutcome::Unchanged);
        assert!(window.calls().is_empty());
        assert_eq!(session.snapshot(), None);
    }

    #[test]
    fn test_browser_open_height_scales() {
        let (session, window, editor) = setup(PhysicalSize::new(800, 230), 2.0);
        let opened = toggle_browser(&session, &window, &editor, true);
        assert_eq!(opened, TransitionOutcome::Resized(PhysicalSize::new(800, 1000)));
    }

    #[test]
    fn test_browser_open_during_auto_resize_keeps_browser_height() {
        let session = Arc::new(SizingSession::open(
            "main_0",
            Arc::new(MemoryWindowStorage::new()),
        ));
        let window = Arc::new(SimulatedWindow::new(
            "main_0",
            PhysicalSize::new(400, 115),
            monitor(1.0),
        ));
        let editor = Arc::new(SimulatedEditor::new(ChromeMeasurements::mounted(
            228.0, 36.0, 34.0, 1.0, 1.0,
        )));

        // The browser opens while the auto-resize awaits its monitor query
        let opened = Arc::new(parking_lot::Mutex::new(None));
        let hook = (session.clone(), window.clone(), editor.clone(), opened.clone());
        window.on_next_monitor_query(move || {
            let (session, window, editor, opened) = hook;
            *opened.lock() = Some(toggle_browser(&session, &window, &editor, true));
        });

        let auto = block_on(auto_resize::on_transaction(
            &session,
            &*window,
            &*editor,
            &SizingConfig::default(),
            &Transaction::insert(1),
        ));

        assert_eq!(
            *opened.lock(),
            Some(TransitionOutcome::Resized(PhysicalSize::new(400, 500)))
        );
        assert_eq!(auto, AutoResizeOutcome::Superseded);
        assert_eq!(window.size(), PhysicalSize::new(400, 500));
        assert_eq!(window.set_size_calls(), vec![PhysicalSize::new(400, 500)]);
        assert_eq!(session.snapshot(), Some(PhysicalSize::new(400, 115)));
    }

    #[test]
    fn test_restore_supersedes_inflight_double_click() {
        let session = Arc::new(SizingSession::open(
            "main_0",
            Arc::new(MemoryWindowStorage::new()),
        ));
        let window = Arc::new(SimulatedWindow::new(
            "main_0",
            PhysicalSize::new(400, 500),
            monitor(1.0),
        ));
        let editor = Arc::new(SimulatedEditor::new(ChromeMeasurements::mounted(
            228.0, 36.0, 34.0, 1.0, 1.0,
        )));
        session.capture_snapshot(PhysicalSize::new(400, 115));

        let hook = (session.clone(), window.clone(), editor.clone());
        window.on_next_monitor_query(move || {
            let (session, window, editor) = hook;
            block_on(restore_previous_size(&session, &*window, &*editor));
        });

        let outcome = double_click(&session, &window, &editor);
        assert_eq!(outcome, TransitionOutcome::Superseded);
        assert_eq!(window.size(), PhysicalSize::new(400, 115));
    }

    #[test]
    fn test_browser_open_failures_keep_current_size() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 115), 1.0);

        window.set_monitor(None);
        let outcome = toggle_browser(&session, &window, &editor, true);
        assert_eq!(outcome, TransitionOutcome::Aborted);

        window.set_monitor(Some(monitor(1.0)));
        window.fail_monitor(true);
        let outcome = toggle_browser(&session, &window, &editor, true);
        assert_eq!(outcome, TransitionOutcome::Aborted);

        window.fail_monitor(false);
        window.fail_set_size(true);
        let outcome = toggle_browser(&session, &window, &editor, true);
        assert_eq!(outcome, TransitionOutcome::Aborted);

        assert_eq!(window.size(), PhysicalSize::new(400, 115));
        assert!(!session.is_guard_armed());
        assert!(window.take_resize_events().is_empty());
    }

    #[test]
    fn test_failed_restore_keeps_snapshot_for_retry() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 115), 1.0);
        toggle_browser(&session, &window, &editor, true);
        session.take_guard();

        window.fail_set_size(true);
        let closed = toggle_browser(&session, &window, &editor, false);
        assert_eq!(closed, TransitionOutcome::Aborted);
        assert_eq!(window.size(), PhysicalSize::new(400, 500));
        assert_eq!(session.snapshot(), Some(PhysicalSize::new(400, 115)));
        assert!(!session.is_guard_armed());

        window.fail_set_size(false);
        let closed = toggle_browser(&session, &window, &editor, false);
        assert_eq!(closed, TransitionOutcome::Resized(PhysicalSize::new(400, 115)));
        assert_eq!(session.snapshot(), None);
    }

    #[test]
    fn test_restore_on_unavailable_window_keeps_snapshot() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 500), 1.0);
        session.capture_snapshot(PhysicalSize::new(400, 115));
        block_on(window.close()).unwrap();

        let outcome = block_on(restore_previous_size(&session, &window, &editor));
        assert_eq!(outcome, TransitionOutcome::Aborted);
        assert_eq!(session.snapshot(), Some(PhysicalSize::new(400, 115)));
    }

    #[test]
    fn test_double_click_snaps_to_content_and_reenables_auto() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 500), 1.0);
        session.mark_manually_resized();

        let outcome = double_click(&session, &window, &editor);
        assert_eq!(outcome, TransitionOutcome::Resized(PhysicalSize::new(400, 300)));
        assert!(!session.is_manually_resized());
        assert_eq!(editor.snapshot().focus_count, 1);
    }

    #[test]
    fn test_failed_snap_leaves_auto_sizing_off() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 500), 1.0);
        session.mark_manually_resized();
        window.fail_set_size(true);

        let outcome = double_click(&session, &window, &editor);
        assert_eq!(outcome, TransitionOutcome::Aborted);
        assert!(session.is_manually_resized());
        assert!(!session.is_guard_armed());
        assert_eq!(window.size(), PhysicalSize::new(400, 500));
        assert_eq!(editor.snapshot().focus_count, 1);
    }

    #[test]
    fn test_double_click_without_monitor_aborts() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 500), 1.0);
        session.mark_manually_resized();

        window.set_monitor(None);
        let outcome = double_click(&session, &window, &editor);
        assert_eq!(outcome, TransitionOutcome::Aborted);

        window.set_monitor(Some(monitor(1.0)));
        window.fail_monitor(true);
        let outcome = double_click(&session, &window, &editor);
        assert_eq!(outcome, TransitionOutcome::Aborted);

        assert!(window.set_size_calls().is_empty());
        assert!(session.is_manually_resized());
    }

    #[test]
    fn test_double_click_at_content_height_moves_to_corner() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 300), 1.0);
        session.mark_manually_resized();

        let outcome = double_click(&session, &window, &editor);
        // 2560 - 400 - 40 = 2120, y = 100
        assert_eq!(
            outcome,
            TransitionOutcome::Repositioned(PhysicalPosition::new(2120, 100))
        );
        assert_eq!(window.size(), PhysicalSize::new(400, 300));
        assert!(window.set_size_calls().is_empty());
        assert!(!session.is_manually_resized());
        assert_eq!(editor.snapshot().focus_count, 1);
    }

    #[test]
    fn test_restore_with_equal_size_does_not_arm_guard() {
        let (session, window, editor) = setup(PhysicalSize::new(400, 300), 1.0);
        session.capture_snapshot(PhysicalSize::new(400, 300));

        let outcome = block_on(restore_previous_size(&session, &window, &editor));
        assert_eq!(outcome, TransitionOutcome::Unchanged);
        assert!(!session.is_guard_armed());
        assert_eq!(session.snapshot(), None);
    }
}
