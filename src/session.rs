//! Per-window sizing session.
//!
//! One `SizingSession` exists per note window, created with the window and
//! dropped with it. It owns every flag the controllers coordinate through:
//!
//! - **manual resize flag** - persisted; once set, content-driven resizing stays
//!   off until a deliberate transition clears it
//! - **programmatic resize guard** - in memory; armed right before this layer
//!   resizes the window, consumed by the very next native resized event
//! - **size snapshot** - the window size captured before the note browser opened
//! - **request generation** - monotonically increasing; a calculation whose token
//!   is no longer current must not apply its result
//!
//! Locks are held only for the duration of a single accessor, never across an
//! `.await`, so controllers always observe the latest state after resuming.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::bridge::WindowBridge;
use crate::error::ResultExt;
use crate::geometry::PhysicalSize;
use crate::logging;
use crate::window_storage::WindowStorage;

/// Storage key for the manual resize flag
pub const MANUAL_RESIZE_KEY: &str = "__is_manually_resized__";

/// Identity of one in-flight calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResizeToken(u64);

#[derive(Debug, Default)]
struct SessionState {
    manually_resized: bool,
    programmatic_guard: bool,
    snapshot: Option<PhysicalSize>,
    generation: u64,
}

pub struct SizingSession {
    window_id: String,
    storage: Arc<dyn WindowStorage>,
    state: Mutex<SessionState>,
}

impl SizingSession {
    /// Create the session for `window_id`, restoring the persisted manual flag.
    ///
    /// An unreadable store starts with auto-sizing enabled.
    pub fn open(window_id: impl Into<String>, storage: Arc<dyn WindowStorage>) -> Self {
        let window_id = window_id.into();
        let manually_resized = storage
            .get(&window_id, MANUAL_RESIZE_KEY)
            .warn_on_err()
            .flatten()
            .is_some_and(|value| value == "true");

        debug!(
            window_id = %window_id,
            manually_resized,
            "Sizing session opened"
        );

        Self {
            window_id,
            storage,
            state: Mutex::new(SessionState {
                manually_resized,
                ..SessionState::default()
            }),
        }
    }

    pub fn window_id(&self) -> &str {
        &self.window_id
    }

    // ------------------------------------------------------------------
    // Manual resize flag
    // ------------------------------------------------------------------

    pub fn is_manually_resized(&self) -> bool {
        self.state.lock().manually_resized
    }

    /// Record a user-driven resize.
    ///
    /// Also advances the request generation so any calculation still in
    /// flight loses to the user's chosen size. Returns true if the flag was
    /// previously clear.
    pub fn mark_manually_resized(&self) -> bool {
        let newly_set = {
            let mut state = self.state.lock();
            state.generation += 1;
            let newly_set = !state.manually_resized;
            state.manually_resized = true;
            newly_set
        };
        if newly_set {
            self.persist_manual_flag(true);
        }
        newly_set
    }

    /// Re-enable content-driven resizing
    pub fn clear_manual_resize(&self) {
        let was_set = {
            let mut state = self.state.lock();
            std::mem::replace(&mut state.manually_resized, false)
        };
        if was_set {
            self.persist_manual_flag(false);
        }
    }

    fn persist_manual_flag(&self, value: bool) {
        let stored = self
            .storage
            .set(
                &self.window_id,
                MANUAL_RESIZE_KEY,
                if value { "true" } else { "false" },
            )
            .warn_on_err();
        if stored.is_none() {
            warn!(
                window_id = %self.window_id,
                value,
                "Manual resize flag kept in memory only"
            );
        }
    }

    // ------------------------------------------------------------------
    // Programmatic resize guard
    // ------------------------------------------------------------------

    /// Arm the guard. Call synchronously, right before issuing a resize.
    pub fn arm_guard(&self) {
        self.state.lock().programmatic_guard = true;
    }

    /// Drop an armed guard whose resize call failed (no event will follow)
    pub fn disarm_guard(&self) {
        self.state.lock().programmatic_guard = false;
    }

    /// Consume the guard. Returns whether it was armed.
    pub fn take_guard(&self) -> bool {
        std::mem::replace(&mut self.state.lock().programmatic_guard, false)
    }

    pub fn is_guard_armed(&self) -> bool {
        self.state.lock().programmatic_guard
    }

    // ------------------------------------------------------------------
    // Size snapshot
    // ------------------------------------------------------------------

    pub fn capture_snapshot(&self, size: PhysicalSize) {
        self.state.lock().snapshot = Some(size);
    }

    /// Take the snapshot, leaving none behind
    pub fn take_snapshot(&self) -> Option<PhysicalSize> {
        self.state.lock().snapshot.take()
    }

    pub fn snapshot(&self) -> Option<PhysicalSize> {
        self.state.lock().snapshot
    }

    // ------------------------------------------------------------------
    // Request tokens
    // ------------------------------------------------------------------

    /// Start a new calculation; every earlier token becomes stale
    pub fn issue_token(&self) -> ResizeToken {
        let mut state = self.state.lock();
        state.generation += 1;
        ResizeToken(state.generation)
    }

    /// Whether nothing newer than `token` has happened since it was issued
    pub fn is_current(&self, token: ResizeToken) -> bool {
        self.state.lock().generation == token.0
    }

    // ------------------------------------------------------------------
    // Guarded resize
    // ------------------------------------------------------------------

    /// Resize `window` from `from` to `to` under the programmatic guard.
    ///
    /// Equal sizes issue nothing: no native event would follow to consume the
    /// guard. A failed call disarms the guard and leaves the window as it was.
    /// Returns whether the resize was applied.
    pub async fn resize_window<W: WindowBridge + ?Sized>(
        &self,
        window: &W,
        from: PhysicalSize,
        to: PhysicalSize,
        source: &str,
    ) -> bool {
        if from == to {
            debug!(source, width = to.width, height = to.height, "Window already at target size");
            return false;
        }

        logging::log_resize_event(source, from, to);
        self.arm_guard();
        if window.set_size(to).await.warn_on_err().is_none() {
            self.disarm_guard();
            return false;
        }
        true
    }
}

impl std::fmt::Debug for SizingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SizingSession")
            .field("window_id", &self.window_id)
            .field("manually_resized", &state.manually_resized)
            .field("programmatic_guard", &state.programmatic_guard)
            .field("snapshot", &state.snapshot)
            .field("generation", &state.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, StickyError};
    use crate::window_storage::MemoryWindowStorage;

    struct BrokenStorage;

    impl WindowStorage for BrokenStorage {
        fn get(&self, _window_id: &str, _key: &str) -> Result<Option<String>> {
            Err(StickyError::Bridge("storage offline".into()))
        }
        fn set(&self, _window_id: &str, _key: &str, _value: &str) -> Result<()> {
            Err(StickyError::Bridge("storage offline".into()))
        }
    }

    #[test]
    fn test_flag_restored_from_storage() {
        let storage = Arc::new(MemoryWindowStorage::new());
        storage.set("main_0", MANUAL_RESIZE_KEY, "true").unwrap();

        let session = SizingSession::open("main_0", storage.clone());
        assert!(session.is_manually_resized());

        let other = SizingSession::open("main_1", storage);
        assert!(!other.is_manually_resized());
    }

    #[test]
    fn test_mark_and_clear_persist() {
        let storage = Arc::new(MemoryWindowStorage::new());
        let session = SizingSession::open("main_0", storage.clone());

        assert!(session.mark_manually_resized());
        assert!(!session.mark_manually_resized());
        assert_eq!(
            storage.get("main_0", MANUAL_RESIZE_KEY).unwrap().as_deref(),
            Some("true")
        );

        session.clear_manual_resize();
        assert!(!session.is_manually_resized());
        assert_eq!(
            storage.get("main_0", MANUAL_RESIZE_KEY).unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_guard_is_consumed_once() {
        let session = SizingSession::open("main_0", Arc::new(MemoryWindowStorage::new()));
        assert!(!session.take_guard());

        session.arm_guard();
        assert!(session.is_guard_armed());
        assert!(session.take_guard());
        assert!(!session.take_guard());

        session.arm_guard();
        session.disarm_guard();
        assert!(!session.take_guard());
    }

    #[test]
    fn test_snapshot_taken_once() {
        let session = SizingSession::open("main_0", Arc::new(MemoryWindowStorage::new()));
        assert_eq!(session.take_snapshot(), None);

        session.capture_snapshot(PhysicalSize::new(400, 115));
        assert_eq!(session.snapshot(), Some(PhysicalSize::new(400, 115)));
        assert_eq!(session.take_snapshot(), Some(PhysicalSize::new(400, 115)));
        assert_eq!(session.take_snapshot(), None);
    }

    #[test]
    fn test_newer_token_or_manual_resize_supersedes() {
        let session = SizingSession::open("main_0", Arc::new(MemoryWindowStorage::new()));
        let first = session.issue_token();
        assert!(session.is_current(first));

        let second = session.issue_token();
        assert!(!session.is_current(first));
        assert!(session.is_current(second));

        session.mark_manually_resized();
        assert!(!session.is_current(second));
    }

    #[test]
    fn test_broken_storage_degrades_to_memory() {
        let session = SizingSession::open("main_0", Arc::new(BrokenStorage));
        assert!(!session.is_manually_resized());

        session.mark_manually_resized();
        assert!(session.is_manually_resized());
        session.clear_manual_resize();
        assert!(!session.is_manually_resized());
    }
}
