//! Headless host for the sizing layer.
//!
//! [`SimulatedWindow`] and [`SimulatedEditor`] implement the bridge traits
//! without a toolkit. Every bridge call is recorded, and every size change
//! queues the native resized event a real window would emit. The host
//! (a test or the replay tool) delivers queued events back through
//! [`crate::note_window::NoteWindowSizing::handle_resized`].
//!
//! Futures resolve immediately, so `pollster::block_on` is enough to drive them.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::Serialize;

use crate::bridge::{EditorView, WindowBridge, WindowSpawner};
use crate::error::{Result, StickyError};
use crate::geometry::{MonitorGeometry, PhysicalPosition, PhysicalSize};
use crate::height::ChromeMeasurements;
use crate::manual_resize::ResizeOrigin;
use crate::note_window::NoteWindowSizing;

/// One recorded host-bridge call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum BridgeCall {
    OuterSize,
    SetSize { size: PhysicalSize },
    SetPosition { position: PhysicalPosition },
    CurrentMonitor,
    StartDragging,
    Minimize,
    Maximize,
    Unmaximize,
    Close,
}

/// Observable state of the simulated window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub size: PhysicalSize,
    pub position: PhysicalPosition,
    pub minimized: bool,
    pub maximized: bool,
    pub closed: bool,
}

type MonitorHook = Box<dyn FnOnce() + Send>;

struct WindowState {
    snapshot: WindowSnapshot,
    monitor: Option<MonitorGeometry>,
    calls: Vec<BridgeCall>,
    pending_events: VecDeque<PhysicalSize>,
    fail_set_size: bool,
    fail_monitor: bool,
    monitor_hook: Option<MonitorHook>,
}

pub struct SimulatedWindow {
    label: String,
    state: Mutex<WindowState>,
}

impl SimulatedWindow {
    pub fn new(label: impl Into<String>, size: PhysicalSize, monitor: MonitorGeometry) -> Self {
        Self {
            label: label.into(),
            state: Mutex::new(WindowState {
                snapshot: WindowSnapshot {
                    size,
                    position: monitor.position,
                    minimized: false,
                    maximized: false,
                    closed: false,
                },
                monitor: Some(monitor),
                calls: Vec::new(),
                pending_events: VecDeque::new(),
                fail_set_size: false,
                fail_monitor: false,
                monitor_hook: None,
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size(&self) -> PhysicalSize {
        self.state.lock().snapshot.size
    }

    pub fn position(&self) -> PhysicalPosition {
        self.state.lock().snapshot.position
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        self.state.lock().snapshot
    }

    /// All bridge calls so far, oldest first
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.state.lock().calls.clone()
    }

    /// Sizes passed to `set_size`, oldest first
    pub fn set_size_calls(&self) -> Vec<PhysicalSize> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::SetSize { size } => Some(*size),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// The user drags a window edge: size changes and a resized event is queued
    pub fn user_resize(&self, size: PhysicalSize) {
        let mut state = self.state.lock();
        state.snapshot.size = size;
        state.pending_events.push_back(size);
    }

    /// Drain the resized events the host has not delivered yet
    pub fn take_resize_events(&self) -> Vec<PhysicalSize> {
        self.state.lock().pending_events.drain(..).collect()
    }

    pub fn set_monitor(&self, monitor: Option<MonitorGeometry>) {
        self.state.lock().monitor = monitor;
    }

    pub fn fail_set_size(&self, fail: bool) {
        self.state.lock().fail_set_size = fail;
    }

    pub fn fail_monitor(&self, fail: bool) {
        self.state.lock().fail_monitor = fail;
    }

    /// Run `hook` once, while the next monitor query is in flight.
    ///
    /// Models another event interleaving at an await point.
    pub fn on_next_monitor_query(&self, hook: impl FnOnce() + Send + 'static) {
        self.state.lock().monitor_hook = Some(Box::new(hook));
    }

    /// Record `call`, failing if the window has been closed
    fn record(&self, call: BridgeCall) -> Result<()> {
        let mut state = self.state.lock();
        if state.snapshot.closed {
            return Err(StickyError::WindowUnavailable(self.label.clone()));
        }
        state.calls.push(call);
        Ok(())
    }
}

impl WindowBridge for SimulatedWindow {
    async fn outer_size(&self) -> Result<PhysicalSize> {
        self.record(BridgeCall::OuterSize)?;
        Ok(self.size())
    }

    async fn set_size(&self, size: PhysicalSize) -> Result<()> {
        self.record(BridgeCall::SetSize { size })?;
        let mut state = self.state.lock();
        if state.fail_set_size {
            return Err(StickyError::Bridge("setSize rejected".into()));
        }
        if state.snapshot.size != size {
            state.snapshot.size = size;
            state.pending_events.push_back(size);
        }
        Ok(())
    }

    async fn set_position(&self, position: PhysicalPosition) -> Result<()> {
        self.record(BridgeCall::SetPosition { position })?;
        self.state.lock().snapshot.position = position;
        Ok(())
    }

    async fn current_monitor(&self) -> Result<Option<MonitorGeometry>> {
        self.record(BridgeCall::CurrentMonitor)?;
        // Taken out of the lock first: the hook may call back into this window
        let hook = self.state.lock().monitor_hook.take();
        if let Some(hook) = hook {
            hook();
        }
        let state = self.state.lock();
        if state.fail_monitor {
            return Err(StickyError::Bridge("currentMonitor rejected".into()));
        }
        Ok(state.monitor)
    }

    async fn start_dragging(&self) -> Result<()> {
        self.record(BridgeCall::StartDragging)
    }

    async fn minimize(&self) -> Result<()> {
        self.record(BridgeCall::Minimize)?;
        self.state.lock().snapshot.minimized = true;
        Ok(())
    }

    async fn maximize(&self) -> Result<()> {
        self.record(BridgeCall::Maximize)?;
        self.state.lock().snapshot.maximized = true;
        Ok(())
    }

    async fn unmaximize(&self) -> Result<()> {
        self.record(BridgeCall::Unmaximize)?;
        self.state.lock().snapshot.maximized = false;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.record(BridgeCall::Close)?;
        self.state.lock().snapshot.closed = true;
        Ok(())
    }
}

/// Observable state of the simulated editor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub scrollable: bool,
    pub top_divider_opacity: f64,
    pub bottom_divider_opacity: f64,
    pub focus_count: usize,
    pub empty: bool,
}

struct EditorState {
    chrome: ChromeMeasurements,
    snapshot: EditorSnapshot,
}

pub struct SimulatedEditor {
    state: Mutex<EditorState>,
}

impl SimulatedEditor {
    pub fn new(chrome: ChromeMeasurements) -> Self {
        Self {
            state: Mutex::new(EditorState {
                chrome,
                snapshot: EditorSnapshot {
                    scrollable: false,
                    top_divider_opacity: 0.0,
                    bottom_divider_opacity: 0.0,
                    focus_count: 0,
                    empty: true,
                },
            }),
        }
    }

    pub fn set_chrome(&self, chrome: ChromeMeasurements) {
        self.state.lock().chrome = chrome;
    }

    /// Relayout after an edit: only the content region changes height
    pub fn set_content_height(&self, logical: f64) {
        let mut state = self.state.lock();
        state.chrome.editor_content = Some(logical);
        state.snapshot.empty = false;
    }

    pub fn set_empty(&self, empty: bool) {
        self.state.lock().snapshot.empty = empty;
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.state.lock().snapshot
    }
}

impl EditorView for SimulatedEditor {
    fn measure_chrome(&self) -> ChromeMeasurements {
        self.state.lock().chrome
    }

    fn set_content_scrollable(&self, scrollable: bool) {
        self.state.lock().snapshot.scrollable = scrollable;
    }

    fn set_divider_opacity(&self, top: f64, bottom: f64) {
        let mut state = self.state.lock();
        state.snapshot.top_divider_opacity = top;
        state.snapshot.bottom_divider_opacity = bottom;
    }

    fn focus(&self) {
        self.state.lock().snapshot.focus_count += 1;
    }

    fn is_empty(&self) -> bool {
        self.state.lock().snapshot.empty
    }
}

/// Records windows it was asked to open
#[derive(Default)]
pub struct SimulatedSpawner {
    opened: Mutex<Vec<(String, (f64, f64))>>,
}

impl SimulatedSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<(String, (f64, f64))> {
        self.opened.lock().clone()
    }
}

impl WindowSpawner for SimulatedSpawner {
    fn open_note_window(&self, url: &str, logical_size: (f64, f64)) -> Result<()> {
        self.opened.lock().push((url.to_string(), logical_size));
        Ok(())
    }
}

impl<E: EditorView> NoteWindowSizing<SimulatedWindow, E> {
    /// Deliver every queued resized event, in order
    pub fn deliver_resize_events(&self) -> Vec<ResizeOrigin> {
        self.window()
            .take_resize_events()
            .into_iter()
            .map(|size| self.handle_resized(size))
            .collect()
    }
}
