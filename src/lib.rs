//! Sticky Notes - adaptive window sizing for borderless note windows
//!
//! This library keeps a note window's physical size in step with the live
//! height of its rich-text content, while telling the user's own resizes apart
//! from the ones it issues itself.
//!
//! The host (webview shell, native toolkit, or the bundled simulator) implements
//! the [`bridge`] traits and forwards UI events to a
//! [`note_window::NoteWindowSizing`] per window.

pub mod bridge;
pub mod config;
pub mod error;
pub mod geometry;
pub mod height;
pub mod logging;
pub mod transaction;

// Per-window state and its durable storage
pub mod session;
pub mod window_storage;

// Controllers
pub mod auto_resize;
pub mod manual_resize;
pub mod scroll_shadow;
pub mod transition;

// UI-facing facade
pub mod note_window;

// Note collaborator contract, browse panel, new windows
pub mod notes;

// Headless host and scenario replay
pub mod replay;
pub mod simulator;
