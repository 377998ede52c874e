//! Structured JSONL logging plus human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (~/.sticky/logs/sticky-notes.jsonl) - structured, greppable
//! - **Pretty to stderr** - human-readable for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use sticky_notes::logging;
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init();
//!
//! tracing::info!(event_type = "app_start", "Replay started");
//! ```

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::geometry::PhysicalSize;

static LOG_BUFFER: OnceLock<Mutex<VecDeque<String>>> = OnceLock::new();
const MAX_LOG_LINES: usize = 50;

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
/// If the log file cannot be opened, only the stderr layer is installed.
pub fn init() -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let log_path = log_path();

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            None
        }
    };

    let (subscriber, file_guard) = build_subscriber(env_filter, file);
    subscriber.init();

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Registry with the env filter, the JSONL file layer (when `file` is given)
/// and the compact stderr layer.
fn build_subscriber(
    env_filter: EnvFilter,
    file: Option<File>,
) -> (impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>) {
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    // Non-blocking writer so logging never stalls the event loop
    let (json_layer, file_guard) = match file {
        Some(file) => {
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file);
            let json_layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(json_layer), Some(file_guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer);
    (subscriber, file_guard)
}

/// Get the log directory path (~/.sticky/logs/)
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".sticky").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("sticky-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join("sticky-notes.jsonl")
}

/// Category-tagged log line, kept in a small in-memory ring for debug overlays.
///
/// Prefer tracing macros directly for structured fields.
pub fn log(category: &str, message: &str) {
    add_to_buffer(category, message);
    tracing::info!(category = category, legacy = true, "{}", message);
}

fn add_to_buffer(category: &str, message: &str) {
    let buffer = LOG_BUFFER.get_or_init(|| Mutex::new(VecDeque::with_capacity(MAX_LOG_LINES)));
    let mut buf = buffer.lock();
    if buf.len() >= MAX_LOG_LINES {
        buf.pop_front();
    }
    buf.push_back(format!("[{}] {}", category, message));
}

/// Get recent log lines (oldest first)
pub fn get_recent_logs() -> Vec<String> {
    LOG_BUFFER
        .get()
        .map(|buffer| buffer.lock().iter().cloned().collect())
        .unwrap_or_default()
}

/// Get the last N log lines (newest first)
pub fn get_last_logs(n: usize) -> Vec<String> {
    LOG_BUFFER
        .get()
        .map(|buffer| buffer.lock().iter().rev().take(n).cloned().collect())
        .unwrap_or_default()
}

// =============================================================================
// STRUCTURED LOGGING HELPERS
// =============================================================================

/// Log a resize this layer issued.
///
/// `source` names the controller ("auto", "double_click", "browser_open", ...).
/// Per-keystroke resizes are frequent, so they stay at debug level.
pub fn log_resize_event(source: &str, from: PhysicalSize, to: PhysicalSize) {
    add_to_buffer(
        "RESIZE",
        &format!(
            "{} {}x{} -> {}x{}",
            source, from.width, from.height, to.width, to.height
        ),
    );

    if source == "auto" {
        tracing::debug!(
            event_type = "window_resize",
            source = source,
            from_width = from.width,
            from_height = from.height,
            to_width = to.width,
            to_height = to.height,
            "Resizing window"
        );
    } else {
        tracing::info!(
            event_type = "window_resize",
            source = source,
            from_width = from.width,
            from_height = from.height,
            to_width = to.width,
            to_height = to.height,
            "Resizing window"
        );
    }
}

/// Log a user-driven resize that suspended auto-sizing
pub fn log_manual_resize(window_id: &str, size: PhysicalSize) {
    add_to_buffer(
        "RESIZE",
        &format!("manual {} {}x{}", window_id, size.width, size.height),
    );

    tracing::info!(
        event_type = "manual_resize",
        window_id = window_id,
        width = size.width,
        height = size.height,
        "Manual resize detected - auto-sizing disabled"
    );
}
