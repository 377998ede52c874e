use thiserror::Error;
use tracing::{error, warn};

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational, never shown as a toast
    Warning,  // recoverable
    Error,    // operation failed
}

/// Domain-specific errors for the sticky notes window layer
#[derive(Error, Debug)]
pub enum StickyError {
    #[error("Window is no longer available: {0}")]
    WindowUnavailable(String),

    #[error("Host bridge call failed: {0}")]
    Bridge(String),

    #[error("Window storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Failed to (de)serialize: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("An empty note is already open")]
    EmptyNoteOpen,
}

impl StickyError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A destroyed window mid-flight is the normal end of a window's life
            Self::WindowUnavailable(_) => ErrorSeverity::Info,
            Self::Bridge(_) => ErrorSeverity::Warning,
            Self::Storage(_) => ErrorSeverity::Warning,
            Self::Serialization(_) => ErrorSeverity::Warning,
            Self::Io { .. } => ErrorSeverity::Warning,
            Self::Config(_) => ErrorSeverity::Warning,
            Self::NoteNotFound(_) => ErrorSeverity::Error,
            Self::EmptyNoteOpen => ErrorSeverity::Warning,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::WindowUnavailable(_) => "The window was closed".to_string(),
            Self::Bridge(msg) => format!("Window operation failed: {}", msg),
            Self::Storage(_) => "Could not save window preferences".to_string(),
            Self::Serialization(e) => format!("Invalid data format: {}", e),
            Self::Io { path, .. } => format!("Could not access {}", path),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
            Self::NoteNotFound(id) => format!("Note {} no longer exists", id),
            Self::EmptyNoteOpen => "You already have an empty note".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StickyError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and user doesn't need to know.
///
/// Every host-bridge await in the sizing controllers goes through one of these,
/// so a failed call leaves the window at its current size.
///
/// # Examples
///
/// ```ignore
/// use sticky_notes::error::ResultExt;
///
/// let Some(size) = window.outer_size().await.warn_on_err() else {
///     return;
/// };
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
