//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Base (logical) window height; the minimum window height is this times the scale factor.
/// Also the height new note windows open at.
pub const DEFAULT_MIN_BASE_HEIGHT: f64 = 115.0;

/// Fraction of the monitor work area a content-sized window may occupy
pub const DEFAULT_MAX_HEIGHT_RATIO: f64 = 0.75;

/// Logical height the window grows to while the note browser is open
pub const DEFAULT_BROWSER_OPEN_HEIGHT: f64 = 500.0;

/// Logical offsets of the "collapse to corner" position (from the right and top edges)
pub const DEFAULT_CORNER_OFFSET_X: f64 = 40.0;
pub const DEFAULT_CORNER_OFFSET_Y: f64 = 100.0;

/// Logical size of a freshly opened note window
pub const DEFAULT_WINDOW_WIDTH: f64 = 400.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 115.0;

/// Scroll distance (logical px) over which the divider shadows fade in
pub const DEFAULT_BOTTOM_SHADOW_FADE_DISTANCE: f64 = 17.0;
pub const DEFAULT_TOP_SHADOW_FADE_DISTANCE: f64 = 15.0;
