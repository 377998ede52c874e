//! Physical window and monitor geometry.
//!
//! All values here are device pixels (after the monitor scale factor has been
//! applied), which is what native window sizing calls accept. Logical layout
//! heights are plain `f64`s until the height calculator scales them.

use serde::{Deserialize, Serialize};

/// Window size in physical pixels.
///
/// Also used as the `WindowSizeSnapshot` captured before a transient transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Same width, different height. Content-driven resizes never touch width.
    pub const fn with_height(self, height: u32) -> Self {
        Self {
            width: self.width,
            height,
        }
    }
}

/// Window or monitor origin in physical pixels (may be negative on multi-monitor setups)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhysicalPosition {
    pub x: i32,
    pub y: i32,
}

impl PhysicalPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The monitor the window currently sits on, queried fresh for every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorGeometry {
    pub scale_factor: f64,
    /// Height of the usable work area (excludes menu bar / dock / taskbar)
    pub work_area_height: u32,
    pub position: PhysicalPosition,
    pub size: PhysicalSize,
}

impl MonitorGeometry {
    /// Convert a logical length to physical pixels on this monitor
    pub fn to_physical(&self, logical: f64) -> f64 {
        logical * self.scale_factor
    }
}
