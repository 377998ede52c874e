//! Configuration type definitions

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::geometry::{MonitorGeometry, PhysicalPosition, PhysicalSize};
use crate::height::SizingLimits;

/// Tunable constants for window sizing.
///
/// Logical values are multiplied by the monitor scale factor at the point of use,
/// so one config serves every monitor the window can move to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingConfig {
    /// Minimum logical window height (default: 115)
    #[serde(default = "default_min_base_height")]
    pub min_base_height: f64,
    /// Share of the monitor work area the window may auto-grow into (default: 0.75)
    #[serde(default = "default_max_height_ratio")]
    pub max_height_ratio: f64,
    /// Logical height while the note browser is open (default: 500)
    #[serde(default = "default_browser_open_height")]
    pub browser_open_height: f64,
    /// Logical gap between the collapsed window and the monitor's right edge (default: 40)
    #[serde(default = "default_corner_offset_x")]
    pub corner_offset_x: f64,
    /// Logical gap between the collapsed window and the monitor's top edge (default: 100)
    #[serde(default = "default_corner_offset_y")]
    pub corner_offset_y: f64,
    #[serde(default = "default_window_width")]
    pub default_window_width: f64,
    #[serde(default = "default_window_height")]
    pub default_window_height: f64,
    #[serde(default = "default_bottom_shadow_fade_distance")]
    pub bottom_shadow_fade_distance: f64,
    #[serde(default = "default_top_shadow_fade_distance")]
    pub top_shadow_fade_distance: f64,
}

fn default_min_base_height() -> f64 {
    DEFAULT_MIN_BASE_HEIGHT
}
fn default_max_height_ratio() -> f64 {
    DEFAULT_MAX_HEIGHT_RATIO
}
fn default_browser_open_height() -> f64 {
    DEFAULT_BROWSER_OPEN_HEIGHT
}
fn default_corner_offset_x() -> f64 {
    DEFAULT_CORNER_OFFSET_X
}
fn default_corner_offset_y() -> f64 {
    DEFAULT_CORNER_OFFSET_Y
}
fn default_window_width() -> f64 {
    DEFAULT_WINDOW_WIDTH
}
fn default_window_height() -> f64 {
    DEFAULT_WINDOW_HEIGHT
}
fn default_bottom_shadow_fade_distance() -> f64 {
    DEFAULT_BOTTOM_SHADOW_FADE_DISTANCE
}
fn default_top_shadow_fade_distance() -> f64 {
    DEFAULT_TOP_SHADOW_FADE_DISTANCE
}

impl Default for SizingConfig {
    fn default() -> Self {
        SizingConfig {
            min_base_height: DEFAULT_MIN_BASE_HEIGHT,
            max_height_ratio: DEFAULT_MAX_HEIGHT_RATIO,
            browser_open_height: DEFAULT_BROWSER_OPEN_HEIGHT,
            corner_offset_x: DEFAULT_CORNER_OFFSET_X,
            corner_offset_y: DEFAULT_CORNER_OFFSET_Y,
            default_window_width: DEFAULT_WINDOW_WIDTH,
            default_window_height: DEFAULT_WINDOW_HEIGHT,
            bottom_shadow_fade_distance: DEFAULT_BOTTOM_SHADOW_FADE_DISTANCE,
            top_shadow_fade_distance: DEFAULT_TOP_SHADOW_FADE_DISTANCE,
        }
    }
}

impl SizingConfig {
    /// MIN/MAX physical height bounds on the given monitor
    pub fn limits(&self, monitor: &MonitorGeometry) -> SizingLimits {
        SizingLimits {
            scale_factor: monitor.scale_factor,
            min_height: monitor.to_physical(self.min_base_height),
            max_height: (f64::from(monitor.work_area_height) * self.max_height_ratio).floor(),
        }
    }

    /// Physical height the window grows to while the note browser is open
    pub fn browser_open_height(&self, monitor: &MonitorGeometry) -> u32 {
        monitor.to_physical(self.browser_open_height).ceil() as u32
    }

    /// Top-right "collapse to corner" position for a window of `window` size
    pub fn corner_position(
        &self,
        monitor: &MonitorGeometry,
        window: PhysicalSize,
    ) -> PhysicalPosition {
        let x = f64::from(monitor.position.x)
            + (f64::from(monitor.size.width)
                - f64::from(window.width)
                - monitor.to_physical(self.corner_offset_x));
        let y = f64::from(monitor.position.y) + monitor.to_physical(self.corner_offset_y);
        PhysicalPosition::new(x.round() as i32, y.round() as i32)
    }

    /// Logical (width, height) of a newly opened note window
    pub fn new_window_size(&self) -> (f64, f64) {
        (self.default_window_width, self.default_window_height)
    }

    /// Reject values that would make every calculation meaningless
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_height_ratio > 0.0 && self.max_height_ratio <= 1.0) {
            return Err(format!(
                "maxHeightRatio must be in (0, 1], got {}",
                self.max_height_ratio
            ));
        }
        if self.min_base_height <= 0.0 {
            return Err(format!(
                "minBaseHeight must be positive, got {}",
                self.min_base_height
            ));
        }
        if self.bottom_shadow_fade_distance <= 0.0 || self.top_shadow_fade_distance <= 0.0 {
            return Err("shadow fade distances must be positive".to_string());
        }
        Ok(())
    }
}
