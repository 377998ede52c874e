//! Content-fit height calculation.
//!
//! **Rules:**
//! - Target = (editor content + menu bar + header + both dividers) x scale factor
//! - Clamped to `[min_base_height * scale, floor(work_area_height * max_height_ratio)]`
//! - Rounded UP to whole physical pixels (under-rounding clips the last line)
//! - Any unmeasured chrome element means "skip this cycle", never an error
//!
//! Every controller that sizes the window to its content goes through
//! [`compute_target_height`]; none of them re-derive the chrome sum.

use serde::{Deserialize, Serialize};

use crate::bridge::EditorView;
use crate::config::SizingConfig;
use crate::geometry::MonitorGeometry;

/// Rendered (logical) heights measured live from the view tree.
///
/// `None` means the element is not mounted yet. Never cache these across calls:
/// layout can change between keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChromeMeasurements {
    pub editor_content: Option<f64>,
    pub menu_bar: Option<f64>,
    pub header: Option<f64>,
    pub top_divider: Option<f64>,
    pub bottom_divider: Option<f64>,
}

impl ChromeMeasurements {
    /// All five elements measured
    pub fn mounted(
        editor_content: f64,
        menu_bar: f64,
        header: f64,
        top_divider: f64,
        bottom_divider: f64,
    ) -> Self {
        Self {
            editor_content: Some(editor_content),
            menu_bar: Some(menu_bar),
            header: Some(header),
            top_divider: Some(top_divider),
            bottom_divider: Some(bottom_divider),
        }
    }

    /// Logical sum of every chrome height, or None if anything is unmounted
    pub fn total_logical(&self) -> Option<f64> {
        Some(
            self.editor_content?
                + self.menu_bar?
                + self.header?
                + self.top_divider?
                + self.bottom_divider?,
        )
    }
}

/// Physical height bounds on one monitor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingLimits {
    pub scale_factor: f64,
    pub min_height: f64,
    pub max_height: f64,
}

/// Result of a content-fit calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightPlan {
    /// Target window height in physical pixels
    pub height: u32,
    /// The content no longer fits below MAX_HEIGHT, so the viewport must scroll
    pub scrollable: bool,
}

impl HeightPlan {
    /// Apply the viewport side effects that accompany a content-fit resize.
    ///
    /// Both divider shadows go back to zero; while the viewport is scrollable the
    /// next scroll event hands them back to scroll-position control.
    pub fn apply_viewport_effects<E: EditorView + ?Sized>(&self, editor: &E) {
        editor.set_content_scrollable(self.scrollable);
        editor.set_divider_opacity(0.0, 0.0);
    }
}

/// Clamp a logical chrome total to a physical window height
pub fn clamp_to_limits(total_logical: f64, limits: &SizingLimits) -> HeightPlan {
    let calculated = (total_logical * limits.scale_factor).max(limits.min_height);
    let height = calculated.min(limits.max_height).ceil();
    HeightPlan {
        height: height.max(0.0) as u32,
        scrollable: calculated >= limits.max_height,
    }
}

/// Compute the content-fit window height.
///
/// Returns None when any chrome element has not been measured yet; the caller
/// skips this resize cycle and the next transaction re-measures.
pub fn compute_target_height(
    chrome: &ChromeMeasurements,
    monitor: &MonitorGeometry,
    config: &SizingConfig,
) -> Option<HeightPlan> {
    let total = chrome.total_logical()?;
    Some(clamp_to_limits(total, &config.limits(monitor)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PhysicalPosition, PhysicalSize};

    fn monitor(scale_factor: f64, work_area_height: u32) -> MonitorGeometry {
        MonitorGeometry {
            scale_factor,
            work_area_height,
            position: PhysicalPosition::new(0, 0),
            size: PhysicalSize::new(1920, 1080),
        }
    }

    /// Chrome whose five parts add up to `total` logical px
    fn chrome_totalling(total: f64) -> ChromeMeasurements {
        ChromeMeasurements::mounted(total - 72.0, 36.0, 34.0, 1.0, 1.0)
    }

    fn plan_for(total: f64, monitor: MonitorGeometry) -> HeightPlan {
        compute_target_height(&chrome_totalling(total), &monitor, &SizingConfig::default())
            .unwrap()
    }

    #[test]
    fn test_sums_all_chrome() {
        let chrome = ChromeMeasurements::mounted(120.0, 36.0, 34.0, 1.0, 1.0);
        assert_eq!(chrome.total_logical(), Some(192.0));
    }

    #[test]
    fn test_within_bounds_is_scaled() {
        // 200 logical at 2x on a 1000px work area: MAX=750
        let plan = plan_for(200.0, monitor(2.0, 1000));
        assert_eq!(plan.height, 400);
        assert!(!plan.scrollable);
    }

    #[test]
    fn test_clamped_to_max_becomes_scrollable() {
        let plan = plan_for(1000.0, monitor(1.0, 800));
        assert_eq!(plan.height, 600);
        assert!(plan.scrollable);
    }

    #[test]
    fn test_exactly_max_counts_as_scrollable() {
        let plan = plan_for(600.0, monitor(1.0, 800));
        assert_eq!(plan.height, 600);
        assert!(plan.scrollable);
    }

    #[test]
    fn test_clamped_to_min() {
        let plan = plan_for(80.0, monitor(2.0, 1000));
        assert_eq!(plan.height, 230);
        assert!(!plan.scrollable);
    }

    #[test]
    fn test_rounds_up_fractional_pixels() {
        // 200.2 * 1.5 = 300.3 -> 301
        let plan = plan_for(200.2, monitor(1.5, 1000));
        assert_eq!(plan.height, 301);

        // MIN at 1.5x is 172.5 -> 173
        let plan = plan_for(80.0, monitor(1.5, 1000));
        assert_eq!(plan.height, 173);
    }

    #[test]
    fn test_unmounted_chrome_skips() {
        let mut chrome = chrome_totalling(200.0);
        chrome.menu_bar = None;
        assert_eq!(
            compute_target_height(&chrome, &monitor(1.0, 1000), &SizingConfig::default()),
            None
        );
        assert_eq!(ChromeMeasurements::default().total_logical(), None);
    }

    #[test]
    fn test_idempotent() {
        let chrome = chrome_totalling(333.3);
        let m = monitor(1.25, 1200);
        let config = SizingConfig::default();
        assert_eq!(
            compute_target_height(&chrome, &m, &config),
            compute_target_height(&chrome, &m, &config)
        );
    }

    #[test]
    fn test_max_wins_over_min_on_tiny_work_area() {
        // MAX = floor(100 * 0.75) = 75 < MIN = 115
        let plan = plan_for(90.0, monitor(1.0, 100));
        assert_eq!(plan.height, 75);
        assert!(plan.scrollable);
    }
}
