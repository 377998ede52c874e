//! Divider shadows that track the content scroll position.
//!
//! The top shadow fades in over the first few pixels scrolled; the bottom
//! shadow fades out as the end of the content comes into view.

use serde::{Deserialize, Serialize};

use crate::bridge::EditorView;
use crate::config::SizingConfig;

/// Scroll state of the content container, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowOpacity {
    pub top: f64,
    pub bottom: f64,
}

pub fn shadow_opacity(metrics: &ScrollMetrics, config: &SizingConfig) -> ShadowOpacity {
    let remaining = metrics.scroll_height - (metrics.scroll_top + metrics.client_height);
    ShadowOpacity {
        top: (metrics.scroll_top / config.top_shadow_fade_distance).clamp(0.0, 1.0),
        bottom: (remaining / config.bottom_shadow_fade_distance).clamp(0.0, 1.0),
    }
}

pub fn on_scroll<E: EditorView + ?Sized>(
    editor: &E,
    metrics: &ScrollMetrics,
    config: &SizingConfig,
) -> ShadowOpacity {
    let opacity = shadow_opacity(metrics, config);
    editor.set_divider_opacity(opacity.top, opacity.bottom);
    opacity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            scroll_height: 1000.0,
            client_height: 600.0,
        }
    }

    #[test]
    fn test_at_top_only_bottom_shadow() {
        let opacity = shadow_opacity(&metrics(0.0), &SizingConfig::default());
        assert_eq!(opacity, ShadowOpacity { top: 0.0, bottom: 1.0 });
    }

    #[test]
    fn test_fades_near_edges() {
        let config = SizingConfig::default();

        // 6px from the top, 391.5px from the bottom
        let near_top = shadow_opacity(&metrics(6.0), &config);
        assert!((near_top.top - 0.4).abs() < 1e-9);
        assert_eq!(near_top.bottom, 1.0);

        // 8.5px left below the fold
        let near_bottom = shadow_opacity(&metrics(391.5), &config);
        assert_eq!(near_bottom.top, 1.0);
        assert!((near_bottom.bottom - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_at_bottom_only_top_shadow() {
        let opacity = shadow_opacity(&metrics(400.0), &SizingConfig::default());
        assert_eq!(opacity, ShadowOpacity { top: 1.0, bottom: 0.0 });
    }

    #[test]
    fn test_overscroll_stays_in_range() {
        let opacity = shadow_opacity(&metrics(-20.0), &SizingConfig::default());
        assert_eq!(opacity.top, 0.0);
        let opacity = shadow_opacity(&metrics(450.0), &SizingConfig::default());
        assert_eq!(opacity.bottom, 0.0);
    }
}
