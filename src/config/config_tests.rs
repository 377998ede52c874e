use super::*;
use crate::error::StickyError;
use crate::geometry::{MonitorGeometry, PhysicalPosition, PhysicalSize};
use tempfile::tempdir;

fn monitor(scale_factor: f64, work_area_height: u32) -> MonitorGeometry {
    MonitorGeometry {
        scale_factor,
        work_area_height,
        position: PhysicalPosition::new(0, 0),
        size: PhysicalSize::new(1920, work_area_height + 40),
    }
}

#[test]
fn test_default_config() {
    let config = SizingConfig::default();
    assert_eq!(config.min_base_height, DEFAULT_MIN_BASE_HEIGHT);
    assert_eq!(config.max_height_ratio, DEFAULT_MAX_HEIGHT_RATIO);
    assert_eq!(config.browser_open_height, DEFAULT_BROWSER_OPEN_HEIGHT);
    assert_eq!(config.new_window_size(), (400.0, 115.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_limits_scale_with_monitor() {
    let config = SizingConfig::default();

    let limits = config.limits(&monitor(2.0, 1000));
    assert_eq!(limits.min_height, 230.0);
    assert_eq!(limits.max_height, 750.0);

    // MAX is floored: 0.75 * 801 = 600.75
    let limits = config.limits(&monitor(1.0, 801));
    assert_eq!(limits.max_height, 600.0);
}

#[test]
fn test_browser_open_height_is_scaled() {
    let config = SizingConfig::default();
    assert_eq!(config.browser_open_height(&monitor(1.0, 800)), 500);
    assert_eq!(config.browser_open_height(&monitor(2.0, 1600)), 1000);
    assert_eq!(config.browser_open_height(&monitor(1.5, 1200)), 750);
}

#[test]
fn test_corner_position() {
    let config = SizingConfig::default();
    let m = MonitorGeometry {
        scale_factor: 2.0,
        work_area_height: 1700,
        position: PhysicalPosition::new(100, 50),
        size: PhysicalSize::new(2880, 1800),
    };
    let pos = config.corner_position(&m, PhysicalSize::new(800, 400));
    // 100 + 2880 - 800 - 80, 50 + 200
    assert_eq!(pos, PhysicalPosition::new(2100, 250));
}

#[test]
fn test_partial_json_uses_defaults() {
    let json = r#"{ "maxHeightRatio": 0.5, "cornerOffsetX": 24 }"#;
    let config: SizingConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.max_height_ratio, 0.5);
    assert_eq!(config.corner_offset_x, 24.0);
    assert_eq!(config.min_base_height, DEFAULT_MIN_BASE_HEIGHT);
    assert_eq!(config.top_shadow_fade_distance, 15.0);
}

#[test]
fn test_config_serialization_is_camel_case() {
    let json = serde_json::to_string(&SizingConfig::default()).unwrap();
    assert!(json.contains("\"minBaseHeight\""));
    assert!(json.contains("\"browserOpenHeight\""));
    assert!(!json.contains("min_base_height"));
}

#[test]
fn test_load_config_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "browserOpenHeight": 420 }"#).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.browser_open_height, 420.0);
    assert_eq!(config.max_height_ratio, DEFAULT_MAX_HEIGHT_RATIO);
}

#[test]
fn test_load_config_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_config_from(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, StickyError::Io { .. }));
}

#[test]
fn test_load_config_invalid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, StickyError::Serialization(_)));
}

#[test]
fn test_load_config_rejects_bad_ratio() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "maxHeightRatio": 1.5 }"#).unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, StickyError::Config(_)));
}

#[test]
fn test_default_config_path() {
    let path = default_config_path();
    assert!(path.ends_with(".sticky/config.json"));
}
