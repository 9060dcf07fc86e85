//! Tests for user settings persistence
//!
//! Tests cover:
//! - Default settings values
//! - Serialization/deserialization
//! - Settings roundtrip through a file
//! - Corrupt and partial files

use envplot::analysis::{SmoothingLevel, SmoothingMethod};
use envplot::panels::{Panel, ViewMode};
use envplot::settings::UserSettings;

// ============================================
// Default Settings Tests
// ============================================

#[test]
fn test_settings_defaults() {
    let settings = UserSettings::default();
    assert_eq!(settings.version, 1);
    assert_eq!(settings.host, "192.168.0.1");
    assert_eq!(settings.username, "admin");
    assert_eq!(settings.directory, "/G/USD_TPL/");
    assert_eq!(settings.smoothing_level, SmoothingLevel::Off);
    assert_eq!(settings.smoothing_method, SmoothingMethod::Median);
    assert_eq!(settings.view_mode, ViewMode::All);
}

// ============================================
// Serialization Tests
// ============================================

#[test]
fn test_settings_never_contain_password() {
    let json = serde_json::to_string(&UserSettings::default()).unwrap();
    assert!(!json.to_lowercase().contains("password"));
}

#[test]
fn test_settings_roundtrip_json() {
    let settings = UserSettings {
        host: "10.0.0.5:2121".to_string(),
        smoothing_level: SmoothingLevel::VeryHigh,
        smoothing_method: SmoothingMethod::Mean,
        view_mode: ViewMode::Single(Panel::FeelsLike),
        ..UserSettings::default()
    };
    let json = serde_json::to_string_pretty(&settings).unwrap();
    let restored: UserSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, settings);
}

#[test]
fn test_partial_json_fills_defaults() {
    let restored: UserSettings = serde_json::from_str(r#"{"host": "station.lan"}"#).unwrap();
    assert_eq!(restored.host, "station.lan");
    assert_eq!(restored.username, "admin");
    assert_eq!(restored.directory, "/G/USD_TPL/");
}

// ============================================
// File Tests
// ============================================

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = UserSettings {
        username: "observer".to_string(),
        ..UserSettings::default()
    };
    settings.save_to(&path).unwrap();
    assert_eq!(UserSettings::load_from(&path), settings);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = UserSettings::load_from(&dir.path().join("nope.json"));
    assert_eq!(loaded, UserSettings::default());
}

#[test]
fn test_corrupt_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(UserSettings::load_from(&path), UserSettings::default());
}
