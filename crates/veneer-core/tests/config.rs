//! Integration tests for configuration loading.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use veneer_core::{ConfigError, ShimConfig, Size};

/// A config file on disk is loaded and validated.
#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timer_hz = 100").unwrap();
    writeln!(file, "fallback_width = 720").unwrap();
    writeln!(file, "background = [16, 16, 24]").unwrap();

    let config = ShimConfig::load(file.path()).unwrap();
    assert_eq!(config.timer_period(), Duration::from_millis(10));
    assert_eq!(config.fallback_size(), Size::new(720, 800));
    assert_eq!(config.background, [16, 16, 24]);
}

/// Out-of-range values in a file are rejected.
#[test]
fn test_load_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("veneer.toml");
    std::fs::write(&path, "timer_hz = 5000\n").unwrap();

    let err = ShimConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "timer_hz", .. }));
    assert!(err.to_string().contains("timer_hz"));
}

/// Serialising the defaults round-trips through TOML.
#[test]
fn test_default_round_trip() {
    let text = toml::to_string(&ShimConfig::default()).unwrap();
    assert_eq!(ShimConfig::from_toml_str(&text).unwrap(), ShimConfig::default());
}
