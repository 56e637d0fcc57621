//! Tests for bootstrap configuration loading
//!
//! Covers:
//! - Missing config files degrade to defaults instead of failing startup
//! - Malformed config files are reported
//! - Explicit path resolution
//!
//! Uses serial_test for tests that touch environment-dependent lookup.

use pragati_common::config::{resolve_config_path, ConfigOverrides};
use pragati_common::{Error, TomlConfig};
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(content.as_bytes())
        .expect("Should write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
host = "127.0.0.1"
port = 8101
database_path = "/var/lib/pragati/ml.db"
model_path = "/var/lib/pragati/performance.json"

[cors]
allowed_origins = ["http://localhost:3000", "http://localhost:3001"]

[logging]
level = "debug"
"#,
    );

    let config = TomlConfig::load(file.path()).expect("Should parse config");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8101);
    assert_eq!(
        config.database_path,
        Some(PathBuf::from("/var/lib/pragati/ml.db"))
    );
    assert_eq!(
        config.model_path,
        Some(PathBuf::from("/var/lib/pragati/performance.json"))
    );
    assert_eq!(config.cors.allowed_origins.len(), 2);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_partial_config_fills_defaults() {
    let file = write_config("port = 9000\n");

    let config = TomlConfig::load(file.path()).expect("Should parse config");
    assert_eq!(config.port, 9000);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.logging.level, "info");
    assert!(config.database_path.is_none());
}

#[test]
fn test_malformed_config_is_error() {
    let file = write_config("port = \"not a number\"\n");

    let result = TomlConfig::load_or_default(Some(file.path()));
    assert!(matches!(result, Err(Error::Toml(_))));
}

#[test]
fn test_missing_explicit_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let missing = dir.path().join("absent.toml");

    let config = TomlConfig::load_or_default(Some(&missing)).expect("Should fall back");
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_load_missing_file_directly_is_io_error() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let result = TomlConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_user_config_dir_is_discovered() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let config_dir = dir.path().join("pragati");
    std::fs::create_dir_all(&config_dir).expect("Should create config dir");
    let config_path = config_dir.join("config.toml");
    std::fs::write(&config_path, "port = 8222\n").expect("Should write config");

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let resolved = resolve_config_path(None);
    let config = TomlConfig::load_or_default(None);

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(resolved, Some(config_path));
    assert_eq!(config.expect("Should load discovered config").port, 8222);
}

#[test]
#[serial]
fn test_explicit_path_wins_resolution() {
    let explicit = PathBuf::from("/tmp/pragati-explicit.toml");
    assert_eq!(resolve_config_path(Some(&explicit)), Some(explicit));
}

#[test]
fn test_overrides_applied_after_file() {
    let file = write_config("port = 9000\n[logging]\nlevel = \"warn\"\n");

    let config = TomlConfig::load(file.path())
        .and_then(|c| {
            c.apply(ConfigOverrides {
                host: Some("127.0.0.1".to_string()),
                log_level: Some("debug".to_string()),
                ..Default::default()
            })
        })
        .expect("Should merge overrides");

    assert_eq!(config.bind_address(), "127.0.0.1:9000");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_override_with_empty_host_is_rejected() {
    let result = TomlConfig::default().apply(ConfigOverrides {
        host: Some("  ".to_string()),
        ..Default::default()
    });
    assert!(matches!(result, Err(Error::Config(_))));
}
