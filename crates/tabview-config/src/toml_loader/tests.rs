//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::PlatformProfile;
use std::path::Path;
use tabview_common::ConfigError;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_tabview_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[view]
bounces = false
user_agent = "Host/2.0"

[platform]
profile = "uikit"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!(!config.view.bounces);
    assert_eq!(config.view.user_agent.as_deref(), Some("Host/2.0"));
    assert_eq!(config.platform.profile, PlatformProfile::UiKit);
    // Defaults preserved
    assert!(config.view.clipboard);
    assert!(config.view.file_read_access);
    assert_eq!(config.logging.level, "tabview=info");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn unknown_profile_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[platform]\nprofile = \"gtk\"\n").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn invalid_values_fall_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[view]
scale_factor = 12.0
bounces = false
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.view.scale_factor, 1.0);
    assert!(config.view.bounces);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tabview").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert!(config.view.bounces);
    assert_eq!(config.platform.profile, PlatformProfile::Auto);
}

#[test]
fn default_template_is_valid_toml() {
    let parsed: Result<crate::schema::TabviewConfig, _> =
        toml::from_str(template::default_config_toml());
    assert!(parsed.is_ok());
}

#[test]
fn default_config_path_ends_with_tabview() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("tabview/config.toml"));
    }
}
