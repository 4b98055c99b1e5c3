//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::ModelProvider;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_edgechat_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, edgechat_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[generation]
temperature = 0.7

[model]
provider = "echo"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!((config.generation.temperature - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.model.provider, ModelProvider::Echo);
    // Defaults preserved
    assert_eq!(config.generation.top_k, 16);
    assert_eq!(config.session.max_turns, 10);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, edgechat_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_keeps_them() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[session]
max_turns = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.max_turns, 0);
}

#[test]
fn load_or_create_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edgechat").join("config.toml");

    let config = load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.session.max_turns, 10);

    let reloaded = load_from_path(&path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::EdgechatConfig;

    let config: EdgechatConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config, EdgechatConfig::default());
}

#[test]
fn default_config_path_is_reasonable() {
    // May be unavailable in minimal CI environments without a home directory
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("edgechat"));
        assert!(path_str.ends_with("config.toml"));
    }
}
