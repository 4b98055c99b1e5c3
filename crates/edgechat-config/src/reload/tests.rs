//! Tests for the reload manager.

use std::time::Duration;

use super::manager::ReloadManager;
use crate::schema::ModelProvider;
use edgechat_common::ConfigError;
use tokio::time::timeout;

#[tokio::test]
async fn start_with_nonexistent_path_creates_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let (config, _rx) = ReloadManager::start(path.clone());
    assert_eq!(config.session.max_turns, 10);
    assert!(path.exists());
}

#[tokio::test]
async fn start_with_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[model]
provider = "echo"
"#,
    )
    .unwrap();

    let (config, rx) = ReloadManager::start(path);
    assert_eq!(config.model.provider, ModelProvider::Echo);
    assert_eq!(*rx.borrow(), config);
}

#[test]
fn reload_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[generation]
top_k = 0
"#,
    )
    .unwrap();

    let manager = ReloadManager { config_path: path };
    let err = manager.reload_config().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn reload_accepts_unknown_selected_persona() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[personas]
selected = 9
"#,
    )
    .unwrap();

    let manager = ReloadManager { config_path: path };
    let config = manager.reload_config().unwrap();
    assert_eq!(config.personas.selected, 9);
    let persona = config.personas.get_or_first(config.personas.selected).unwrap();
    assert_eq!(persona.name, "Helpful Assistant");
}

#[tokio::test]
async fn file_change_is_published() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[generation]\ntop_k = 16\n").unwrap();

    let (config, mut rx) = ReloadManager::start(path.clone());
    assert_eq!(config.generation.top_k, 16);
    // Give the watcher time to register before editing
    tokio::time::sleep(Duration::from_millis(300)).await;

    std::fs::write(&path, "[generation]\ntop_k = 40\n").unwrap();

    timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("no reload within 5s")
        .unwrap();
    assert_eq!(rx.borrow_and_update().generation.top_k, 40);
}

#[tokio::test]
async fn identical_rewrite_is_not_published() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let contents = "[generation]\ntop_k = 16\n";
    std::fs::write(&path, contents).unwrap();

    let (_config, mut rx) = ReloadManager::start(path.clone());
    tokio::time::sleep(Duration::from_millis(300)).await;

    std::fs::write(&path, contents).unwrap();

    // Debounce is 500ms; wait well past it
    let woke = timeout(Duration::from_millis(1500), rx.changed()).await;
    assert!(woke.is_err());
}

#[tokio::test]
async fn invalid_edit_is_not_published() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[generation]\ntop_k = 16\n").unwrap();

    let (_config, mut rx) = ReloadManager::start(path.clone());
    tokio::time::sleep(Duration::from_millis(300)).await;

    std::fs::write(&path, "[generation]\ntop_k = 0\n").unwrap();

    let woke = timeout(Duration::from_millis(1500), rx.changed()).await;
    assert!(woke.is_err());
    assert_eq!(rx.borrow().generation.top_k, 16);
}
