//! Tests for the config file watcher.

use super::*;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::timeout;

#[test]
fn watcher_new_with_nonexistent_path_succeeds() {
    // The file may be created later; watching starts anyway
    let watcher = ConfigWatcher::new(PathBuf::from("/tmp/nonexistent_edgechat_test.toml"));
    assert!(watcher.is_ok());
}

#[tokio::test]
async fn burst_of_writes_sends_one_signal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "# v1").unwrap();

    let watcher = ConfigWatcher::new(path.clone()).unwrap();
    let (tx, mut rx) = broadcast::channel(16);
    tokio::spawn(async move {
        let _ = watcher.watch(tx).await;
    });
    tokio::time::sleep(Duration::from_millis(300)).await;

    std::fs::write(&path, "# v2").unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    std::fs::write(&path, "# v3").unwrap();

    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no signal within 5s")
        .unwrap();
    let second = timeout(Duration::from_millis(800), rx.recv()).await;
    assert!(second.is_err(), "burst was not debounced into one signal");
}

#[tokio::test]
async fn changes_to_sibling_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "# v1").unwrap();

    let watcher = ConfigWatcher::new(path).unwrap();
    let (tx, mut rx) = broadcast::channel(16);
    tokio::spawn(async move {
        let _ = watcher.watch(tx).await;
    });
    tokio::time::sleep(Duration::from_millis(300)).await;

    std::fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();

    let signal = timeout(Duration::from_millis(1200), rx.recv()).await;
    assert!(signal.is_err());
}
