// tests/api_sync.rs

mod common;

use common::{list_files, MockGitHub};
use regsync::progress::NoOpProgress;
use regsync::{update, SyncConfig, SyncConfigBuilder, SyncMethod};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn api_config(mock: &MockGitHub, target: &Path, sparse_dir: &str, cleanup: bool) -> SyncConfig {
    SyncConfigBuilder::new()
        .target(target)
        .repo_url("https://github.com/o/r.git")
        .branch("master")
        .sparse_dir(sparse_dir)
        .api_base_url(mock.base_url())
        .cleanup(cleanup)
        .build()
        .unwrap()
}

/// Serves a `regexes/` tree with one nested directory.
fn serve_regexes(mock: &MockGitHub) {
    let root = MockGitHub::contents_path("o", "r", "regexes");
    let client = MockGitHub::contents_path("o", "r", "regexes/client");
    mock.json(
        &root,
        json!([
            mock.file_entry("bots.yml", "/raw/bots.yml"),
            mock.dir_entry("client", &client),
        ]),
    );
    mock.json(
        &client,
        json!([
            mock.file_entry("browsers.yml", "/raw/client/browsers.yml"),
            mock.file_entry("mobile_apps.yml", "/raw/client/mobile_apps.yml"),
        ]),
    );
    mock.file("/raw/bots.yml", "- regex: 'Googlebot'\n");
    mock.file("/raw/client/browsers.yml", "- regex: 'Firefox'\n");
    mock.file("/raw/client/mobile_apps.yml", "- regex: 'Slack'\n");
}

#[test]
fn test_api_sync_mirrors_tree_and_writes_marker() {
    let mock = MockGitHub::start();
    serve_regexes(&mock);
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");

    let report = update(
        &api_config(&mock, &target, "regexes", false),
        "api",
        &NoOpProgress,
    )
    .unwrap();

    assert_eq!(report.method, SyncMethod::Api);
    assert_eq!(report.files_written, 3);
    assert!(report.failures.is_empty());
    assert_eq!(
        list_files(&target),
        vec![
            "__init__.py",
            "bots.yml",
            "client/browsers.yml",
            "client/mobile_apps.yml"
        ]
    );
    assert_eq!(
        fs::read_to_string(target.join("client/browsers.yml")).unwrap(),
        "- regex: 'Firefox'\n"
    );
    assert_eq!(fs::read(target.join("__init__.py")).unwrap().len(), 0);
}

#[test]
fn test_api_sync_survives_one_failing_download() {
    let mock = MockGitHub::start();
    let root = MockGitHub::contents_path("o", "r", "regexes");
    mock.json(
        &root,
        json!([
            mock.file_entry("one.yml", "/raw/one.yml"),
            mock.file_entry("two.yml", "/raw/two.yml"),
            mock.file_entry("three.yml", "/raw/three.yml"),
        ]),
    );
    mock.file("/raw/one.yml", "1");
    mock.status("/raw/two.yml", 500);
    mock.file("/raw/three.yml", "3");
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");

    let report = update(
        &api_config(&mock, &target, "regexes", false),
        "api",
        &NoOpProgress,
    )
    .unwrap();

    assert_eq!(report.files_written, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "two.yml");
    assert_eq!(
        list_files(&target),
        vec!["__init__.py", "one.yml", "three.yml"]
    );
}

#[test]
fn test_api_sync_single_file_lands_under_its_name() {
    let mock = MockGitHub::start();
    let path = MockGitHub::contents_path("o", "r", "regexes/bots.yml");
    mock.json(
        &path,
        json!({
            "name": "bots.yml",
            "type": "file",
            "url": mock.url(&path),
            "download_url": mock.url("/raw/bots.yml"),
        }),
    );
    mock.file("/raw/bots.yml", "bots");
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");

    let report = update(
        &api_config(&mock, &target, "regexes/bots.yml", false),
        "api",
        &NoOpProgress,
    )
    .unwrap();

    assert_eq!(report.files_written, 1);
    assert_eq!(list_files(&target), vec!["__init__.py", "bots.yml"]);
    assert_eq!(fs::read_to_string(target.join("bots.yml")).unwrap(), "bots");
}

#[test]
fn test_api_sync_with_cleanup_removes_stale_files() {
    let mock = MockGitHub::start();
    serve_regexes(&mock);
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");
    fs::create_dir_all(target.join("old")).unwrap();
    fs::write(target.join("old/removed_upstream.yml"), "stale").unwrap();

    let config = api_config(&mock, &target, "regexes", true);
    update(&config, "api", &NoOpProgress).unwrap();
    let first = list_files(&target);
    assert!(!target.join("old").exists());

    update(&config, "api", &NoOpProgress).unwrap();
    assert_eq!(list_files(&target), first);
}

#[test]
fn test_api_sync_resync_drops_files_removed_upstream() {
    let mock = MockGitHub::start();
    serve_regexes(&mock);
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");
    let config = api_config(&mock, &target, "regexes", true);

    update(&config, "api", &NoOpProgress).unwrap();
    assert!(target.join("bots.yml").exists());

    // bots.yml disappears upstream and browsers.yml changes.
    let root = MockGitHub::contents_path("o", "r", "regexes");
    let client = MockGitHub::contents_path("o", "r", "regexes/client");
    mock.json(&root, json!([mock.dir_entry("client", &client)]));
    mock.file("/raw/client/browsers.yml", "- regex: 'Chrome'\n");

    update(&config, "api", &NoOpProgress).unwrap();
    assert!(!target.join("bots.yml").exists());

    let fresh = temp.path().join("fresh");
    update(
        &api_config(&mock, &fresh, "regexes", true),
        "api",
        &NoOpProgress,
    )
    .unwrap();
    let files = list_files(&target);
    assert_eq!(files, list_files(&fresh));
    assert_eq!(
        files,
        vec!["__init__.py", "client/browsers.yml", "client/mobile_apps.yml"]
    );
    for file in &files {
        assert_eq!(
            fs::read(target.join(file)).unwrap(),
            fs::read(fresh.join(file)).unwrap(),
            "{} differs from a fresh sync",
            file
        );
    }
}

#[test]
fn test_api_sync_on_branch_with_slash() {
    let mock = MockGitHub::start();
    serve_regexes(&mock);
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");
    let config = SyncConfigBuilder::new()
        .target(&target)
        .repo_url("https://github.com/o/r.git")
        .branch("release/2.0")
        .sparse_dir("regexes")
        .api_base_url(mock.base_url())
        .build()
        .unwrap();

    let report = update(&config, "api", &NoOpProgress).unwrap();

    assert_eq!(report.files_written, 3);
    assert_eq!(
        list_files(&target),
        vec![
            "__init__.py",
            "bots.yml",
            "client/browsers.yml",
            "client/mobile_apps.yml"
        ]
    );
}

#[test]
fn test_api_sync_single_file_with_space_in_name() {
    let mock = MockGitHub::start();
    let path = "/repos/o/r/contents/regexes/my%20bots.yml";
    mock.json(
        path,
        json!({
            "name": "my bots.yml",
            "type": "file",
            "url": mock.url(path),
            "download_url": mock.url("/raw/my%20bots.yml"),
        }),
    );
    mock.file("/raw/my%20bots.yml", "spaced");
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");

    update(
        &api_config(&mock, &target, "regexes/my bots.yml", false),
        "api",
        &NoOpProgress,
    )
    .unwrap();

    assert_eq!(list_files(&target), vec!["__init__.py", "my bots.yml"]);
    assert_eq!(
        fs::read_to_string(target.join("my bots.yml")).unwrap(),
        "spaced"
    );
}

#[test]
fn test_api_sync_without_cleanup_keeps_existing_files() {
    let mock = MockGitHub::start();
    serve_regexes(&mock);
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("local_only.yml"), "mine").unwrap();
    fs::write(target.join("bots.yml"), "outdated").unwrap();

    update(
        &api_config(&mock, &target, "regexes", false),
        "api",
        &NoOpProgress,
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(target.join("local_only.yml")).unwrap(),
        "mine"
    );
    assert_eq!(
        fs::read_to_string(target.join("bots.yml")).unwrap(),
        "- regex: 'Googlebot'\n"
    );
}

#[test]
fn test_api_sync_of_missing_directory_still_marks_target() {
    let mock = MockGitHub::start();
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");

    let report = update(
        &api_config(&mock, &target, "does-not-exist", false),
        "api",
        &NoOpProgress,
    )
    .unwrap();

    assert_eq!(report.files_written, 0);
    assert_eq!(list_files(&target), vec!["__init__.py"]);
}

#[test]
fn test_api_sync_rejects_non_github_repository() {
    let mock = MockGitHub::start();
    let temp = tempdir().unwrap();
    let target = temp.path().join("upstream");
    let config = SyncConfigBuilder::new()
        .target(&target)
        .repo_url("https://gitlab.com/o/r.git")
        .api_base_url(mock.base_url())
        .build()
        .unwrap();

    let err = update(&config, "api", &NoOpProgress).unwrap_err();
    assert!(matches!(err, regsync::SyncError::InvalidUrl { .. }));
    assert!(!target.exists());
}
