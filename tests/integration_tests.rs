use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

use softshelf::catalog::sample_page;
use softshelf::controller::Theme;
use softshelf::page::{FileStore, PreferenceStore, Window};
use softshelf::{Config, Runtime};

#[test]
fn test_cli_help_flag() {
    cargo_bin_cmd!()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("software catalog"))
        .stdout(predicate::str::contains("--store"));
}

#[test]
fn test_cli_version_flag() {
    cargo_bin_cmd!()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("softshelf"));
}

#[test]
fn test_cli_rejects_unknown_flag() {
    cargo_bin_cmd!()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}

fn start_with_store(path: &std::path::Path) -> Runtime {
    let store = FileStore::open(path).unwrap();
    Runtime::start(sample_page(), Window::new(Box::new(store)), &Config::default())
}

#[test]
fn test_theme_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    let mut first = start_with_store(&path);
    assert_eq!(first.theme(), Some(Theme::Light));
    first.set_theme(Theme::Dark);
    drop(first);

    let second = start_with_store(&path);
    assert_eq!(second.theme(), Some(Theme::Dark));
    let body = second.document().body();
    assert_eq!(second.document().attribute(body, "data-theme"), Some("dark"));
}

#[test]
fn test_system_preference_applies_without_saved_theme() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("prefs.json")).unwrap();
    assert_eq!(store.get("theme"), None);

    let window = Window::new(Box::new(store)).with_system_dark(true);
    let runtime = Runtime::start(sample_page(), window, &Config::default());
    assert_eq!(runtime.theme(), Some(Theme::Dark));
}
