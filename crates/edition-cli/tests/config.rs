use std::fs;

use edition_cli::config::{Config, ConfigError};
use tempfile::TempDir;

#[test]
fn explicit_file_is_loaded() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        r#"
[paths]
papers_dir = "site/papers"
catalog = "site/catalog.json"

[share]
title = "Tom City"
command = ["share-clip", "--quiet"]
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.paths.papers_dir, std::path::Path::new("site/papers"));
    assert_eq!(
        config.paths.catalog.as_deref(),
        Some(std::path::Path::new("site/catalog.json"))
    );
    assert_eq!(config.share.title, "Tom City");
    assert_eq!(
        config.share.command,
        Some(vec!["share-clip".to_string(), "--quiet".to_string()])
    );
}

#[test]
fn missing_explicit_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(Some(&temp.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[paths\npapers_dir = 1").unwrap();
    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
