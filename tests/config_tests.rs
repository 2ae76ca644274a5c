use luna::config::{ConfigError, PROJECT_CONFIG_FILENAME, Settings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_is_none() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let loaded = Settings::load_from(&temp_dir.path().join(PROJECT_CONFIG_FILENAME))
        .expect("Missing file is not an error");
    assert!(loaded.is_none());
}

#[test]
fn test_save_then_load_keeps_values() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);

    let settings = Settings {
        ignored_files: vec!["Cargo.lock".to_string(), "vendor/".to_string()],
        commit_prefixes: vec!["feat:".to_string()],
        max_commit_length: 50,
        default_emoji: true,
        api_key: "project-key".to_string(),
        ..Settings::default()
    };
    settings.save_to(&path).expect("Failed to save settings");

    let loaded = Settings::load_from(&path)
        .expect("Failed to load settings")
        .expect("File should exist");
    assert_eq!(loaded, settings);
}

#[test]
fn test_file_uses_camel_case_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
    Settings::default()
        .save_to(&path)
        .expect("Failed to save settings");

    let raw = fs::read_to_string(&path).expect("Failed to read file");
    for key in [
        "ignoredFiles",
        "ignoredPatterns",
        "commitPrefixes",
        "maxCommitLength",
        "defaultEmoji",
        "apiKey",
    ] {
        assert!(raw.contains(key), "missing key {key}");
    }
}

#[test]
fn test_partial_project_file_does_not_restore_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
    fs::write(&path, r#"{"commitPrefixes": ["chore:"], "maxCommitLength": 50}"#)
        .expect("Failed to write file");

    let project = Settings::load_from(&path)
        .expect("Failed to load settings")
        .expect("File should exist");
    let settings = Settings::layer(Some(project), None, None);

    assert!(settings.ignored_patterns.is_empty());
    assert!(settings.ignored_files.is_empty());
    assert_eq!(settings.commit_prefixes, vec!["chore:".to_string()]);
    assert_eq!(settings.max_commit_length, 50);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_missing_limit_fails_validation() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
    fs::write(&path, r#"{"ignoredPatterns": ["*.lock"]}"#).expect("Failed to write file");

    let project = Settings::load_from(&path)
        .expect("Failed to load settings")
        .expect("File should exist");
    assert!(project.commit_prefixes.is_empty());
    assert!(matches!(
        project.validate(),
        Err(ConfigError::CommitLengthTooSmall(0))
    ));
}

#[test]
fn test_no_project_file_uses_defaults() {
    let settings = Settings::layer(None, None, None);
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
    fs::write(&path, "{ not json").expect("Failed to write file");

    let err = Settings::load_from(&path).expect_err("Malformed file should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(PROJECT_CONFIG_FILENAME));
}

#[test]
fn test_tiny_limit_is_rejected() {
    let settings = Settings {
        max_commit_length: 3,
        ..Settings::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::CommitLengthTooSmall(3))
    ));
}
