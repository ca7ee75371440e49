//! Configuration system tests
//!
//! Tests for config paths, preview config persistence and theme selection.

mod common;

use common::{test_runtime, IDLE_TIMEOUT};
use markview::config::PreviewConfig;
use markview::config_paths;
use markview::markdown::{PreviewTheme, DARK_THEME_ID, LIGHT_THEME_ID};
use markview::messages::{AppMsg, Msg};
use markview::model::AppModel;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("markview"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    let config = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&config));
}

// ========================================================================
// PreviewConfig Tests
// ========================================================================

#[test]
fn test_config_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = PreviewConfig {
        theme: LIGHT_THEME_ID.to_string(),
        export_file_name: "notes.html".to_string(),
        highlight_code: false,
    };

    config.save_to(&path).unwrap();
    assert_eq!(PreviewConfig::load_from(&path), config);
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PreviewConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config, PreviewConfig::default());
}

#[test]
fn test_invalid_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "theme: [not, a, string").unwrap();
    assert_eq!(PreviewConfig::load_from(&path), PreviewConfig::default());
}

#[test]
fn test_model_theme_follows_config() {
    let model = AppModel::new(PreviewConfig {
        theme: LIGHT_THEME_ID.to_string(),
        ..PreviewConfig::default()
    });
    assert_eq!(model.theme, PreviewTheme::light());
    assert_eq!(AppModel::default().theme.id, DARK_THEME_ID);
}

#[test]
fn test_theme_change_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, _) = test_runtime(dir.path());

    runtime.dispatch(Msg::App(AppMsg::SetTheme(LIGHT_THEME_ID.to_string())));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    let saved = PreviewConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(saved.theme, LIGHT_THEME_ID);
    assert!(runtime.model().notifications.is_empty());
}

#[test]
fn test_disabling_highlighting_reconverts_without_spans() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, _) = test_runtime(dir.path());
    runtime.set_text("```rust\nlet x = 1;\n```");
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));
    assert!(runtime.model().published_html().contains("hl-"));

    runtime.dispatch(Msg::App(AppMsg::SetHighlightCode(false)));
    assert!(runtime.run_until_idle(IDLE_TIMEOUT));

    assert!(!runtime.model().published_html().contains("hl-"));
    let saved = PreviewConfig::load_from(&dir.path().join("config.yaml"));
    assert!(!saved.highlight_code);
}
