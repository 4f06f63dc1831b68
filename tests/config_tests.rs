use std::fs;

use tempfile::TempDir;
use tsql2snow::config::{Config, OutputConfig, RulesConfig};

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.rules.disabled.is_empty());
    assert!(config.output.format.is_none());
    assert!(config.output.color);
    assert!(!config.output.validate);
}

#[test]
fn test_default_rules_config() {
    let config = RulesConfig::default();
    assert!(config.disabled.is_empty());
}

#[test]
fn test_default_output_config() {
    let config = OutputConfig::default();
    assert!(config.color);
    assert!(config.format.is_none());
}

#[test]
fn test_full_config_from_toml() {
    let config = Config::from_toml(
        r#"
[rules]
disabled = ["FMT001", "HINT002"]

[output]
format = "diff"
color = false
validate = true
"#
    )
    .unwrap();

    assert_eq!(config.rules.disabled, vec!["FMT001", "HINT002"]);
    assert_eq!(config.output.format.as_deref(), Some("diff"));
    assert!(!config.output.color);
    assert!(config.output.validate);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = Config::from_toml("[output]\nvalidate = true\n").unwrap();

    assert!(config.rules.disabled.is_empty());
    assert!(config.output.color);
    assert!(config.output.validate);
}

#[test]
fn test_empty_config() {
    let config = Config::from_toml("").unwrap();
    assert!(config.rules.disabled.is_empty());
}

#[test]
fn test_invalid_toml() {
    let err = Config::from_toml("[rules\ndisabled = 3").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_wrong_field_type() {
    assert!(Config::from_toml("[rules]\ndisabled = \"FMT001\"").is_err());
}

#[test]
fn test_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".tsql2snow.toml");
    fs::write(&path, "[rules]\ndisabled = [\"ROW001\"]\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.rules.disabled, vec!["ROW001"]);
}

#[test]
fn test_from_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_env_overrides() {
    let mut config = Config::default();
    config.apply_env(Some("NULL001,DATE001"), Some("true")).unwrap();

    assert_eq!(config.rules.disabled, vec!["NULL001", "DATE001"]);
    assert!(config.output.validate);
}

#[test]
fn test_env_validate_false_overrides_file() {
    let mut config = Config::from_toml("[output]\nvalidate = true\n").unwrap();
    config.apply_env(None, Some("0")).unwrap();
    assert!(!config.output.validate);
}
