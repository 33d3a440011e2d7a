//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use formscan_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use formscan_core::models::Language;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var("FORMSCAN_LANGUAGE");
    env::remove_var("FORMSCAN_MIN_OVERLAP");
    env::remove_var("FORMSCAN_MIN_SELECTION_PX");
    env::remove_var("FORMSCAN_SERVER_URL");
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_partial_file_configuration() {
    let file = config_file(
        r#"
default_language = "spa"
# Only override the language, leave others as defaults
"#,
    );

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.default_language.value, Language::Spa);
    assert_eq!(config.default_language.source, ConfigSource::File);
    assert_eq!(config.min_overlap_ratio.value, 0.1);
    assert_eq!(config.min_overlap_ratio.source, ConfigSource::Default);
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/formscan.toml");
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("FORMSCAN_LANGUAGE", "fra");
    env::set_var("FORMSCAN_MIN_OVERLAP", "0.3");
    env::set_var("FORMSCAN_SERVER_URL", "http://env:8000");

    let file = config_file(
        r#"
default_language = "eng"
min_overlap_ratio = 0.2
server_url = "http://file:8000"
"#,
    );

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.default_language.value, Language::Fra);
    assert_eq!(config.default_language.source, ConfigSource::Environment);
    assert_eq!(config.min_overlap_ratio.value, 0.3);
    assert_eq!(config.server_url.value, "http://env:8000");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("FORMSCAN_LANGUAGE", "klingon");
    env::set_var("FORMSCAN_MIN_OVERLAP", "2.5");
    env::set_var("FORMSCAN_MIN_SELECTION_PX", "-3");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.default_language.value, Language::Por);
    assert_eq!(config.default_language.source, ConfigSource::Default);
    assert_eq!(config.min_overlap_ratio.value, 0.1);
    assert_eq!(config.min_selection_pixels.value, 5.0);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_everything() {
    clear_env();
    env::set_var("FORMSCAN_MIN_OVERLAP", "0.3");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(CliConfigOverrides {
        min_overlap_ratio: Some(0.6),
        ..Default::default()
    });

    assert_eq!(config.min_overlap_ratio.value, 0.6);
    assert_eq!(config.min_overlap_ratio.source, ConfigSource::Cli);

    clear_env();
}
