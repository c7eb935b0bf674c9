/*!
 * Tests for application configuration
 */

use anyhow::Result;
use doctran::app_config::{Config, LogLevel};

use crate::common;

/// Test that the default configuration passes validation
#[test]
fn test_default_config_shouldBeValid() {
    assert!(Config::default().validate().is_ok());
}

/// Test that a minimal JSON document fills every field with defaults
#[test]
fn test_parse_withMinimalJson_shouldApplyDefaults() {
    let config: Config = serde_json::from_str(r#"{"backend": {}}"#).unwrap();
    assert_eq!(config.backend.endpoint, "http://localhost:5000");
    assert_eq!(config.backend.max_chars_per_request, 5000);
    assert_eq!(config.backend.max_retries, 3);
    assert_eq!(config.source_language, "auto");
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
    assert!(config.validate().is_ok());
}

/// Test that an unparseable endpoint fails validation
#[test]
fn test_validate_withBadEndpoint_shouldReject() {
    let mut config = Config::default();
    config.backend.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

/// Test that a zero chunk budget fails validation
#[test]
fn test_validate_withZeroChunkBudget_shouldReject() {
    let mut config = Config::default();
    config.backend.max_chars_per_request = 0;
    assert!(config.validate().is_err());
}

/// Test that "auto" is rejected as a target language
#[test]
fn test_validate_withAutoTarget_shouldReject() {
    let mut config = Config::default();
    config.target_language = "auto".to_string();
    assert!(config.validate().is_err());
}

/// Test that margins wider than the page fail validation
#[test]
fn test_validate_withOversizedMargins_shouldReject() {
    let mut config = Config::default();
    config.pdf.margin = 400.0;
    assert!(config.validate().is_err());
}

/// Test round trip through a config file on disk
#[test]
fn test_from_file_withSavedConfig_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let mut config = Config::default();
    config.target_language = "pt".to_string();
    config.backend.api_key = "secret".to_string();

    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        &serde_json::to_string_pretty(&config)?,
    )?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.target_language, "pt");
    assert_eq!(loaded.backend.api_key, "secret");
    assert!(loaded.validate().is_ok());

    Ok(())
}

/// Test that a missing config file is a readable error
#[test]
fn test_from_file_withMissingFile_shouldFail() {
    assert!(Config::from_file("definitely_missing_conf.json").is_err());
}
