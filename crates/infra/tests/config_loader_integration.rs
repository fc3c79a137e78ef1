//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! wiring the result into service clients.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use forge_domain::ForgeError;
use forge_infra::{config, OssClient, StaticTokenProvider};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "client_id": "json-id",
            "client_secret": "json-secret",
            "host": "http://127.0.0.1:9100",
            "timeout_seconds": 12,
            "user_agent": "forge-json"
        }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file");

    let config = result.unwrap();
    assert_eq!(config.credentials().unwrap(), ("json-id".into(), "json-secret".into()));
    assert_eq!(config.timeout_seconds, 12);
    assert_eq!(config.user_agent.as_deref(), Some("forge-json"));
    assert_eq!(config.oss_url(), "http://127.0.0.1:9100/oss/v2");

    // Cleanup
    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
client_id = "toml-id"
client_secret = "toml-secret"
host = "https://forge.example.test/"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("toml config should load");
    assert_eq!(config.client_id.as_deref(), Some("toml-id"));
    assert_eq!(config.timeout_seconds, 30, "missing fields fall back to defaults");
    assert_eq!(
        config.model_derivative_url(),
        "https://forge.example.test/modelderivative/v2"
    );

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_invalid_json_is_config_error() {
    let path = write_config(r#"{ "client_id": "#, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(ForgeError::Config(_))), "Should fail with invalid JSON");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_wrong_field_type() {
    let path = write_config(r#"{ "timeout_seconds": "thirty" }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err(), "Should fail when a field has the wrong type");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_loaded_config_drives_service_urls() {
    let path = write_config(r#"{ "host": "http://127.0.0.1:9200" }"#, "json");
    let config = config::load_from_file(Some(path.clone())).expect("config should load");

    let oss = OssClient::from_config(&config, Arc::new(StaticTokenProvider::new("t")))
        .expect("client should build");
    assert_eq!(oss.api().base_url(), "http://127.0.0.1:9200/oss/v2");

    std::fs::remove_file(path).ok();
}
