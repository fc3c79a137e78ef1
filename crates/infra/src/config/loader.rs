//! Configuration loader
//!
//! Loads [`ForgeConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the app credentials are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FORGE_CLIENT_ID`: App client ID (required)
//! - `FORGE_CLIENT_SECRET`: App client secret (required)
//! - `FORGE_HOST`: Scheme and host of every service
//! - `FORGE_TIMEOUT_SECS`: Request timeout in seconds
//! - `FORGE_USER_AGENT`: `User-Agent` header value
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./forge.json` or `./forge.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use forge_domain::{ForgeConfig, ForgeError, Result};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: [&str; 4] = ["forge.json", "forge.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ForgeError::Config` if neither the environment nor any config
/// file yields a configuration.
pub fn load() -> Result<ForgeConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `ForgeError::Config` if a required variable is missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<ForgeConfig> {
    let client_id = env_var("FORGE_CLIENT_ID")?;
    let client_secret = env_var("FORGE_CLIENT_SECRET")?;

    let mut config = ForgeConfig {
        client_id: Some(client_id),
        client_secret: Some(client_secret),
        ..ForgeConfig::default()
    };

    if let Some(host) = optional_env_var("FORGE_HOST") {
        config.host = host;
    }
    if let Some(timeout) = optional_env_var("FORGE_TIMEOUT_SECS") {
        config.timeout_seconds = timeout
            .parse::<u64>()
            .map_err(|e| ForgeError::Config(format!("Invalid timeout: {}", e)))?;
    }
    config.user_agent = optional_env_var("FORGE_USER_AGENT");

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `ForgeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ForgeConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ForgeError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ForgeError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ForgeError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration by file extension (`.json` or `.toml`)
fn parse_config(contents: &str, path: &Path) -> Result<ForgeConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| ForgeError::from(InfraError::from(e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ForgeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ForgeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file in the standard locations
#[must_use]
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    optional_env_var(key).ok_or_else(|| {
        ForgeError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Variable value, treating unset and blank alike
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 5] = [
        "FORGE_CLIENT_ID",
        "FORGE_CLIENT_SECRET",
        "FORGE_HOST",
        "FORGE_TIMEOUT_SECS",
        "FORGE_USER_AGENT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("FORGE_CLIENT_ID", "id");
        std::env::set_var("FORGE_CLIENT_SECRET", "secret");
        std::env::set_var("FORGE_HOST", "http://127.0.0.1:9000");
        std::env::set_var("FORGE_TIMEOUT_SECS", "5");
        std::env::set_var("FORGE_USER_AGENT", "forge-tests");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.credentials().unwrap(), ("id".to_string(), "secret".to_string()));
        assert_eq!(config.host, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.user_agent.as_deref(), Some("forge-tests"));

        clear_env();
    }

    #[test]
    fn test_load_from_env_uses_defaults_for_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("FORGE_CLIENT_ID", "id");
        std::env::set_var("FORGE_CLIENT_SECRET", "secret");

        let config = load_from_env().unwrap();
        assert_eq!(config.host, "https://developer.api.autodesk.com");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.user_agent, None);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_secret() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("FORGE_CLIENT_ID", "id");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, ForgeError::Config(_)), "Should be a Config error");
        assert!(err.to_string().contains("FORGE_CLIENT_SECRET"));

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("FORGE_CLIENT_ID", "id");
        std::env::set_var("FORGE_CLIENT_SECRET", "secret");
        std::env::set_var("FORGE_TIMEOUT_SECS", "soon");

        let result = load_from_env();
        assert!(matches!(result, Err(ForgeError::Config(_))), "Should fail with invalid timeout");

        clear_env();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/forge.json")));
        assert!(matches!(result, Err(ForgeError::Config(_))), "Should fail when file not found");
    }

    #[test]
    fn test_parse_config_json() {
        let json_content = r#"{
            "client_id": "id",
            "client_secret": "secret",
            "timeout_seconds": 10
        }"#;

        let config = parse_config(json_content, &PathBuf::from("forge.json")).unwrap();
        assert_eq!(config.client_id.as_deref(), Some("id"));
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.host, "https://developer.api.autodesk.com");
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_content = r#"
client_id = "id"
client_secret = "secret"
host = "https://example.test"
"#;

        let config = parse_config(toml_content, &PathBuf::from("forge.toml")).unwrap();
        assert_eq!(config.host, "https://example.test");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_parse_config_invalid_toml_is_config_error() {
        let result = parse_config("client_id = ", &PathBuf::from("forge.toml"));
        assert!(matches!(result, Err(ForgeError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("forge.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
