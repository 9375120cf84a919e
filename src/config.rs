use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Network-related constants
// =============================================================================

/// Default registry when none is configured
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Timeout for each individual registry request in milliseconds (10 seconds)
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// User agent sent with every registry request
pub const USER_AGENT: &str = "npm-gateway";

const APP_DIR: &str = "npm-gateway";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration section '{0}' is missing")]
    MissingSection(&'static str),

    #[error("Invalid registry URL '{url}': {reason}")]
    InvalidRegistryUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Top-level configuration document
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    pub npm_gateway: GatewayConfig,
}

/// Registry connection settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base location of the registry. The scheme is always upgraded to https.
    pub registry_url: String,
    /// Opaque credential sent as `Authorization: Bearer <authorization>`
    pub authorization: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            authorization: String::new(),
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Loads the configuration document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses the configuration document, requiring the `npm_gateway` section.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if value.get("npm_gateway").is_none() {
            return Err(ConfigError::MissingSection("npm_gateway"));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Returns the path to the configuration directory for npm-gateway.
/// Uses $XDG_CONFIG_HOME/npm-gateway if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/npm-gateway,
/// or ./npm-gateway if neither is available.
pub fn config_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the default configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path to the data directory for npm-gateway.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("npm-gateway.log")
}

fn dir_with_env(xdg_home: Option<String>, home_dir: Option<PathBuf>, fallback: &str) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn app_config_from_partial_section_uses_defaults_for_missing_fields() {
        let result = AppConfig::from_json(
            &json!({
                "npm_gateway": {
                    "authorization": "secret"
                }
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(
            result.npm_gateway,
            GatewayConfig {
                registry_url: DEFAULT_REGISTRY_URL.to_string(),
                authorization: "secret".to_string(),
                timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            }
        );
    }

    #[test]
    fn app_config_from_full_section_parses_all_fields() {
        let result = AppConfig::from_json(
            &json!({
                "npm_gateway": {
                    "registry_url": "http://npm.internal/api/npm",
                    "authorization": "token",
                    "timeout_ms": 2500
                }
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(result.npm_gateway.registry_url, "http://npm.internal/api/npm");
        assert_eq!(result.npm_gateway.authorization, "token");
        assert_eq!(result.npm_gateway.timeout_ms, 2500);
    }

    #[test]
    fn app_config_without_section_is_rejected() {
        let result = AppConfig::from_json(r#"{"other": {}}"#);
        assert!(matches!(
            result,
            Err(ConfigError::MissingSection("npm_gateway"))
        ));
    }

    #[test]
    fn app_config_with_invalid_json_is_rejected() {
        let result = AppConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn app_config_load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"npm_gateway": {{"registry_url": "https://example.com", "authorization": "a"}}}}"#
        )
        .unwrap();

        let result = AppConfig::load(file.path()).unwrap();
        assert_eq!(result.npm_gateway.registry_url, "https://example.com");
    }

    #[test]
    fn app_config_load_reports_missing_file() {
        let result = AppConfig::load(Path::new("/nonexistent/npm-gateway/config.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn dir_with_env_uses_xdg_home_when_set() {
        let path = dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
            ".local/share",
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/npm-gateway"));
    }

    #[test]
    fn dir_with_env_falls_back_to_home_subdirectory() {
        let path = dir_with_env(None, Some(PathBuf::from("/home/user")), ".config");

        assert_eq!(path, PathBuf::from("/home/user/.config/npm-gateway"));
    }

    #[test]
    fn dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = dir_with_env(None, None, ".local/share");
        assert_eq!(path, PathBuf::from("./npm-gateway"));
    }
}
