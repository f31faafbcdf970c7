//! Application configuration management.

use serde::Deserialize;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Document partitioner selection.
    #[serde(default)]
    pub partitioner: PartitionerConfig,
    /// JWT configuration. Authentication is disabled when absent.
    #[serde(default)]
    pub jwt: Option<JwtSettings>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

/// Upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted document size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

/// Which partitioner backs document parsing.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PartitionerKind {
    /// In-process parsing of CSV, TSV and HTML documents only.
    #[default]
    Local,
    /// Unstructured partition API, with local parsing for CSV, TSV and HTML.
    Unstructured,
}

/// Document partitioner configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PartitionerConfig {
    /// Partitioner backend.
    #[serde(rename = "type", default)]
    pub kind: PartitionerKind,
    /// Base URL of the partition API (required for `unstructured`).
    #[serde(default)]
    pub url: Option<String>,
    /// Optional API key sent as `unstructured-api-key`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Partitioning strategy (`hi_res`, `fast`, `auto`, `ocr_only`).
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PartitionerConfig {
    fn default() -> Self {
        Self {
            kind: PartitionerKind::Local,
            url: None,
            api_key: None,
            strategy: default_strategy(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_strategy() -> String {
    "hi_res".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// JWT settings as read from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key shared with the token issuer.
    pub secret: String,
    /// Access token expiration in seconds, used when minting tokens.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SENTINEL").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Returns `true` when requests must carry a valid token.
    #[must_use]
    pub const fn auth_enabled(&self) -> bool {
        self.jwt.is_some()
    }
}
