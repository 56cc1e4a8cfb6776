//! Server configuration, loaded from a TOML file with CLI overrides on top.
//!
//! Every field has a default, so the server runs with no config file at all:
//! SQLite history in `rulesmith.db`, listening on `127.0.0.1:8787`. The model
//! endpoint has no usable default and must be configured before generation
//! requests can succeed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rulesmith::generate::client::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use rulesmith::generate::ModelConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub model: ModelSection,

    #[serde(default)]
    pub log: LogConfig,
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Connection settings for the model client.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            base_url: self.model.base_url.clone(),
            model: self.model.model.clone(),
            api_token: self.model.api_token.clone(),
            max_tokens: self.model.max_tokens,
            temperature: self.model.temperature,
            timeout: Duration::from_secs(self.model.timeout_secs),
        }
    }
}

// ── HTTP listener ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// IP address to bind to. Defaults to `127.0.0.1` (localhost only).
    /// Set to `0.0.0.0` to listen on all interfaces.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_http_port(),
        }
    }
}

// ── History store ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    #[serde(default = "default_backend")]
    pub backend: HistoryBackendKind,

    /// SQLite database path. Ignored for the memory backend.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Name of the history collection inside the database.
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_db_path(),
            collection: default_collection(),
        }
    }
}

/// Which persistence backend the history runs on.
///
/// `memory` keeps records only for the lifetime of the process. It exists
/// for development and tests; production wants `sqlite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryBackendKind {
    Memory,
    Sqlite,
}

impl HistoryBackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }
}

impl std::fmt::Display for HistoryBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(format!("invalid backend '{s}': expected memory|sqlite")),
        }
    }
}

// ── Model endpoint ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    /// Run endpoint base, e.g.
    /// `https://api.cloudflare.com/client/v4/accounts/<id>/ai/run`.
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token. Prefer the `RULESMITH_API_TOKEN` environment variable
    /// over writing this into the file.
    #[serde(default)]
    pub api_token: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            model: default_model(),
            api_token: String::new(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Logging ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "invalid log level '{s}': expected error|warn|info|debug|trace"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "pretty" => Ok(Self::Text),
            _ => Err(format!("invalid log format '{s}': expected json|text")),
        }
    }
}

// ── Defaults ───────────────────────────────────────────────────────

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}
fn default_http_port() -> u16 {
    8787
}
fn default_backend() -> HistoryBackendKind {
    HistoryBackendKind::Sqlite
}
fn default_db_path() -> PathBuf {
    PathBuf::from("rulesmith.db")
}
fn default_collection() -> String {
    "history".to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> LogLevel {
    LogLevel::Info
}
fn default_log_format() -> LogFormat {
    LogFormat::Json
}
