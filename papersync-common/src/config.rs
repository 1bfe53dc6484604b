//! Configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing TOML file is not an error: defaults are used and the caller
//! is told no file was found so it can log a warning once tracing is up.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "PAPERSYNC_CONFIG";

/// Notion integration token
pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";

pub const HOST_ENV: &str = "PAPERSYNC_HOST";
pub const PORT_ENV: &str = "PAPERSYNC_PORT";
pub const LOG_LEVEL_ENV: &str = "PAPERSYNC_LOG_LEVEL";
pub const NOTION_API_URL_ENV: &str = "PAPERSYNC_NOTION_API_URL";
pub const ARXIV_API_URL_ENV: &str = "PAPERSYNC_ARXIV_API_URL";

/// Full service configuration as read from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub notion: NotionConfig,

    #[serde(default)]
    pub arxiv: ArxivConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// Default: 8000
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Notion API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotionConfig {
    /// Integration token (normally supplied via NOTION_TOKEN instead)
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_notion_api_base_url")]
    pub api_base_url: String,

    /// Value sent in the `Notion-Version` header
    #[serde(default = "default_notion_api_version")]
    pub api_version: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// arXiv export API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArxivConfig {
    #[serde(default = "default_arxiv_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level or EnvFilter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stdout if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: default_notion_api_base_url(),
            api_version: default_notion_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_arxiv_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_notion_api_base_url() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_notion_api_version() -> String {
    "2022-06-28".to_string()
}

fn default_arxiv_api_base_url() -> String {
    "https://export.arxiv.org/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load configuration from the resolved TOML file (if any), then apply
    /// environment overrides.
    ///
    /// Returns the config and the path it was read from, `None` when no
    /// file was found and compiled defaults were used.
    pub fn load(cli_path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = resolve_config_path(cli_path)?;

        let mut config = match &path {
            Some(path) => load_toml_config(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;

        Ok((config, path))
    }

    /// Apply environment variable overrides on top of file values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(token) = env_value(NOTION_TOKEN_ENV) {
            self.notion.token = Some(token);
        }
        if let Some(host) = env_value(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = env_value(PORT_ENV) {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid {}: {}", PORT_ENV, e)))?;
        }
        if let Some(level) = env_value(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
        if let Some(url) = env_value(NOTION_API_URL_ENV) {
            self.notion.api_base_url = url;
        }
        if let Some(url) = env_value(ARXIV_API_URL_ENV) {
            self.arxiv.api_base_url = url;
        }
        Ok(())
    }

    /// Notion token, required at startup
    pub fn notion_token(&self) -> Result<String> {
        match &self.notion.token {
            Some(token) if is_valid_token(token) => Ok(token.trim().to_string()),
            _ => Err(Error::Config(format!(
                "Notion token not configured. Set {} or `token` under [notion] in the config file",
                NOTION_TOKEN_ENV
            ))),
        }
    }
}

/// Validate token (non-empty, non-whitespace)
pub fn is_valid_token(token: &str) -> bool {
    !token.trim().is_empty()
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Config file resolution:
/// 1. Explicit path from the command line (must exist)
/// 2. PAPERSYNC_CONFIG (must exist)
/// 3. Platform config dir, e.g. ~/.config/papersync/config.toml (optional)
pub fn resolve_config_path(cli_path: Option<&Path>) -> Result<Option<PathBuf>> {
    let explicit = cli_path
        .map(Path::to_path_buf)
        .or_else(|| env_value(CONFIG_PATH_ENV).map(PathBuf::from));

    if let Some(path) = explicit {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    Ok(default_config_path().filter(|p| p.exists()))
}

/// Platform default config location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("papersync").join("config.toml"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
