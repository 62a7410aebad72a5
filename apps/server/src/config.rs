//! Configuration management for the record server

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS. Empty means no CORS headers are sent.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes. Default: 1 MB
    #[serde(default = "default_max_request_body_size")]
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `clients.json`, `airlines.json` and `flights.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Write every mutation through to disk. When false, files are written
    /// on shutdown.
    #[serde(default = "default_true")]
    pub autosave: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Path segment of the API prefix, `/api/{version}`
    #[serde(default = "default_api_version")]
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON formatting for logs
    #[serde(default)]
    pub json: bool,

    /// Enable file logging in addition to console
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for log files (default: ./logs)
    #[serde(default = "default_log_directory")]
    pub file_directory: String,

    /// Log file prefix (default: airdesk)
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,

    /// Log rotation: daily, hourly, minutely, never (default: daily)
    #[serde(default = "default_log_rotation")]
    pub file_rotation: String,
}

pub const LOG_ROTATIONS: &[&str] = &["daily", "hourly", "minutely", "never"];

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_request_body_size() -> usize {
    1024 * 1024
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_true() -> bool {
    true
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "./logs".to_string()
}

fn default_log_file_prefix() -> String {
    "airdesk".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                cors_origins: Vec::new(),
                max_request_body_size: default_max_request_body_size(),
            },
            storage: StorageConfig {
                data_dir: default_data_dir(),
                autosave: default_true(),
            },
            api: ApiConfig {
                version: default_api_version(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                json: false,
                file_enabled: false,
                file_directory: default_log_directory(),
                file_prefix: default_log_file_prefix(),
                file_rotation: default_log_rotation(),
            },
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional config file and the environment.
    ///
    /// Without `config_file`, a `config.{toml,yaml,json}` in the working
    /// directory is used when present.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let file_source = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default(
                "server.max_request_body_size",
                default_max_request_body_size() as i64,
            )?
            .set_default(
                "storage.data_dir",
                default_data_dir().to_string_lossy().into_owned(),
            )?
            .set_default("storage.autosave", default_true())?
            .set_default("api.version", default_api_version())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .set_default("logging.file_enabled", false)?
            .set_default("logging.file_directory", default_log_directory())?
            .set_default("logging.file_prefix", default_log_file_prefix())?
            .set_default("logging.file_rotation", default_log_rotation())?
            .add_source(file_source)
            // Double underscore maps to nested keys:
            // AIRDESK__STORAGE__DATA_DIR -> storage.data_dir
            // Lists are comma separated: AIRDESK__SERVER__CORS_ORIGINS=https://a.com,https://b.com
            .add_source(
                config::Environment::with_prefix("AIRDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.apply_plain_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Plain `DATA_DIR` and `AUTOSAVE` apply when the prefixed forms are absent.
    fn apply_plain_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if var("AIRDESK__STORAGE__DATA_DIR").is_none() {
            if let Some(dir) = var("DATA_DIR") {
                self.storage.data_dir = PathBuf::from(dir);
            }
        }
        if var("AIRDESK__STORAGE__AUTOSAVE").is_none() {
            if let Some(autosave) = var("AUTOSAVE") {
                self.storage.autosave = autosave.trim().eq_ignore_ascii_case("true");
            }
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        Ok(addr.parse()?)
    }

    /// Mount point of the record routes, e.g. `/api/v1`.
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.api.version.trim_matches('/'))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        if self.server.max_request_body_size == 0 {
            return Err("server.max_request_body_size must be > 0".to_string());
        }
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err("storage.data_dir must not be empty".to_string());
        }
        if self.api.version.trim_matches('/').trim().is_empty() {
            return Err("api.version must not be empty".to_string());
        }
        if !LOG_ROTATIONS.contains(&self.logging.file_rotation.as_str()) {
            return Err(format!(
                "logging.file_rotation must be one of {LOG_ROTATIONS:?}, got '{}'",
                self.logging.file_rotation
            ));
        }
        Ok(())
    }
}
