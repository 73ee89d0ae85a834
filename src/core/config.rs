use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

/// Which hero collection the store talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process mock collection, seeded at startup
    Memory,
    /// A remote service exposing `/api/heroes`
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_kind")]
    pub kind: BackendKind,
    /// Required when `kind = "http"`
    pub base_url: Option<String>,
    /// Simulated latency of the in-memory backend
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted session slot; kept in memory when unset
    pub storage_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            base_url: None,
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_backend_kind() -> BackendKind {
    BackendKind::Memory
}

fn default_delay_ms() -> u64 {
    500 // matches the usual in-memory web API delay
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.backend.kind == BackendKind::Http {
            match self.backend.base_url.as_deref() {
                None | Some("") => bail!("backend.base_url is required when backend.kind = \"http\""),
                Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                    bail!("backend.base_url must start with http:// or https://, got '{}'", url)
                }
                Some(_) => {}
            }
        }

        if self.backend.timeout_secs == 0 {
            bail!("backend.timeout_secs must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml("[server]\nport = 4200\n").unwrap();

        assert_eq!(config.server.port, 4200);
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert!(config.server.num_threads > 0);
        assert_eq!(config.backend.kind, BackendKind::Memory);
        assert_eq!(config.backend.delay_ms, 500);
        assert!(config.session.storage_path.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [server]
            bind_address = "0.0.0.0"
            port = 8080
            num_threads = 2

            [backend]
            kind = "http"
            base_url = "http://heroes.internal:9000"
            timeout_secs = 5

            [session]
            storage_path = "/tmp/heroes-storage.json"

            [logging]
            level = "debug"
            format = "console"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.num_threads, 2);
        assert_eq!(config.backend.kind, BackendKind::Http);
        assert_eq!(config.backend.base_url.as_deref(), Some("http://heroes.internal:9000"));
        assert_eq!(
            config.session.storage_path,
            Some(PathBuf::from("/tmp/heroes-storage.json"))
        );
        assert_eq!(config.logging.format, "console");
    }

    #[test]
    fn test_http_backend_requires_base_url() {
        let err = Config::from_toml("[server]\nport = 1\n[backend]\nkind = \"http\"\n").unwrap_err();
        assert!(err.to_string().contains("base_url"));

        let err = Config::from_toml(
            "[server]\nport = 1\n[backend]\nkind = \"http\"\nbase_url = \"heroes:9000\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Config::from_toml("[server]\nport = 0\n").is_err());
        assert!(Config::from_toml("[server]\nport = 1\nnum_threads = 0\n").is_err());
        assert!(Config::from_toml("[server]\nport = 1\n[logging]\nlevel = \"loud\"\n").is_err());
        assert!(Config::from_toml("[server]\nport = 1\n[logging]\nformat = \"xml\"\n").is_err());
        assert!(Config::from_toml("[server]\nport = 1\n[backend]\nkind = \"carrier-pigeon\"\n").is_err());
    }

    #[test]
    fn test_example_config_is_valid() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
        let config = Config::from_file(&path).expect("Failed to load config");
        assert_eq!(config.backend.kind, BackendKind::Memory);
    }
}
