use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::ensemble::EnsembleConfig;
use crate::strategy::default_pool;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,
    #[serde(default)]
    pub ensemble: EnsembleConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_display_history_len")]
    pub display_history_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_error_log_path")]
    pub error_log_path: String,
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_display_history_len() -> usize {
    200
}

fn default_level() -> String {
    "info".to_string()
}

fn default_error_log_path() -> String {
    "server-error.log".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            display_history_len: default_display_history_len(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            error_log_path: default_error_log_path(),
        }
    }
}

impl FeedConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid server address {}:{}", self.host, self.port))
    }
}

impl Config {
    /// Read `HILO_CONFIG` (or `config/default.toml`), apply env overrides
    /// and validate.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("HILO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;

        if let Ok(url) = std::env::var("HILO_FEED_URL") {
            if !url.trim().is_empty() {
                config.feed.url = url.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.feed.url)
            .with_context(|| format!("feed.url '{}' is not a valid URL", self.feed.url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            bail!("feed.url must use http or https, got '{}'", url.scheme());
        }
        if self.feed.poll_interval_ms == 0 {
            bail!("feed.poll_interval_ms must be > 0");
        }

        let e = &self.ensemble;
        if !(e.ema_alpha > 0.0 && e.ema_alpha < 1.0) {
            bail!("ensemble.ema_alpha must be in (0, 1), got {}", e.ema_alpha);
        }
        if e.min_weight <= 0.0 {
            bail!("ensemble.min_weight must be > 0, got {}", e.min_weight);
        }
        let pool_size = default_pool().len();
        if e.min_weight * pool_size as f64 >= 1.0 {
            bail!(
                "ensemble.min_weight {} is too large for {} strategies",
                e.min_weight,
                pool_size
            );
        }
        if e.history_window == 0 {
            bail!("ensemble.history_window must be >= 1");
        }

        if self.server.display_history_len == 0 {
            bail!("server.display_history_len must be >= 1");
        }
        self.server
            .socket_addr()
            .context("server.host/server.port are invalid")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[feed]
url = "https://example.com/api/results"
"#,
        )
        .unwrap();
        assert_eq!(config.feed.poll_interval_ms, 5_000);
        assert_eq!(config.ensemble, EnsembleConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.display_history_len, 200);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_feed() {
        let config: Config = toml::from_str(
            r#"
[feed]
url = "ftp://example.com/results"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
