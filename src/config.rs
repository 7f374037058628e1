//! Configuration module
//!
//! Layered configuration: built-in defaults, then an optional `config.toml`,
//! then `SDWEB_`-prefixed environment variables.

use serde::Deserialize;
use std::net::SocketAddr;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Static asset configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    /// Root directory of the servable tree; static serving is disabled when
    /// unset
    #[serde(default)]
    pub root: Option<String>,
    /// Rooted path served for `/`
    pub index: String,
}

/// File cache tuning
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Soft ceiling on total recorded cached bytes
    pub max_bytes: u64,
    /// Fixed read size for file streaming and cache storage
    pub chunk_size: usize,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

impl Config {
    /// Load configuration from the default `config.toml` location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SDWEB"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("static_files.index", "/index.html")?
            .set_default("cache.max_bytes", 100_000)?
            .set_default("cache.chunk_size", 8912)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_file_present() {
        let cfg = Config::load_from("does-not-exist").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.static_files.index, "/index.html");
        assert!(cfg.static_files.root.is_none());
        assert_eq!(cfg.cache.max_bytes, 100_000);
        assert_eq!(cfg.cache.chunk_size, 8912);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_socket_addr_parses() {
        let cfg = Config::load_from("does-not-exist").unwrap();
        assert!(cfg.socket_addr().is_ok());
    }

    #[test]
    fn test_bad_host_is_rejected() {
        let mut cfg = Config::load_from("does-not-exist").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
