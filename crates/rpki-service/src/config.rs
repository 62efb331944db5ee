//! Service configuration.

use std::fmt;
use std::str::FromStr;

/// Which storage backend the service runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Persistent `RocksDB` database under `data_dir`.
    RocksDb,
    /// Process-local map; contents are lost on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rocksdb" | "rocks" => Ok(Self::RocksDb),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RocksDb => f.write_str("rocksdb"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/rpki").
    pub data_dir: String,

    /// Storage backend (default: `rocksdb`).
    pub store_backend: StoreBackend,

    /// JSON file of records to load at startup (optional).
    pub seed_file: Option<String>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|s| match s.parse() {
                    Ok(backend) => Some(backend),
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring STORE_BACKEND");
                        None
                    }
                })
                .unwrap_or(defaults.store_backend),
            seed_file: std::env::var("SEED_FILE").ok().filter(|s| !s.is_empty()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or(defaults.cors_origins),
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/rpki".into(),
            store_backend: StoreBackend::RocksDb,
            seed_file: None,
            cors_origins: vec!["*".into()],
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!("rocksdb".parse::<StoreBackend>(), Ok(StoreBackend::RocksDb));
        assert_eq!(" Memory ".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn origins_are_trimmed() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.store_backend, StoreBackend::RocksDb);
        assert_eq!(config.cors_origins, vec!["*"]);
        assert!(config.seed_file.is_none());
    }
}
