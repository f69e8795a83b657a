//! API Configuration Module
//!
//! Configuration for the bind address, storage selection, the read-through
//! cache and CORS. Loaded from environment variables with sensible defaults
//! for development.

use std::net::SocketAddr;
use std::time::Duration;

use customer_core::ConfigError;
use customer_storage::{CacheConfig, DbConfig};

// ============================================================================
// STORAGE SELECTION
// ============================================================================

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// Process-local store; contents are lost on restart.
    #[default]
    Memory,
    /// PostgreSQL through a connection pool.
    Postgres,
}

impl std::str::FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::InvalidValue {
                field: "CUSTOMER_STORAGE".to_string(),
                value: other.to_string(),
                reason: "expected 'memory' or 'postgres'".to_string(),
            }),
        }
    }
}

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind.
    pub bind_host: String,

    /// Port to listen on.
    pub port: u16,

    /// Repository backing the service.
    pub storage: StorageKind,

    /// Insert sample customers when the store starts empty.
    pub seed_data: bool,

    /// Whether reads go through the cache at all.
    pub cache_enabled: bool,

    /// Absolute lifetime of a cache entry.
    pub cache_ttl: Duration,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    /// Connection settings, used when `storage` is Postgres.
    pub db: DbConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
            storage: StorageKind::Memory,
            seed_data: true,
            cache_enabled: true,
            cache_ttl: Duration::from_secs(600), // 10 minutes
            cors_origins: Vec::new(),             // Empty = allow all
            cors_max_age_secs: 86400,             // 24 hours
            db: DbConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `CUSTOMER_API_BIND`: Interface to bind (default: 0.0.0.0)
    /// - `PORT` or `CUSTOMER_API_PORT`: Port (default: 3000)
    /// - `CUSTOMER_STORAGE`: "memory" or "postgres" (default: memory)
    /// - `CUSTOMER_SEED_DATA`: "true" or "false" (default: true)
    /// - `CUSTOMER_CACHE_ENABLED`: "true" or "false" (default: true)
    /// - `CUSTOMER_CACHE_TTL_SECS`: Cache entry lifetime (default: 600)
    /// - `CUSTOMER_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `CUSTOMER_DB_*`: see [`DbConfig::from_env`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_host = std::env::var("CUSTOMER_API_BIND").unwrap_or(defaults.bind_host);

        let port = match std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("CUSTOMER_API_PORT").ok())
        {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                value: value.clone(),
                reason: "expected a port number".to_string(),
            })?,
            None => defaults.port,
        };

        let storage = match std::env::var("CUSTOMER_STORAGE") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.storage,
        };

        let seed_data = env_flag("CUSTOMER_SEED_DATA", defaults.seed_data);
        let cache_enabled = env_flag("CUSTOMER_CACHE_ENABLED", defaults.cache_enabled);

        let cache_ttl = std::env::var("CUSTOMER_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let cors_origins = std::env::var("CUSTOMER_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_max_age_secs = std::env::var("CUSTOMER_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        Ok(Self {
            bind_host,
            port,
            storage,
            seed_data,
            cache_enabled,
            cache_ttl,
            cors_origins,
            cors_max_age_secs,
            db: DbConfig::from_env(),
        })
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "CUSTOMER_API_BIND".to_string(),
                value: addr,
                reason: e.to_string(),
            })
    }

    /// Cache settings, or `None` when caching is switched off.
    pub fn cache_config(&self) -> Option<CacheConfig> {
        self.cache_enabled
            .then(|| CacheConfig::new().with_ttl(self.cache_ttl))
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            // Dev mode: allow all
            return true;
        }
        self.cors_origins.iter().any(|allowed| allowed == origin)
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageKind::Memory);
        assert!(config.seed_data);
        assert!(config.cache_enabled);
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_storage_kind_parsing() {
        assert_eq!("memory".parse::<StorageKind>(), Ok(StorageKind::Memory));
        assert_eq!("Postgres".parse::<StorageKind>(), Ok(StorageKind::Postgres));
        assert!("sqlite".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_bind_addr() {
        let config = ApiConfig {
            bind_host: "127.0.0.1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.bind_addr().map(|a| a.port()), Ok(8080));

        let bad = ApiConfig {
            bind_host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(bad.bind_addr().is_err());
    }

    #[test]
    fn test_cache_config_follows_flag() {
        let mut config = ApiConfig {
            cache_ttl: Duration::from_secs(30),
            ..Default::default()
        };
        assert_eq!(
            config.cache_config().map(|c| c.entry_ttl),
            Some(Duration::from_secs(30))
        );

        config.cache_enabled = false;
        assert!(config.cache_config().is_none());
    }

    #[test]
    fn test_origin_allowed() {
        let mut config = ApiConfig::default();
        assert!(config.is_origin_allowed("http://localhost:5000"));

        config.cors_origins = vec!["https://customers.example.com".to_string()];
        assert!(config.is_origin_allowed("https://customers.example.com"));
        assert!(!config.is_origin_allowed("https://evil.example.com"));
    }
}
