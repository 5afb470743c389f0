// Configuration type definitions

use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; defaults to CPU cores when unset
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Whether to write an access log line per request
    pub access_log: bool,
}

/// Performance tuning configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceConfig {
    /// Keep-alive timeout in seconds; 0 disables keep-alive
    pub keep_alive_timeout: u64,
    /// Read timeout in seconds
    pub read_timeout: u64,
    /// Write timeout in seconds
    pub write_timeout: u64,
    /// Maximum concurrent connections; unlimited when unset
    #[serde(default)]
    pub max_connections: Option<u32>,
}
