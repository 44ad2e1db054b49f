use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct AppSettings {
    /// Dashboard title
    pub title: String,

    /// Debug mode
    pub debug: bool,

    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Deployment environment: development, staging, production, test
    pub environment: String,

    /// Display timezone
    pub timezone: String,

    /// Enable request profiling
    pub enable_profiling: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            title: "Yōsai Intel Dashboard".to_string(),
            debug: true,
            host: "127.0.0.1".to_string(),
            port: 8050,
            environment: "development".to_string(),
            timezone: "UTC".to_string(),
            enable_profiling: false,
        }
    }
}

impl AppSettings {
    /// `host:port` the dashboard binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Supported database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    /// PostgreSQL server
    Postgresql,
    /// MySQL server
    Mysql,
    /// Local `SQLite` file
    Sqlite,
    /// In-memory sample data
    Mock,
}

impl DatabaseKind {
    /// Whether the backend is reached over the network
    pub const fn is_networked(self) -> bool {
        matches!(self, Self::Postgresql | Self::Mysql)
    }

    /// Name as written in the configuration file
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Mock => "mock",
        }
    }
}

/// Database section
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct DatabaseSettings {
    /// Backend kind
    #[serde(rename = "type")]
    pub kind: DatabaseKind,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database name, or file name for `SQLite`
    pub name: String,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            kind: DatabaseKind::Sqlite,
            host: "localhost".to_string(),
            port: 5432,
            name: "yosai.db".to_string(),
            user: "user".to_string(),
            password: String::new(),
            pool_size: 5,
            connection_timeout: 30,
        }
    }
}

impl DatabaseSettings {
    /// Connection URL for the configured backend
    pub fn connection_string(&self) -> String {
        match self.kind {
            DatabaseKind::Postgresql => format!(
                "postgresql://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
            DatabaseKind::Mysql => format!(
                "mysql://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
            DatabaseKind::Sqlite => format!("sqlite:///{}", self.name),
            DatabaseKind::Mock => format!("mock://{}", self.name),
        }
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("pool_size", &self.pool_size)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

/// Supported cache backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    /// In-process cache
    Memory,
    /// Redis server
    Redis,
    /// Memcached server
    Memcached,
}

impl CacheKind {
    /// Name as written in the configuration file
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redis => "redis",
            Self::Memcached => "memcached",
        }
    }
}

/// Cache section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct CacheSettings {
    /// Backend kind
    #[serde(rename = "type")]
    pub kind: CacheKind,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Redis database index
    pub database: u32,
    /// Default entry lifetime in seconds
    pub timeout_seconds: u64,
    /// Prefix prepended to every key
    pub key_prefix: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            kind: CacheKind::Memory,
            host: "localhost".to_string(),
            port: 6379,
            database: 0,
            timeout_seconds: 300,
            key_prefix: "yosai:".to_string(),
        }
    }
}

/// Secret keys that must never reach production
pub const INSECURE_SECRET_KEYS: &[&str] = &[
    "",
    "dev-key-change-in-production",
    "change-me",
    "change-me-in-production",
];

/// Security section
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SecuritySettings {
    /// Session signing key
    pub secret_key: String,
    /// Idle session lifetime
    pub session_timeout_minutes: u64,
    /// Upload size limit
    pub max_file_size_mb: u64,
    /// Enable CORS headers
    pub cors_enabled: bool,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
    /// Enable request rate limiting
    pub rate_limiting_enabled: bool,
    /// Requests allowed per client per minute
    pub rate_limit_per_minute: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            secret_key: "dev-key-change-in-production".to_string(),
            session_timeout_minutes: 60,
            max_file_size_mb: 100,
            cors_enabled: false,
            cors_origins: vec![],
            rate_limiting_enabled: false,
            rate_limit_per_minute: 120,
        }
    }
}

impl SecuritySettings {
    /// Whether the secret key is one of the well-known placeholders
    pub fn has_insecure_secret(&self) -> bool {
        INSECURE_SECRET_KEYS.contains(&self.secret_key.as_str())
    }
}

impl fmt::Debug for SecuritySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecuritySettings")
            .field("secret_key", &"[REDACTED]")
            .field("session_timeout_minutes", &self.session_timeout_minutes)
            .field("max_file_size_mb", &self.max_file_size_mb)
            .field("cors_enabled", &self.cors_enabled)
            .field("cors_origins", &self.cors_origins)
            .field("rate_limiting_enabled", &self.rate_limiting_enabled)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

/// Analytics section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyticsSettings {
    /// Master switch
    pub enabled: bool,
    /// Result cache lifetime
    pub cache_timeout_seconds: u64,
    /// Row cap per query
    pub max_records_per_query: u64,
    /// Stream events as they arrive
    pub enable_real_time: bool,
    /// Events processed per batch
    pub batch_size: u64,
    /// Run the anomaly detector
    pub anomaly_detection_enabled: bool,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_timeout_seconds: 300,
            max_records_per_query: 10_000,
            enable_real_time: true,
            batch_size: 1000,
            anomaly_detection_enabled: true,
        }
    }
}

/// Monitoring section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MonitoringSettings {
    /// Expose the health check endpoint
    pub health_check_enabled: bool,
    /// Expose metrics
    pub metrics_enabled: bool,
    /// Metrics listener port
    pub metrics_port: u16,
    /// Record request timings
    pub performance_monitoring: bool,
    /// Ship errors to the reporting backend
    pub error_reporting_enabled: bool,
    /// Error reporting DSN
    pub sentry_dsn: Option<String>,
    /// Days to keep logs
    pub log_retention_days: u32,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            health_check_enabled: true,
            metrics_enabled: true,
            metrics_port: 9090,
            performance_monitoring: false,
            error_reporting_enabled: false,
            sentry_dsn: None,
            log_retention_days: 30,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human readable
    Pretty,
}

/// Log file rotation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file every day
    #[default]
    Daily,
    /// New file every hour
    Hourly,
    /// Single file
    Never,
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct LoggingSettings {
    /// Log level; `warning` and `critical` are accepted aliases
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Directory for rolling log files, stderr only when unset
    pub log_dir: Option<PathBuf>,
    /// Rotation policy for file output
    pub rotation: RotationPolicy,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}
