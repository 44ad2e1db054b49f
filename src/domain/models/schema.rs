//! Coercion table for known settings.
//!
//! Only the fields declared in [`FIELD_SCHEMA`] are coerced. Every other leaf
//! keeps the type YAML gave it, so a quoted `"8050"` under an unknown key
//! stays a string.

use super::value::ConfigValue;

/// Top-level sections that must be mappings when present.
pub const KNOWN_SECTIONS: &[&str] = &[
    "app",
    "database",
    "cache",
    "security",
    "analytics",
    "monitoring",
    "logging",
    "plugins",
];

/// Semantic type of a known field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer in `0..=max`
    Integer(i64),
    /// Integer in 1..=65535
    Port,
    /// Boolean, accepting the usual string spellings
    Boolean,
    /// String, scalars are stringified
    Text,
    /// Sequence of strings
    TextList,
    /// Lower-cased string restricted to a fixed set
    Choice(&'static [&'static str]),
}

/// A known field and its kind.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Dotted path
    pub path: &'static str,
    /// Expected kind
    pub kind: FieldKind,
}

const fn field(path: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { path, kind }
}

/// Allowed values of `app.environment`
pub const ENVIRONMENTS: &[&str] = &["development", "staging", "production", "test"];
/// Allowed values of `database.type`
pub const DATABASE_TYPES: &[&str] = &["postgresql", "mysql", "sqlite", "mock"];
/// Allowed values of `cache.type`
pub const CACHE_TYPES: &[&str] = &["memory", "redis", "memcached"];
/// Allowed values of `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "warning", "error", "critical"];
/// Allowed values of `logging.format`
pub const LOG_FORMATS: &[&str] = &["json", "pretty"];
/// Allowed values of `logging.rotation`
pub const ROTATIONS: &[&str] = &["daily", "hourly", "never"];

/// Upper bound of fields held as `u32`
const U32_MAX: i64 = u32::MAX as i64;

/// Every known field. `plugins.<name>.enabled` is handled separately since
/// plugin names are not known in advance.
pub const FIELD_SCHEMA: &[FieldSpec] = &[
    field("app.title", FieldKind::Text),
    field("app.debug", FieldKind::Boolean),
    field("app.host", FieldKind::Text),
    field("app.port", FieldKind::Port),
    field("app.environment", FieldKind::Choice(ENVIRONMENTS)),
    field("app.timezone", FieldKind::Text),
    field("app.enable_profiling", FieldKind::Boolean),
    field("database.type", FieldKind::Choice(DATABASE_TYPES)),
    field("database.host", FieldKind::Text),
    field("database.port", FieldKind::Port),
    field("database.name", FieldKind::Text),
    field("database.user", FieldKind::Text),
    field("database.password", FieldKind::Text),
    field("database.pool_size", FieldKind::Integer(U32_MAX)),
    field("database.connection_timeout", FieldKind::Integer(i64::MAX)),
    field("cache.type", FieldKind::Choice(CACHE_TYPES)),
    field("cache.host", FieldKind::Text),
    field("cache.port", FieldKind::Port),
    field("cache.database", FieldKind::Integer(U32_MAX)),
    field("cache.timeout_seconds", FieldKind::Integer(i64::MAX)),
    field("cache.key_prefix", FieldKind::Text),
    field("security.secret_key", FieldKind::Text),
    field("security.session_timeout_minutes", FieldKind::Integer(i64::MAX)),
    field("security.max_file_size_mb", FieldKind::Integer(i64::MAX)),
    field("security.cors_enabled", FieldKind::Boolean),
    field("security.cors_origins", FieldKind::TextList),
    field("security.rate_limiting_enabled", FieldKind::Boolean),
    field("security.rate_limit_per_minute", FieldKind::Integer(U32_MAX)),
    field("analytics.enabled", FieldKind::Boolean),
    field("analytics.cache_timeout_seconds", FieldKind::Integer(i64::MAX)),
    field("analytics.max_records_per_query", FieldKind::Integer(i64::MAX)),
    field("analytics.enable_real_time", FieldKind::Boolean),
    field("analytics.batch_size", FieldKind::Integer(i64::MAX)),
    field("analytics.anomaly_detection_enabled", FieldKind::Boolean),
    field("monitoring.health_check_enabled", FieldKind::Boolean),
    field("monitoring.metrics_enabled", FieldKind::Boolean),
    field("monitoring.metrics_port", FieldKind::Port),
    field("monitoring.performance_monitoring", FieldKind::Boolean),
    field("monitoring.error_reporting_enabled", FieldKind::Boolean),
    field("monitoring.sentry_dsn", FieldKind::Text),
    field("monitoring.log_retention_days", FieldKind::Integer(U32_MAX)),
    field("logging.level", FieldKind::Choice(LOG_LEVELS)),
    field("logging.format", FieldKind::Choice(LOG_FORMATS)),
    field("logging.log_dir", FieldKind::Text),
    field("logging.rotation", FieldKind::Choice(ROTATIONS)),
];

/// Look up the kind declared for `path`.
pub fn kind_of(path: &str) -> Option<FieldKind> {
    FIELD_SCHEMA
        .iter()
        .find(|spec| spec.path == path)
        .map(|spec| spec.kind)
}

impl FieldKind {
    /// Description used in type mismatch reports.
    pub fn expected(self) -> String {
        match self {
            Self::Integer(i64::MAX) => "non-negative integer".to_string(),
            Self::Integer(max) => format!("integer 0-{max}"),
            Self::Port => "port number (1-65535)".to_string(),
            Self::Boolean => "boolean (true/false/yes/no/on/off/1/0)".to_string(),
            Self::Text => "string".to_string(),
            Self::TextList => "list of strings".to_string(),
            Self::Choice(options) => format!("one of: {}", options.join(", ")),
        }
    }

    /// Coerce `value` to this kind.
    ///
    /// `Null` passes through untouched; it means "use the default". On
    /// failure the caller gets `None` and reports [`FieldKind::expected`].
    pub fn coerce(self, value: &ConfigValue) -> Option<ConfigValue> {
        if matches!(value, ConfigValue::Null) {
            return Some(ConfigValue::Null);
        }
        match self {
            Self::Integer(max) => coerce_integer(value)
                .filter(|n| (0..=max).contains(n))
                .map(ConfigValue::Integer),
            Self::Port => coerce_integer(value)
                .filter(|n| (1..=65_535).contains(n))
                .map(ConfigValue::Integer),
            Self::Boolean => coerce_bool(value).map(ConfigValue::Bool),
            Self::Text => coerce_text(value).map(ConfigValue::String),
            Self::TextList => match value {
                ConfigValue::Sequence(items) => items
                    .iter()
                    .map(|item| coerce_text(item).map(ConfigValue::String))
                    .collect::<Option<Vec<_>>>()
                    .map(ConfigValue::Sequence),
                _ => None,
            },
            Self::Choice(options) => coerce_text(value)
                .map(|s| s.trim().to_lowercase())
                .filter(|s| options.contains(&s.as_str()))
                .map(ConfigValue::String),
        }
    }
}

fn coerce_integer(value: &ConfigValue) -> Option<i64> {
    match value {
        ConfigValue::Integer(n) => Some(*n),
        ConfigValue::String(s) => {
            let digits = s.trim();
            let digits = digits.strip_prefix('+').unwrap_or(digits);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Parse the boolean spellings accepted for boolean fields.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn coerce_bool(value: &ConfigValue) -> Option<bool> {
    match value {
        ConfigValue::Bool(b) => Some(*b),
        ConfigValue::Integer(0) => Some(false),
        ConfigValue::Integer(1) => Some(true),
        ConfigValue::String(s) => parse_bool(s),
        _ => None,
    }
}

fn coerce_text(value: &ConfigValue) -> Option<String> {
    match value {
        ConfigValue::String(s) => Some(s.clone()),
        ConfigValue::Integer(n) => Some(n.to_string()),
        ConfigValue::Float(x) => Some(x.to_string()),
        ConfigValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
