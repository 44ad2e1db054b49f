pub mod config;
pub mod document;
pub mod environment;
pub mod override_rule;
pub mod schema;
pub mod settings;
pub mod value;

pub use config::{
    AnalyticsSettings, AppSettings, CacheKind, CacheSettings, DatabaseKind, DatabaseSettings,
    LogFormat, LoggingSettings, MonitoringSettings, RotationPolicy, SecuritySettings,
};
pub use document::RawDocument;
pub use environment::Environment;
pub use override_rule::{OverrideRule, DEFAULT_OVERRIDE_RULES};
pub use schema::{FieldKind, FieldSpec, FIELD_SCHEMA};
pub use settings::{PluginSettings, ResolvedSettings, SettingsSections};
pub use value::{ConfigMap, ConfigValue, Unresolved};
