//! Configuration file infrastructure
//!
//! - YAML file loading and overlay merging
//! - Config path discovery (`YOSAI_CONFIG_FILE`, `YOSAI_ENV`)
//! - The composite resolve pipeline
//! - Polling hot reload into a [`SettingsStore`](crate::services::SettingsStore)

pub mod loader;
pub mod watcher;

pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_VAR, ENVIRONMENT_VAR};
pub use watcher::{ConfigWatcher, ReloadOutcome, WatcherConfig};
