//! Yosai - configuration resolver for the Yōsai Intel dashboard
//!
//! Loads a YAML configuration file, substitutes `${VAR}` / `${VAR:default}`
//! placeholders from the environment, applies a fixed table of environment
//! overrides and validates the result into an immutable
//! [`ResolvedSettings`].
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): value tree, environment snapshot, override
//!   table, coercion schema, typed settings and errors
//! - **Service Layer** (`services`): substitution, overrides, validation,
//!   redaction and the hot-swappable settings store
//! - **Infrastructure Layer** (`infrastructure`): file loading, discovery,
//!   hot reload and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use yosai::{ConfigLoader, Environment, DEFAULT_OVERRIDE_RULES};
//!
//! let env = Environment::from_process();
//! let settings = ConfigLoader::resolve("config/config.yaml", &env, DEFAULT_OVERRIDE_RULES)?;
//! println!("listening on {}", settings.app().bind_address());
//! # Ok::<(), yosai::ConfigError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ConfigMap, ConfigValue, Environment, OverrideRule, PluginSettings, RawDocument,
    ResolvedSettings, DEFAULT_OVERRIDE_RULES,
};
pub use domain::{ConfigError, ConfigResult};
pub use infrastructure::config::{ConfigLoader, ConfigSource, ConfigWatcher};
pub use services::{apply_overrides, substitute, validate, SettingsStore};
