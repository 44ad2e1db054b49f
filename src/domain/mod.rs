//! Domain layer for the Yosai configuration resolver
//!
//! Pure data: the configuration value tree, environment snapshots, the
//! override contract, the coercion schema and the resolved settings.

pub mod errors;
pub mod models;

// Re-export error types for convenient access
pub use errors::{ConfigError, ConfigResult, FieldMismatch, UnresolvedKey};
