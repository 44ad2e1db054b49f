//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use yosai::{
    apply_overrides, substitute, validate, ConfigLoader, ConfigResult, Environment,
    ResolvedSettings, DEFAULT_OVERRIDE_RULES,
};

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `content` to `dir/name` and return the path
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create config dir");
    }
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

/// Run the whole pipeline over YAML text without touching the filesystem
#[allow(dead_code)]
pub fn resolve_str(yaml: &str, env: &Environment) -> ConfigResult<ResolvedSettings> {
    let doc = ConfigLoader::parse_str("inline.yaml", yaml)?;
    let doc = substitute(doc, env)?;
    let doc = apply_overrides(doc, env, DEFAULT_OVERRIDE_RULES);
    validate(doc)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
