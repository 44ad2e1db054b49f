use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::models::{ConfigMap, ConfigValue};

/// Replacement text for secret values
pub const REDACTED: &str = "[REDACTED]";

/// Detects settings keys that hold secrets and masks their values.
#[derive(Clone)]
pub struct SecretScrubber {
    secret_key_pattern: Regex,
}

static SHARED: LazyLock<SecretScrubber> = LazyLock::new(SecretScrubber::new);

impl SecretScrubber {
    /// Create a new scrubber
    pub fn new() -> Self {
        Self {
            // Matches the final path segment: password, db_password, secret_key, api_token, sentry_dsn ...
            secret_key_pattern: Regex::new(
                r"(?i)(password|passwd|secret|token|api_?key|credential|dsn)",
            )
            .unwrap(),
        }
    }

    /// Process-wide instance
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Whether the last segment of a dotted path names a secret.
    pub fn is_secret_path(&self, path: &str) -> bool {
        let last = path.rsplit('.').next().unwrap_or(path);
        let last = last.split('[').next().unwrap_or(last);
        self.secret_key_pattern.is_match(last)
    }

    /// Copy of `tree` with every value under a secret key masked.
    pub fn redact_tree(&self, tree: &ConfigMap) -> ConfigMap {
        tree.iter()
            .map(|(key, value)| {
                let value = if self.is_secret_path(key) {
                    mask(value)
                } else {
                    self.redact_nested(value)
                };
                (key.clone(), value)
            })
            .collect()
    }

    /// Mask a single value found at `path`, if the path names a secret.
    pub fn redact_value(&self, path: &str, value: &ConfigValue) -> ConfigValue {
        if self.is_secret_path(path) {
            mask(value)
        } else {
            self.redact_nested(value)
        }
    }

    /// Redact secret keys anywhere below a non-secret value.
    fn redact_nested(&self, value: &ConfigValue) -> ConfigValue {
        match value {
            ConfigValue::Mapping(map) => ConfigValue::Mapping(self.redact_tree(map)),
            ConfigValue::Sequence(items) => {
                ConfigValue::Sequence(items.iter().map(|item| self.redact_nested(item)).collect())
            }
            other => other.clone(),
        }
    }
}

/// Empty and null secrets stay visible so that "not set" is still obvious.
fn mask(value: &ConfigValue) -> ConfigValue {
    match value {
        ConfigValue::Null => ConfigValue::Null,
        ConfigValue::String(s) if s.is_empty() => ConfigValue::String(String::new()),
        ConfigValue::Mapping(map) => ConfigValue::Mapping(
            map.iter().map(|(k, v)| (k.clone(), mask(v))).collect(),
        ),
        ConfigValue::Sequence(items) => ConfigValue::Sequence(items.iter().map(mask).collect()),
        _ => ConfigValue::String(REDACTED.to_string()),
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
