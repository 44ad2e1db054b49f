use serde::Serialize;

/// Static association between an environment variable and a settings path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverrideRule {
    /// Environment variable name
    pub env: &'static str,
    /// Dotted path into the settings tree
    pub path: &'static str,
}

impl OverrideRule {
    /// Declare a rule
    pub const fn new(env: &'static str, path: &'static str) -> Self {
        Self { env, path }
    }
}

/// The override contract, applied in declaration order after placeholder
/// substitution. Later rules win when two rules target the same path.
pub const DEFAULT_OVERRIDE_RULES: &[OverrideRule] = &[
    OverrideRule::new("YOSAI_ENV", "app.environment"),
    OverrideRule::new("HOST", "app.host"),
    OverrideRule::new("PORT", "app.port"),
    OverrideRule::new("DEBUG", "app.debug"),
    OverrideRule::new("DB_TYPE", "database.type"),
    OverrideRule::new("DB_HOST", "database.host"),
    OverrideRule::new("DB_PORT", "database.port"),
    OverrideRule::new("DB_NAME", "database.name"),
    OverrideRule::new("DB_USER", "database.user"),
    OverrideRule::new("DB_PASSWORD", "database.password"),
    OverrideRule::new("REDIS_HOST", "cache.host"),
    OverrideRule::new("REDIS_PORT", "cache.port"),
    OverrideRule::new("SECRET_KEY", "security.secret_key"),
    OverrideRule::new("LOG_LEVEL", "logging.level"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_env_names_are_unique() {
        let names: HashSet<_> = DEFAULT_OVERRIDE_RULES.iter().map(|r| r.env).collect();
        assert_eq!(names.len(), DEFAULT_OVERRIDE_RULES.len());
    }

    #[test]
    fn test_documented_mappings_present() {
        for (env, path) in [
            ("DB_HOST", "database.host"),
            ("DB_PORT", "database.port"),
            ("DB_NAME", "database.name"),
            ("DB_USER", "database.user"),
            ("DB_PASSWORD", "database.password"),
            ("REDIS_HOST", "cache.host"),
            ("SECRET_KEY", "security.secret_key"),
            ("HOST", "app.host"),
            ("PORT", "app.port"),
            ("DEBUG", "app.debug"),
        ] {
            assert!(
                DEFAULT_OVERRIDE_RULES.contains(&OverrideRule::new(env, path)),
                "missing rule {env} -> {path}"
            );
        }
    }
}
