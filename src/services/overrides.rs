use tracing::debug;

use crate::domain::models::{ConfigValue, Environment, OverrideRule, RawDocument};

/// Apply environment overrides in rule declaration order.
///
/// Each rule whose variable is set writes the raw string value at its path,
/// replacing whatever was there (an unresolved placeholder included).
/// Values are never logged since several rules carry secrets.
pub fn apply_overrides(
    mut doc: RawDocument,
    env: &Environment,
    rules: &[OverrideRule],
) -> RawDocument {
    let mut applied = 0usize;
    for rule in rules {
        if let Some(value) = env.get(rule.env) {
            debug!(env = rule.env, path = rule.path, "applying environment override");
            doc.set(rule.path, ConfigValue::String(value.to_string()));
            applied += 1;
        }
    }

    debug!(source = %doc.source().display(), applied, "environment overrides applied");
    doc
}
