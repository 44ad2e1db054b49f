//! Final validation pass: turns a substituted, overridden document into
//! [`ResolvedSettings`] or reports everything that is wrong with it.

use std::collections::BTreeMap;

use figment::providers::Serialized;
use figment::Figment;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::models::schema::{FieldKind, FIELD_SCHEMA, KNOWN_SECTIONS};
use crate::domain::models::value::{get_path, set_path, walk_map};
use crate::domain::models::{
    ConfigMap, ConfigValue, PluginSettings, RawDocument, ResolvedSettings, SettingsSections,
};
use crate::domain::{ConfigError, ConfigResult, FieldMismatch, UnresolvedKey};
use crate::services::redaction::SecretScrubber;

/// Validate `doc` and freeze it.
///
/// Checks run in order and each failing stage reports every offending key
/// at once: unresolved placeholders, then type coercion, then production
/// hardening.
/// Outside production the hardening problems are only logged.
pub fn validate(doc: RawDocument) -> ConfigResult<ResolvedSettings> {
    let (source, mut tree) = doc.into_parts();

    let keys = collect_unresolved(&tree);
    if !keys.is_empty() {
        return Err(ConfigError::UnresolvedPlaceholder { path: source, keys });
    }

    let mismatches = coerce_known_fields(&mut tree);
    if !mismatches.is_empty() {
        return Err(ConfigError::TypeMismatch {
            path: source,
            mismatches,
        });
    }

    let sections = match extract_sections(&tree) {
        Ok(sections) => sections,
        Err(mismatches) => {
            return Err(ConfigError::TypeMismatch {
                path: source,
                mismatches,
            })
        }
    };

    let problems = hardening_problems(&sections);
    if sections.app.is_production() {
        if !problems.is_empty() {
            return Err(ConfigError::InsecureConfiguration {
                path: source,
                problems,
            });
        }
    } else {
        for problem in &problems {
            warn!(environment = %sections.app.environment, "{problem}");
        }
    }

    debug!(source = %source.display(), "configuration validated");
    Ok(ResolvedSettings::new(source, tree, sections))
}

/// Every leaf still carrying the unresolved sentinel, in path order.
pub fn collect_unresolved(tree: &ConfigMap) -> Vec<UnresolvedKey> {
    let mut keys = Vec::new();
    walk_map(tree, "", &mut |path, value| {
        if let ConfigValue::Unresolved(unresolved) = value {
            keys.push(UnresolvedKey {
                key: path.to_string(),
                missing: unresolved.missing.clone(),
            });
        }
    });
    keys
}

/// Coerce known fields in place, returning every field that would not.
pub fn coerce_known_fields(tree: &mut ConfigMap) -> Vec<FieldMismatch> {
    let mut mismatches = Vec::new();

    for section in KNOWN_SECTIONS {
        if let Some(value) = tree.get(*section) {
            if !matches!(value, ConfigValue::Mapping(_) | ConfigValue::Null) {
                mismatches.push(mismatch(section, "mapping", value));
            }
        }
    }

    for spec in FIELD_SCHEMA {
        let Some(value) = get_path(tree, spec.path) else {
            continue;
        };
        match spec.kind.coerce(value) {
            Some(coerced) => set_path(tree, spec.path, coerced),
            None => mismatches.push(mismatch(spec.path, &spec.kind.expected(), value)),
        }
    }

    if let Some(ConfigValue::Mapping(plugins)) = tree.get_mut("plugins") {
        for (name, entry) in plugins.iter_mut() {
            let key = format!("plugins.{name}");
            match entry {
                ConfigValue::Null => {}
                ConfigValue::Mapping(settings) => {
                    if let Some(enabled) = settings.get_mut("enabled") {
                        match FieldKind::Boolean.coerce(enabled) {
                            Some(coerced) => *enabled = coerced,
                            None => mismatches.push(mismatch(
                                &format!("{key}.enabled"),
                                &FieldKind::Boolean.expected(),
                                enabled,
                            )),
                        }
                    }
                }
                other => mismatches.push(mismatch(&key, "mapping", other)),
            }
        }
    }

    mismatches
}

fn mismatch(key: &str, expected: &str, found: &ConfigValue) -> FieldMismatch {
    let found = match found {
        _ if SecretScrubber::shared().is_secret_path(key) => found.kind_name().to_string(),
        ConfigValue::String(s) => format!("string {s:?}"),
        ConfigValue::Bool(_) | ConfigValue::Integer(_) | ConfigValue::Float(_) => {
            format!("{} {found}", found.kind_name())
        }
        other => other.kind_name().to_string(),
    };
    FieldMismatch {
        key: key.to_string(),
        expected: expected.to_string(),
        found,
    }
}

/// Build the typed section views from a coerced tree.
pub fn extract_sections(tree: &ConfigMap) -> Result<SettingsSections, Vec<FieldMismatch>> {
    let mut errors = Vec::new();
    let mut sections = SettingsSections::default();

    macro_rules! section {
        ($field:ident) => {
            match extract(tree, stringify!($field)) {
                Ok(value) => sections.$field = value,
                Err(err) => errors.push(err),
            }
        };
    }

    section!(app);
    section!(database);
    section!(cache);
    section!(security);
    section!(analytics);
    section!(monitoring);
    section!(logging);

    sections.plugins = extract_plugins(tree);

    if errors.is_empty() {
        Ok(sections)
    } else {
        Err(errors)
    }
}

/// Layer the section's own defaults under whatever the file provided.
fn extract<T>(tree: &ConfigMap, section: &str) -> Result<T, FieldMismatch>
where
    T: Serialize + DeserializeOwned + Default,
{
    let provided: ConfigMap = tree
        .get(section)
        .and_then(ConfigValue::as_mapping)
        .map(|map| {
            map.iter()
                .filter(|(_, value)| !matches!(value, ConfigValue::Null))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    Figment::new()
        .merge(Serialized::defaults(T::default()))
        .merge(Serialized::defaults(provided))
        .extract()
        .map_err(|err| FieldMismatch {
            key: section.to_string(),
            expected: format!("valid `{section}` section"),
            found: err.to_string(),
        })
}

fn extract_plugins(tree: &ConfigMap) -> BTreeMap<String, PluginSettings> {
    let Some(plugins) = tree.get("plugins").and_then(ConfigValue::as_mapping) else {
        return BTreeMap::new();
    };

    plugins
        .iter()
        .map(|(name, entry)| {
            let mut settings = entry.as_mapping().cloned().unwrap_or_default();
            let enabled = settings
                .remove("enabled")
                .and_then(|value| value.as_bool())
                .unwrap_or(true);
            (name.clone(), PluginSettings { enabled, settings })
        })
        .collect()
}

/// Settings that would make a production deployment unsafe.
fn hardening_problems(sections: &SettingsSections) -> Vec<String> {
    let mut problems = Vec::new();
    if sections.security.has_insecure_secret() {
        problems.push(
            "security.secret_key is empty or a development placeholder; set SECRET_KEY".to_string(),
        );
    }
    if sections.database.kind.is_networked() && sections.database.password.is_empty() {
        problems.push("database.password must be set for a networked database".to_string());
    }
    if sections.app.host == "127.0.0.1" {
        problems.push("app.host must not be 127.0.0.1 in production".to_string());
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DatabaseKind, Unresolved};

    fn doc(entries: &[(&str, ConfigValue)]) -> RawDocument {
        let mut doc = RawDocument::new("settings.yaml", ConfigMap::new());
        for (path, value) in entries {
            doc.set(path, value.clone());
        }
        doc
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings = validate(doc(&[])).unwrap();
        assert_eq!(settings.app().port, 8050);
        assert_eq!(settings.database().kind, DatabaseKind::Sqlite);
        assert!(settings.tree().is_empty());
    }

    #[test]
    fn test_port_string_coerced_to_integer() {
        let settings = validate(doc(&[("app.port", "9000".into())])).unwrap();
        assert_eq!(settings.app().port, 9000);
        assert_eq!(settings.get("app.port"), Some(&ConfigValue::Integer(9000)));
    }

    #[test]
    fn test_unknown_fields_keep_their_type() {
        let settings = validate(doc(&[("app.build", "8050".into())])).unwrap();
        assert_eq!(settings.get("app.build"), Some(&ConfigValue::String("8050".into())));
    }

    #[test]
    fn test_unresolved_reports_every_key() {
        let unresolved = |name: &str| {
            ConfigValue::Unresolved(Unresolved {
                template: format!("${{{name}}}"),
                missing: vec![name.to_string()],
            })
        };
        let err = validate(doc(&[
            ("app.port", unresolved("PORT")),
            ("database.host", unresolved("DB_HOST")),
        ]))
        .unwrap_err();

        match err {
            ConfigError::UnresolvedPlaceholder { keys, .. } => {
                let names: Vec<_> = keys.iter().map(|k| k.key.as_str()).collect();
                assert_eq!(names, vec!["app.port", "database.host"]);
                assert_eq!(keys[0].missing, vec!["PORT".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_u32_field_out_of_range_names_the_field() {
        let err = validate(doc(&[("database.pool_size", ConfigValue::Integer(5_000_000_000))]))
            .unwrap_err();

        match err {
            ConfigError::TypeMismatch { mismatches, .. } => {
                assert_eq!(mismatches.len(), 1);
                assert_eq!(mismatches[0].key, "database.pool_size");
                assert_eq!(mismatches[0].expected, "integer 0-4294967295");
                assert_eq!(mismatches[0].found, "integer 5000000000");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_collects_all_fields() {
        let err = validate(doc(&[
            ("app.port", "eighty".into()),
            ("app.debug", "sometimes".into()),
            ("database.type", "oracle".into()),
        ]))
        .unwrap_err();

        match err {
            ConfigError::TypeMismatch { mismatches, .. } => {
                let keys: Vec<_> = mismatches.iter().map(|m| m.key.as_str()).collect();
                assert_eq!(keys, vec!["app.debug", "app.port", "database.type"]);
                assert_eq!(mismatches[1].found, "string \"eighty\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_section_must_be_mapping() {
        let mut root = ConfigMap::new();
        root.insert("database".into(), "postgres://x".into());
        let err = validate(RawDocument::new("c.yaml", root)).unwrap_err();
        assert_eq!(err.kind(), "TypeMismatch");
        assert_eq!(err.keys(), vec!["database".to_string()]);
    }

    #[test]
    fn test_secret_value_not_echoed_in_mismatch() {
        let err = validate(doc(&[(
            "security.secret_key",
            ConfigValue::Sequence(vec!["hunter2".into()]),
        )]))
        .unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn test_null_field_means_default() {
        let settings = validate(doc(&[("database.password", ConfigValue::Null)])).unwrap();
        assert_eq!(settings.database().password, "");
        assert_eq!(settings.get("database.password"), Some(&ConfigValue::Null));
    }

    #[test]
    fn test_plugins_enabled_flag() {
        let settings = validate(doc(&[
            ("plugins.file_upload.enabled", "off".into()),
            ("plugins.file_upload.max_rows", ConfigValue::Integer(10)),
            ("plugins.geo.zoom", ConfigValue::Integer(4)),
        ]))
        .unwrap();

        let upload = settings.plugin("file_upload").unwrap();
        assert!(!upload.enabled);
        assert_eq!(upload.settings.get("max_rows"), Some(&ConfigValue::Integer(10)));
        assert!(!upload.settings.contains_key("enabled"));
        assert_eq!(settings.enabled_plugins(), vec!["geo"]);
    }

    #[test]
    fn test_plugin_entry_must_be_mapping() {
        let err = validate(doc(&[("plugins.geo", ConfigValue::Integer(1))])).unwrap_err();
        assert_eq!(err.keys(), vec!["plugins.geo".to_string()]);
    }

    #[test]
    fn test_production_rejects_insecure_defaults() {
        let err = validate(doc(&[
            ("app.environment", "production".into()),
            ("database.type", "postgresql".into()),
        ]))
        .unwrap_err();

        match err {
            ConfigError::InsecureConfiguration { problems, .. } => {
                assert_eq!(problems.len(), 3);
                assert!(problems[0].contains("security.secret_key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_production_accepts_hardened_config() {
        let settings = validate(doc(&[
            ("app.environment", "Production".into()),
            ("app.host", "0.0.0.0".into()),
            ("database.type", "postgresql".into()),
            ("database.password", "pw".into()),
            ("security.secret_key", "3f9c1e".into()),
        ]))
        .unwrap();
        assert!(settings.app().is_production());
    }
}
