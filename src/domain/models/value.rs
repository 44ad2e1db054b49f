//! Configuration value tree.
//!
//! YAML is parsed into [`ConfigValue`] rather than kept as `serde_yaml::Value`
//! so that substitution can mark a leaf as [`ConfigValue::Unresolved`] and
//! validation can find every such leaf before the settings are frozen.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// String-keyed mapping node.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A node in the configuration tree.
///
/// Floats compare by bit pattern, so a tree holding `.nan` still equals an
/// identical resolution of the same file.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit YAML `null` (or an empty value)
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Integer(i64),
    /// Floating point scalar
    Float(f64),
    /// String scalar
    String(String),
    /// Sequence of values
    Sequence(Vec<ConfigValue>),
    /// Nested mapping
    Mapping(ConfigMap),
    /// String leaf whose placeholders could not be resolved
    Unresolved(Unresolved),
}

/// Sentinel left behind by substitution when a placeholder has neither an
/// environment value nor a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    /// The original string, placeholders included
    pub template: String,
    /// Variable names that were missing, in order of appearance
    pub missing: Vec<String>,
}

impl ConfigValue {
    /// Returns the mapping if this node is one.
    pub const fn as_mapping(&self) -> Option<&ConfigMap> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the string if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this node is an integer scalar.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this node is a boolean scalar.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// True for every node that is neither a sequence nor a mapping.
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    /// Human readable kind, used in type mismatch reports.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Unresolved(_) => "unresolved placeholder",
        }
    }

    /// Visit every leaf together with its dotted path.
    ///
    /// Sequence elements are addressed as `key[index]`.
    pub fn walk_leaves<'a, F>(&'a self, prefix: &str, visit: &mut F)
    where
        F: FnMut(&str, &'a Self),
    {
        match self {
            Self::Mapping(map) => walk_map(map, prefix, visit),
            Self::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.walk_leaves(&format!("{prefix}[{index}]"), visit);
                }
            }
            leaf => visit(prefix, leaf),
        }
    }
}

/// Visit every leaf of a mapping with its dotted path.
pub fn walk_map<'a, F>(map: &'a ConfigMap, prefix: &str, visit: &mut F)
where
    F: FnMut(&str, &'a ConfigValue),
{
    for (key, value) in map {
        value.walk_leaves(&join_path(prefix, key), visit);
    }
}

/// Append a key to a dotted path.
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Look up a value by dotted path (`database.host`).
pub fn get_path<'a>(map: &'a ConfigMap, path: &str) -> Option<&'a ConfigValue> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_mapping()?.get(segment)?;
    }
    Some(current)
}

/// Set a value by dotted path, creating intermediate mappings as needed.
///
/// An intermediate node that exists but is not a mapping is replaced by an
/// empty mapping.
pub fn set_path(map: &mut ConfigMap, path: &str, value: ConfigValue) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = map;
    for segment in parents {
        let slot = current
            .entry((*segment).to_string())
            .or_insert_with(|| ConfigValue::Mapping(ConfigMap::new()));
        if !matches!(slot, ConfigValue::Mapping(_)) {
            *slot = ConfigValue::Mapping(ConfigMap::new());
        }
        current = match slot {
            ConfigValue::Mapping(next) => next,
            _ => return,
        };
    }
    current.insert((*last).to_string(), value);
}

/// Deep-merge `overlay` into `base`.
///
/// Mappings present on both sides merge recursively; any other overlay value
/// replaces the base value.
pub fn merge_maps(base: &mut ConfigMap, overlay: ConfigMap) {
    for (key, value) in overlay {
        match value {
            ConfigValue::Mapping(incoming) => {
                if let Some(ConfigValue::Mapping(existing)) = base.get_mut(&key) {
                    merge_maps(existing, incoming);
                    continue;
                }
                base.insert(key, ConfigValue::Mapping(incoming));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            (Self::Unresolved(a), Self::Unresolved(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Unresolved(u) => f.write_str(&u.template),
            Self::Sequence(_) | Self::Mapping(_) => match serde_json::to_string(self) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(value: ConfigMap) -> Self {
        Self::Mapping(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigMap {
        let mut database = ConfigMap::new();
        database.insert("host".into(), "localhost".into());
        database.insert("port".into(), 5432.into());

        let mut root = ConfigMap::new();
        root.insert("database".into(), database.into());
        root.insert(
            "origins".into(),
            ConfigValue::Sequence(vec!["a".into(), "b".into()]),
        );
        root
    }

    #[test]
    fn test_get_path_nested() {
        let root = sample();
        assert_eq!(
            get_path(&root, "database.host"),
            Some(&ConfigValue::String("localhost".into()))
        );
        assert_eq!(get_path(&root, "database.port").and_then(ConfigValue::as_i64), Some(5432));
        assert!(get_path(&root, "database.missing").is_none());
        assert!(get_path(&root, "database.host.deeper").is_none());
    }

    #[test]
    fn test_set_path_creates_intermediates() {
        let mut root = ConfigMap::new();
        set_path(&mut root, "security.secret_key", "abc".into());
        assert_eq!(
            get_path(&root, "security.secret_key").and_then(ConfigValue::as_str),
            Some("abc")
        );
    }

    #[test]
    fn test_set_path_replaces_scalar_intermediate() {
        let mut root = ConfigMap::new();
        root.insert("cache".into(), "disabled".into());
        set_path(&mut root, "cache.host", "redis1".into());
        assert_eq!(
            get_path(&root, "cache.host").and_then(ConfigValue::as_str),
            Some("redis1")
        );
    }

    #[test]
    fn test_merge_maps_is_deep() {
        let mut base = sample();
        let mut overlay_db = ConfigMap::new();
        overlay_db.insert("host".into(), "db1".into());
        let mut overlay = ConfigMap::new();
        overlay.insert("database".into(), overlay_db.into());
        overlay.insert("origins".into(), ConfigValue::Sequence(vec!["c".into()]));

        merge_maps(&mut base, overlay);

        assert_eq!(get_path(&base, "database.host").and_then(ConfigValue::as_str), Some("db1"));
        assert_eq!(get_path(&base, "database.port").and_then(ConfigValue::as_i64), Some(5432));
        assert_eq!(
            get_path(&base, "origins"),
            Some(&ConfigValue::Sequence(vec!["c".into()]))
        );
    }

    #[test]
    fn test_walk_leaves_paths() {
        let root = sample();
        let mut paths = Vec::new();
        walk_map(&root, "", &mut |path, _| paths.push(path.to_string()));
        assert_eq!(
            paths,
            vec!["database.host", "database.port", "origins[0]", "origins[1]"]
        );
    }

    #[test]
    fn test_nan_equals_itself() {
        assert_eq!(ConfigValue::Float(f64::NAN), ConfigValue::Float(f64::NAN));
        assert_ne!(ConfigValue::Float(1.5), ConfigValue::Float(2.5));
        assert_ne!(ConfigValue::Float(1.0), ConfigValue::Integer(1));
    }

    #[test]
    fn test_serialize_untagged() {
        let root = sample();
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["database"]["port"], 5432);
        assert_eq!(json["origins"][1], "b");
    }
}
