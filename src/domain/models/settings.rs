use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::config::{
    AnalyticsSettings, AppSettings, CacheSettings, DatabaseSettings, LoggingSettings,
    MonitoringSettings, SecuritySettings,
};
use super::value::{get_path, merge_maps, ConfigMap, ConfigValue};

/// Settings for a single plugin under the `plugins` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginSettings {
    /// Whether the plugin should be loaded
    pub enabled: bool,
    /// Everything else under the plugin's key
    pub settings: ConfigMap,
}

impl PluginSettings {
    /// Deep-merge the plugin's YAML settings over `defaults`.
    pub fn merged_with(&self, mut defaults: ConfigMap) -> ConfigMap {
        merge_maps(&mut defaults, self.settings.clone());
        defaults
    }
}

/// The final, read-only configuration.
///
/// Built once by validation and never mutated afterwards; share it by
/// reference or behind an `Arc`. Hot reload replaces the whole value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    source: PathBuf,
    tree: ConfigMap,
    app: AppSettings,
    database: DatabaseSettings,
    cache: CacheSettings,
    security: SecuritySettings,
    analytics: AnalyticsSettings,
    monitoring: MonitoringSettings,
    logging: LoggingSettings,
    plugins: BTreeMap<String, PluginSettings>,
}

/// Typed views extracted from a validated tree.
#[derive(Debug, Clone, Default)]
pub struct SettingsSections {
    /// `app`
    pub app: AppSettings,
    /// `database`
    pub database: DatabaseSettings,
    /// `cache`
    pub cache: CacheSettings,
    /// `security`
    pub security: SecuritySettings,
    /// `analytics`
    pub analytics: AnalyticsSettings,
    /// `monitoring`
    pub monitoring: MonitoringSettings,
    /// `logging`
    pub logging: LoggingSettings,
    /// `plugins`
    pub plugins: BTreeMap<String, PluginSettings>,
}

impl ResolvedSettings {
    /// Freeze a validated tree and its typed views.
    pub(crate) fn new(source: PathBuf, tree: ConfigMap, sections: SettingsSections) -> Self {
        Self {
            source,
            tree,
            app: sections.app,
            database: sections.database,
            cache: sections.cache,
            security: sections.security,
            analytics: sections.analytics,
            monitoring: sections.monitoring,
            logging: sections.logging,
            plugins: sections.plugins,
        }
    }

    /// File the settings were resolved from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The full resolved tree, including keys without a typed view
    pub const fn tree(&self) -> &ConfigMap {
        &self.tree
    }

    /// Look up any value by dotted path
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        get_path(&self.tree, path)
    }

    /// `app` section
    pub const fn app(&self) -> &AppSettings {
        &self.app
    }

    /// `database` section
    pub const fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    /// `cache` section
    pub const fn cache(&self) -> &CacheSettings {
        &self.cache
    }

    /// `security` section
    pub const fn security(&self) -> &SecuritySettings {
        &self.security
    }

    /// `analytics` section
    pub const fn analytics(&self) -> &AnalyticsSettings {
        &self.analytics
    }

    /// `monitoring` section
    pub const fn monitoring(&self) -> &MonitoringSettings {
        &self.monitoring
    }

    /// `logging` section
    pub const fn logging(&self) -> &LoggingSettings {
        &self.logging
    }

    /// All configured plugins by name
    pub const fn plugins(&self) -> &BTreeMap<String, PluginSettings> {
        &self.plugins
    }

    /// A single plugin's settings
    pub fn plugin(&self, name: &str) -> Option<&PluginSettings> {
        self.plugins.get(name)
    }

    /// Names of plugins whose `enabled` flag is set
    pub fn enabled_plugins(&self) -> Vec<&str> {
        self.plugins
            .iter()
            .filter(|(_, plugin)| plugin.enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Settings for `name` merged over the plugin's own defaults. A plugin
    /// missing from the file gets its defaults unchanged.
    pub fn plugin_settings(&self, name: &str, defaults: ConfigMap) -> ConfigMap {
        match self.plugins.get(name) {
            Some(plugin) => plugin.merged_with(defaults),
            None => defaults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(enabled: bool, settings: &[(&str, ConfigValue)]) -> PluginSettings {
        PluginSettings {
            enabled,
            settings: settings
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_plugin_settings_merge_over_defaults() {
        let mut sections = SettingsSections::default();
        sections.plugins.insert(
            "file_upload".to_string(),
            plugin(true, &[("max_rows", ConfigValue::Integer(500))]),
        );
        let settings = ResolvedSettings::new(PathBuf::from("c.yaml"), ConfigMap::new(), sections);

        let mut defaults = ConfigMap::new();
        defaults.insert("max_rows".into(), ConfigValue::Integer(100));
        defaults.insert("chunk_size".into(), ConfigValue::Integer(10));

        let merged = settings.plugin_settings("file_upload", defaults.clone());
        assert_eq!(merged.get("max_rows"), Some(&ConfigValue::Integer(500)));
        assert_eq!(merged.get("chunk_size"), Some(&ConfigValue::Integer(10)));

        assert_eq!(settings.plugin_settings("unknown", defaults.clone()), defaults);
    }

    #[test]
    fn test_enabled_plugins() {
        let mut sections = SettingsSections::default();
        sections.plugins.insert("a".into(), plugin(true, &[]));
        sections.plugins.insert("b".into(), plugin(false, &[]));
        let settings = ResolvedSettings::new(PathBuf::from("c.yaml"), ConfigMap::new(), sections);
        assert_eq!(settings.enabled_plugins(), vec!["a"]);
    }
}
