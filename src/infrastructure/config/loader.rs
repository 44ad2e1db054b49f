use std::path::{Path, PathBuf};

use serde_yaml::Value as YamlValue;
use tracing::{debug, info};

use crate::domain::models::{
    ConfigMap, ConfigValue, Environment, OverrideRule, RawDocument, ResolvedSettings,
};
use crate::domain::{ConfigError, ConfigResult};
use crate::services::{apply_overrides, substitute, validate};

/// Environment variable naming the configuration file explicitly
pub const CONFIG_FILE_VAR: &str = "YOSAI_CONFIG_FILE";
/// Environment variable selecting a per-environment configuration file
pub const ENVIRONMENT_VAR: &str = "YOSAI_ENV";

/// Configuration loader
///
/// Pipeline (each step short-circuits on failure):
/// 1. Read and parse the YAML file (plus any overlays, deep-merged in order)
/// 2. Substitute `${VAR}` / `${VAR:default}` placeholders
/// 3. Apply the environment override rules
/// 4. Validate, coerce and freeze into [`ResolvedSettings`]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read and parse a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<RawDocument> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let doc = Self::parse_str(path, &content)?;
        debug!(path = %path.display(), sections = doc.root().len(), "configuration file parsed");
        Ok(doc)
    }

    /// Parse YAML text as if it had been read from `path`.
    pub fn parse_str(path: impl AsRef<Path>, content: &str) -> ConfigResult<RawDocument> {
        let path = path.as_ref();
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let value: YamlValue =
            serde_yaml::from_str(content).map_err(|err| parse_error(err.to_string()))?;

        let root = match untag(value) {
            YamlValue::Null => ConfigMap::new(),
            YamlValue::Mapping(mapping) => convert_mapping(mapping).map_err(parse_error)?,
            other => {
                return Err(parse_error(format!(
                    "top level must be a mapping, found {}",
                    yaml_kind(&other)
                )))
            }
        };

        Ok(RawDocument::new(path, root))
    }

    /// Full pipeline for a single file.
    pub fn resolve(
        path: impl AsRef<Path>,
        env: &Environment,
        rules: &[OverrideRule],
    ) -> ConfigResult<ResolvedSettings> {
        Self::resolve_layered(path, &[], env, rules)
    }

    /// Full pipeline with overlay files deep-merged over the base before
    /// substitution.
    pub fn resolve_layered(
        path: impl AsRef<Path>,
        overlays: &[PathBuf],
        env: &Environment,
        rules: &[OverrideRule],
    ) -> ConfigResult<ResolvedSettings> {
        let mut doc = Self::load(path)?;
        for overlay in overlays {
            doc.merge(Self::load(overlay)?);
        }

        let doc = substitute(doc, env)?;
        let doc = apply_overrides(doc, env, rules);
        let settings = validate(doc)?;

        info!(
            source = %settings.source().display(),
            overlays = overlays.len(),
            environment = %settings.app().environment,
            "configuration resolved"
        );
        Ok(settings)
    }

    /// Pick the configuration file when none was given explicitly.
    ///
    /// `YOSAI_CONFIG_FILE` wins; otherwise `YOSAI_ENV` selects
    /// `config/<env>.yaml` for production, staging and test, and anything
    /// else falls back to `config/config.yaml`. Relative results are joined
    /// onto `base_dir`.
    pub fn discover_path(env: &Environment, base_dir: &Path) -> PathBuf {
        if let Some(explicit) = env.get(CONFIG_FILE_VAR).filter(|p| !p.is_empty()) {
            return base_dir.join(explicit);
        }

        let file = match env
            .get(ENVIRONMENT_VAR)
            .map(|e| e.trim().to_lowercase())
            .as_deref()
        {
            Some("production") => "production.yaml",
            Some("staging") => "staging.yaml",
            Some("test") => "test.yaml",
            _ => "config.yaml",
        };
        base_dir.join("config").join(file)
    }
}

fn untag(value: YamlValue) -> YamlValue {
    match value {
        YamlValue::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

const fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

fn convert_mapping(mapping: serde_yaml::Mapping) -> Result<ConfigMap, String> {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let key = match untag(key) {
                YamlValue::String(s) => s,
                YamlValue::Bool(b) => b.to_string(),
                YamlValue::Number(n) => n.to_string(),
                other => return Err(format!("unsupported {} mapping key", yaml_kind(&other))),
            };
            convert_value(value).map(|value| (key, value))
        })
        .collect()
}

fn convert_value(value: YamlValue) -> Result<ConfigValue, String> {
    Ok(match value {
        YamlValue::Tagged(tagged) => convert_value(tagged.value)?,
        YamlValue::Null => ConfigValue::Null,
        YamlValue::Bool(b) => ConfigValue::Bool(b),
        YamlValue::Number(n) => match n.as_i64() {
            Some(i) => ConfigValue::Integer(i),
            None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        YamlValue::String(s) => ConfigValue::String(s),
        YamlValue::Sequence(items) => ConfigValue::Sequence(
            items
                .into_iter()
                .map(convert_value)
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => ConfigValue::Mapping(convert_mapping(mapping)?),
    })
}

/// Where the active configuration comes from: a base file plus overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Base configuration file
    pub path: PathBuf,
    /// Overlay files, merged in order over the base
    pub overlays: Vec<PathBuf>,
}

impl ConfigSource {
    /// Build a source from an explicit path, or discover one.
    pub fn discover(
        explicit: Option<PathBuf>,
        overlays: Vec<PathBuf>,
        env: &Environment,
        base_dir: &Path,
    ) -> Self {
        let path = explicit.unwrap_or_else(|| ConfigLoader::discover_path(env, base_dir));
        Self { path, overlays }
    }

    /// Every file that contributes to the configuration, base first.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.path.as_path()).chain(self.overlays.iter().map(PathBuf::as_path))
    }

    /// Run the full pipeline over this source.
    pub fn resolve(
        &self,
        env: &Environment,
        rules: &[OverrideRule],
    ) -> ConfigResult<ResolvedSettings> {
        ConfigLoader::resolve_layered(&self.path, &self.overlays, env, rules)
    }
}
