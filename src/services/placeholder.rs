//! `${NAME}` / `${NAME:default}` substitution over string leaves.
//!
//! The grammar is flat: a placeholder body may not contain another `${`.
//! A `$` that is not followed by `{` is ordinary text.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::domain::models::value::join_path;
use crate::domain::models::{ConfigMap, ConfigValue, Environment, RawDocument, Unresolved};
use crate::domain::{ConfigError, ConfigResult};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Reasons a string cannot be scanned for placeholders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("unterminated placeholder starting at byte {0}")]
    Unterminated(usize),

    #[error("nested placeholder starting at byte {0}")]
    Nested(usize),

    #[error("invalid variable name {0:?}")]
    InvalidName(String),
}

/// A piece of a scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim
    Literal(&'a str),
    /// A placeholder and its optional default
    Placeholder {
        /// Variable name
        name: &'a str,
        /// Text after the first `:`, possibly empty
        default: Option<&'a str>,
    },
}

/// Split `input` into literal text and placeholders.
pub fn scan(input: &str) -> Result<Vec<Segment<'_>>, PlaceholderError> {
    let mut segments = Vec::new();
    let mut rest = input;
    let mut offset = 0;

    while let Some(start) = rest.find("${") {
        if start > 0 {
            segments.push(Segment::Literal(&rest[..start]));
        }
        let body_start = start + 2;
        let after = &rest[body_start..];
        let end = after
            .find('}')
            .ok_or(PlaceholderError::Unterminated(offset + start))?;
        let body = &after[..end];
        if body.contains("${") {
            return Err(PlaceholderError::Nested(offset + start));
        }

        let (name, default) = match body.split_once(':') {
            Some((name, default)) => (name, Some(default)),
            None => (body, None),
        };
        if !NAME_PATTERN.is_match(name) {
            return Err(PlaceholderError::InvalidName(name.to_string()));
        }
        segments.push(Segment::Placeholder { name, default });

        let consumed = body_start + end + 1;
        offset += consumed;
        rest = &rest[consumed..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    Ok(segments)
}

/// Resolve the placeholders of a single string.
///
/// Returns the substituted string, or [`ConfigValue::Unresolved`] when at
/// least one placeholder has neither an environment value nor a default.
pub fn substitute_str(template: &str, env: &Environment) -> Result<ConfigValue, PlaceholderError> {
    let segments = scan(template)?;
    if !segments
        .iter()
        .any(|segment| matches!(segment, Segment::Placeholder { .. }))
    {
        return Ok(ConfigValue::String(template.to_string()));
    }

    let mut output = String::with_capacity(template.len());
    let mut missing = Vec::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Placeholder { name, default } => match (env.get(name), default) {
                (Some(value), _) | (None, Some(value)) => output.push_str(value),
                (None, None) => missing.push(name.to_string()),
            },
        }
    }

    if missing.is_empty() {
        Ok(ConfigValue::String(output))
    } else {
        Ok(ConfigValue::Unresolved(Unresolved {
            template: template.to_string(),
            missing,
        }))
    }
}

/// Replace placeholders in every string leaf of `doc`.
///
/// Mapping keys are left alone and non-string leaves pass through unchanged.
pub fn substitute(doc: RawDocument, env: &Environment) -> ConfigResult<RawDocument> {
    let (source, root) = doc.into_parts();
    let root = substitute_map(root, "", env).map_err(|(key, err)| {
        ConfigError::MalformedPlaceholder {
            path: source.clone(),
            key,
            reason: err.to_string(),
        }
    })?;

    debug!(source = %source.display(), "placeholders substituted");
    Ok(RawDocument::new(source, root))
}

fn substitute_map(
    map: ConfigMap,
    prefix: &str,
    env: &Environment,
) -> Result<ConfigMap, (String, PlaceholderError)> {
    map.into_iter()
        .map(|(key, value)| {
            let path = join_path(prefix, &key);
            substitute_value(value, &path, env).map(|value| (key, value))
        })
        .collect()
}

fn substitute_value(
    value: ConfigValue,
    path: &str,
    env: &Environment,
) -> Result<ConfigValue, (String, PlaceholderError)> {
    match value {
        ConfigValue::String(template) => {
            substitute_str(&template, env).map_err(|err| (path.to_string(), err))
        }
        ConfigValue::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| substitute_value(item, &format!("{path}[{index}]"), env))
            .collect::<Result<Vec<_>, _>>()
            .map(ConfigValue::Sequence),
        ConfigValue::Mapping(map) => substitute_map(map, path, env).map(ConfigValue::Mapping),
        other => Ok(other),
    }
}
