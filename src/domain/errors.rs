//! Configuration errors.
//!
//! Every variant is fatal at startup and names the file it concerns, so an
//! operator can go straight to the offending YAML or environment variable.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A leaf that still carries an unresolved placeholder after substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedKey {
    /// Dotted path of the leaf
    pub key: String,
    /// Environment variables that were missing
    pub missing: Vec<String>,
}

impl fmt::Display for UnresolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (missing {})", self.key, self.missing.join(", "))
    }
}

/// A known field whose value could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMismatch {
    /// Dotted path of the field
    pub key: String,
    /// What the field should hold
    pub expected: String,
    /// What it actually held
    pub found: String,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, found {}", self.key, self.expected, self.found)
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Malformed placeholder at {key} in {}: {reason}", path.display())]
    MalformedPlaceholder {
        path: PathBuf,
        key: String,
        reason: String,
    },

    #[error("Unresolved placeholders in {}: {}", path.display(), join(keys))]
    UnresolvedPlaceholder {
        path: PathBuf,
        keys: Vec<UnresolvedKey>,
    },

    #[error("Type mismatch in {}: {}", path.display(), join(mismatches))]
    TypeMismatch {
        path: PathBuf,
        mismatches: Vec<FieldMismatch>,
    },

    #[error("Insecure production configuration in {}: {}", path.display(), problems.join("; "))]
    InsecureConfiguration { path: PathBuf, problems: Vec<String> },
}

impl ConfigError {
    /// Stable name of the error kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "ConfigNotFound",
            Self::Read { .. } => "ConfigReadError",
            Self::Parse { .. } => "ConfigParseError",
            Self::MalformedPlaceholder { .. } => "MalformedPlaceholder",
            Self::UnresolvedPlaceholder { .. } => "UnresolvedPlaceholder",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::InsecureConfiguration { .. } => "InsecureConfiguration",
        }
    }

    /// File the error concerns
    pub const fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::MalformedPlaceholder { path, .. }
            | Self::UnresolvedPlaceholder { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::InsecureConfiguration { path, .. } => path,
        }
    }

    /// Settings keys implicated in the error, if any
    pub fn keys(&self) -> Vec<String> {
        match self {
            Self::MalformedPlaceholder { key, .. } => vec![key.clone()],
            Self::UnresolvedPlaceholder { keys, .. } => keys.iter().map(|k| k.key.clone()).collect(),
            Self::TypeMismatch { mismatches, .. } => {
                mismatches.iter().map(|m| m.key.clone()).collect()
            }
            _ => vec![],
        }
    }
}

/// Result alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
