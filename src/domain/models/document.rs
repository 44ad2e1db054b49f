use std::path::{Path, PathBuf};

use super::value::{get_path, merge_maps, set_path, ConfigMap, ConfigValue};

/// A parsed configuration document, before or during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    source: PathBuf,
    root: ConfigMap,
}

impl RawDocument {
    /// Wrap a parsed root mapping together with the file it came from.
    pub fn new(source: impl Into<PathBuf>, root: ConfigMap) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    /// Path of the file this document was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Root mapping
    pub const fn root(&self) -> &ConfigMap {
        &self.root
    }

    /// Mutable root mapping
    pub fn root_mut(&mut self) -> &mut ConfigMap {
        &mut self.root
    }

    /// Consume the document, returning its parts
    pub fn into_parts(self) -> (PathBuf, ConfigMap) {
        (self.source, self.root)
    }

    /// Look up a value by dotted path
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        get_path(&self.root, path)
    }

    /// Set a value by dotted path
    pub fn set(&mut self, path: &str, value: ConfigValue) {
        set_path(&mut self.root, path, value);
    }

    /// Deep-merge another document over this one. The source path stays the
    /// base document's.
    pub fn merge(&mut self, overlay: Self) {
        merge_maps(&mut self.root, overlay.root);
    }
}
