use std::collections::BTreeMap;

/// Immutable snapshot of environment variables.
///
/// Resolution always reads from a snapshot so that two resolutions against
/// the same snapshot are guaranteed to agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment. Variables whose name or
    /// value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Value of `name`, if set. An empty string counts as set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether `name` is set
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Builder-style insert, mostly for tests and embedding
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
