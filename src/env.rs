//! Environment-variable sources
//!
//! The store never reads `std::env` directly; it goes through an [`EnvSource`]
//! so tests can supply a snapshot instead of mutating the process environment.

/// Names checked, in priority order, to resolve the environment name when the
/// caller does not pass one explicitly.
const ENV_NAME_VARS: [&str; 4] = ["NODE.ENV", "node.env", "NODE_ENV", "node_env"];

/// A source of environment variables.
pub trait EnvSource {
    /// Get the value of a variable by name.
    fn get(&self, name: &str) -> Option<String>;

    /// Iterate over all variables in enumeration order.
    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_>;
}

/// Environment source backed by the live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(std::env::vars())
    }
}

/// An in-memory snapshot of environment variables.
///
/// Enumeration follows insertion order; setting an existing name replaces its
/// value in place.
#[derive(Debug, Clone, Default)]
pub struct SnapshotEnv {
    vars: Vec<(String, String)>,
}

impl SnapshotEnv {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot from an iterator of name-value pairs.
    pub fn from_pairs<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut snapshot = Self::new();
        for (name, value) in iter {
            snapshot.set(name, value);
        }
        snapshot
    }

    /// Set a variable, replacing any existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.vars.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.vars.push((name, value)),
        }
    }
}

impl EnvSource for SnapshotEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.clone())
    }

    fn vars(&self) -> Box<dyn Iterator<Item = (String, String)> + '_> {
        Box::new(self.vars.iter().cloned())
    }
}

/// Resolve the environment name from the four accepted variable spellings,
/// first defined wins.
pub(crate) fn resolve_environment(env: &dyn EnvSource) -> Option<String> {
    ENV_NAME_VARS.iter().find_map(|name| env.get(name))
}
