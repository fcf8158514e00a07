//! The layered configuration store

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::env::{resolve_environment, EnvSource, ProcessEnv};
use crate::source::{flatten_env, load_file, normalize_key};

const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_FILE: &str = "default.json";

/// Merged view over the default file, the environment-specific file and the
/// process environment variables, keyed by normalized key.
///
/// Built once by [`ConfigStoreBuilder::load`]; later layers win on collision.
/// Lookups and writes normalize their key the same way ingestion does, so any
/// spelling that collapses to the same normalized key addresses the same
/// entry.
pub struct ConfigStore {
    environment: Option<String>,
    properties: Map<String, Value>,
}

impl ConfigStore {
    /// Start building a store with default settings.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Build a store from `./config` and the live process environment.
    pub fn load() -> Self {
        Self::builder().load()
    }

    /// The environment name this store was built for, explicit or resolved
    /// from the environment variables.
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Look up a property by key. `None` means no layer provided the key.
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(&normalize_key(key))
    }

    /// Write or overwrite a property under the normalized key.
    pub fn set_property(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(normalize_key(key), value.into());
    }
}

/// Builder for [`ConfigStore`].
///
/// The defaults reproduce the stock behavior: properties files under
/// `./config`, environment name resolved from the process environment. The
/// setters exist so embedders and tests can redirect either without touching
/// global state.
pub struct ConfigStoreBuilder {
    environment: Option<String>,
    config_dir: PathBuf,
    env: Box<dyn EnvSource>,
}

impl ConfigStoreBuilder {
    fn new() -> Self {
        Self {
            environment: None,
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            env: Box::new(ProcessEnv),
        }
    }

    /// Set the environment name instead of resolving it from variables.
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Set the directory holding `default.json` and `<env>.json`.
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// Set the environment-variable source consulted for name resolution and
    /// ingested as the highest-precedence layer.
    pub fn env_source(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Load and merge the three layers. Never fails: unusable files degrade
    /// to empty layers and are only reported through tracing.
    pub fn load(self) -> ConfigStore {
        let environment = self
            .environment
            .or_else(|| resolve_environment(self.env.as_ref()));

        let mut properties = Map::new();

        apply_file_layer(&mut properties, &self.config_dir.join(DEFAULT_FILE));
        if let Some(name) = &environment {
            apply_file_layer(&mut properties, &self.config_dir.join(format!("{name}.json")));
        }

        tracing::debug!("applying properties from process environment variables");
        for (key, value) in flatten_env(self.env.as_ref()) {
            properties.insert(key, value);
        }

        ConfigStore {
            environment,
            properties,
        }
    }
}

/// Merge one properties file into the store, overwriting earlier layers.
/// Missing and unusable files contribute nothing.
fn apply_file_layer(properties: &mut Map<String, Value>, path: &Path) {
    match load_file(path) {
        Ok(layer) => {
            tracing::debug!("applied properties from file {}", path.display());
            for (key, value) in layer {
                properties.insert(key, value);
            }
        }
        Err(err) if err.is_not_found() => {
            tracing::debug!("no properties file at {}", path.display());
        }
        Err(err) => {
            tracing::warn!("skipping properties file {}: {err}", path.display());
        }
    }
}
