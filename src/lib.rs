//! confstack: layered application configuration
//!
//! Merges three sources in increasing precedence — `./config/default.json`,
//! `./config/<env>.json`, the process environment variables — into one flat
//! map, then serves lookups and writes on it. Keys are normalized (`.` and
//! `_` stripped, lowercased) both when sources are ingested and when keys are
//! looked up, so `"DB.HOST"`, `"db_host"` and `"dbhost"` are the same key.
//!
//! ```no_run
//! use confstack::ConfigStore;
//!
//! let store = ConfigStore::builder().environment("stage").load();
//! if let Some(user) = store.get_property("user") {
//!     println!("{user}");
//! }
//! ```

mod env;
mod error;
mod source;
mod store;

pub use env::{EnvSource, ProcessEnv, SnapshotEnv};
pub use error::SourceError;
pub use source::normalize_key;
pub use store::{ConfigStore, ConfigStoreBuilder};
