//! Source loading and flattening
//!
//! Every layer ends up as a flat map from normalized key to JSON value. File
//! layers are walked depth-first; the process environment is already flat.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::env::EnvSource;
use crate::error::SourceError;

/// Normalize a property key: strip every `.` and `_`, lowercase the rest.
///
/// Applied identically when a source is ingested and when a key is looked up,
/// so `"DB.HOST"`, `"db_host"` and `"dbhost"` all address the same entry.
/// Idempotent: normalizing a normalized key returns it unchanged.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '.' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Load one JSON properties file as a flattened layer.
///
/// The caller decides what a failure means; the store treats every variant as
/// an empty layer.
pub(crate) fn load_file(path: &Path) -> Result<Map<String, Value>, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tree: Value = serde_json::from_str(&content).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match tree {
        Value::Object(object) => {
            let mut layer = Map::new();
            flatten_object(&object, "", &mut layer);
            Ok(layer)
        }
        _ => Err(SourceError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Flatten the full variable set of an environment source.
///
/// Variable names are a single path segment, so they only pass through
/// normalization; values are kept as JSON strings.
pub(crate) fn flatten_env(env: &dyn EnvSource) -> Map<String, Value> {
    let mut layer = Map::new();
    for (name, value) in env.vars() {
        layer.insert(normalize_key(&name), Value::String(value));
    }
    layer
}

/// Walk a source tree depth-first and record each leaf under its normalized
/// dot-joined path.
///
/// Only objects are recursed into; arrays, null and scalars are leaves. Keys
/// are visited in enumeration order, so when two leaves collide after
/// normalization the later one wins.
fn flatten_object(object: &Map<String, Value>, prefix: &str, out: &mut Map<String, Value>) {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Object(nested) => flatten_object(nested, &path, out),
            leaf => {
                out.insert(normalize_key(&path), leaf.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn flatten(tree: Value) -> Map<String, Value> {
        let Value::Object(object) = tree else {
            panic!("test tree must be an object");
        };
        let mut out = Map::new();
        flatten_object(&object, "", &mut out);
        out
    }

    #[test]
    fn normalize_strips_separators_and_lowercases() {
        assert_eq!(normalize_key("DB.HOST"), "dbhost");
        assert_eq!(normalize_key("db_host"), "dbhost");
        assert_eq!(normalize_key("dbhost"), "dbhost");
        assert_eq!(normalize_key("Straße.Name"), "straßename");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_key("A.Deeply_Nested.KEY");
        assert_eq!(normalize_key(&once), once);
    }

    #[test]
    fn nested_objects_flatten_to_dot_paths() {
        let layer = flatten(json!({"db": {"host": "x", "port": 5432}}));
        assert_eq!(layer.get("dbhost"), Some(&json!("x")));
        assert_eq!(layer.get("dbport"), Some(&json!(5432)));
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn arrays_are_leaves() {
        let layer = flatten(json!({"tags": ["a", "b"]}));
        assert_eq!(layer.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn null_and_bool_leaves_keep_their_types() {
        let layer = flatten(json!({"feature": {"enabled": true, "extra": null}}));
        assert_eq!(layer.get("featureenabled"), Some(&json!(true)));
        assert_eq!(layer.get("featureextra"), Some(&Value::Null));
    }

    #[test]
    fn colliding_keys_resolve_to_the_later_entry() {
        // "a.b" and "a_b" both normalize to "ab"; document order decides.
        let layer = flatten(json!({"a": {"b": 1}, "a_b": 2}));
        assert_eq!(layer.get("ab"), Some(&json!(2)));
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn load_file_flattens_a_json_object() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("default.json");
        fs::write(&path, r#"{"user": "admin", "db": {"port": 1}}"#).expect("write");

        let layer = load_file(&path).expect("layer");
        assert_eq!(layer.get("user"), Some(&json!("admin")));
        assert_eq!(layer.get("dbport"), Some(&json!(1)));
    }

    #[test]
    fn load_file_reports_missing_files_as_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_file(&tmp.path().join("absent.json")).expect_err("missing file");
        assert!(err.is_not_found());
    }

    #[test]
    fn load_file_rejects_non_object_roots() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("default.json");
        fs::write(&path, "[1, 2, 3]").expect("write");

        let err = load_file(&path).expect_err("array root");
        assert!(matches!(err, SourceError::NotAnObject { .. }));
        assert!(!err.is_not_found());
    }
}
