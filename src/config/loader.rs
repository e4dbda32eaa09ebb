//! Config file loading

use crate::config::ConfigStore;
use crate::value::Value;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// A TOML or YAML document served as a dotted-path key-value store.
///
/// `get("db.host")` walks nested tables; leaf scalars and string arrays map
/// onto the value model, anything else reads as absent.
pub struct FileStore {
    root: serde_json::Value,
}

impl FileStore {
    /// Load a document the caller explicitly named; parse failures are hard
    /// errors.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config file: {}", path.display()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

        let root = match ext.as_str() {
            "toml" => parse_toml(&content, path)?,
            "yaml" | "yml" => parse_yaml(&content, path)?,
            other => anyhow::bail!(
                "Unsupported config extension '.{}' for file {}",
                other,
                path.display()
            ),
        };

        tracing::debug!(path = %path.display(), "loaded config store");
        Ok(Self { root })
    }

    /// Load an optional document: a missing or malformed file warns and
    /// behaves as an empty store.
    pub fn load_optional(path: &Path) -> Self {
        if !path.exists() {
            return Self::empty();
        }
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Failed to load optional config {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    pub fn empty() -> Self {
        Self { root: serde_json::Value::Null }
    }

    fn lookup(&self, key: &str) -> Option<&serde_json::Value> {
        let mut node = &self.root;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        Some(node)
    }
}

impl ConfigStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.lookup(key).and_then(Value::from_json)
    }
}

fn parse_toml(content: &str, path: &Path) -> Result<serde_json::Value> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", path.display()))?;
    serde_json::to_value(raw).with_context(|| format!("Invalid TOML config: {}", path.display()))
}

fn parse_yaml(content: &str, path: &Path) -> Result<serde_json::Value> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", path.display()))?;
    serde_json::to_value(raw).with_context(|| format!("Invalid YAML config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::config::ConfigStore;
    use crate::value::Value;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn toml_store_serves_dotted_lookups() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.toml");
        fs::write(&path, "[db]\nhost = 'db.local'\nport = 5432\nreplicas = ['a', 'b']\n")
            .expect("write");

        let store = FileStore::load(&path).expect("store");
        assert_eq!(store.get("db.host"), Some(Value::Str("db.local".into())));
        assert_eq!(store.get("db.port"), Some(Value::Int(5432)));
        assert_eq!(store.get("db.replicas"), Some(Value::List(vec!["a".into(), "b".into()])));
        assert_eq!(store.get("db.missing"), None);
        assert_eq!(store.get("db"), None, "tables are not leaf values");
    }

    #[test]
    fn yaml_store_serves_dotted_lookups() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("app.yaml");
        fs::write(&path, "db:\n  host: db.local\n  tls: true\n").expect("write");

        let store = FileStore::load(&path).expect("store");
        assert_eq!(store.get("db.host"), Some(Value::Str("db.local".into())));
        assert_eq!(store.get("db.tls"), Some(Value::Bool(true)));
    }

    #[test]
    fn explicit_load_fails_on_bad_syntax() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "not = [valid\n").expect("write");
        assert!(FileStore::load(&path).is_err());
    }

    #[test]
    fn explicit_load_fails_on_unknown_extension() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("conf.ini");
        fs::write(&path, "k = v\n").expect("write");
        assert!(FileStore::load(&path).is_err());
    }

    #[test]
    fn optional_load_soft_fails_to_empty() {
        let tmp = TempDir::new().expect("tmp");
        let missing = FileStore::load_optional(&tmp.path().join("absent.toml"));
        assert_eq!(missing.get("any"), None);

        let path = tmp.path().join("bad.toml");
        fs::write(&path, "not = [valid\n").expect("write");
        let malformed = FileStore::load_optional(&path);
        assert_eq!(malformed.get("any"), None);
    }
}
