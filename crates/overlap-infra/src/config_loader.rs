//! Layered configuration loading
//!
//! A base file (YAML, JSON or TOML, picked by extension) is merged with an
//! optional override file of any of those formats, then individual keys are
//! replaced from environment variables. Keys are case-insensitive: every map
//! key is lowercased before merging.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use overlap_types::ConfigError;

/// Dotted key path (`server.port`) to environment variable name
pub type EnvBindings = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    override_path: Option<PathBuf>,
    env_bindings: Vec<EnvBindings>,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            override_path: None,
            env_bindings: Vec::new(),
        }
    }

    /// Merge another file over the base. An empty path is ignored.
    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.as_os_str().is_empty() {
            self.override_path = Some(path);
        }
        self
    }

    /// Add a set of bindings; later sets win over earlier ones.
    pub fn with_env_bindings(mut self, bindings: EnvBindings) -> Self {
        self.env_bindings.push(bindings);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load, merge and deserialize into `T`
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let merged = self.load_value()?;
        serde_json::from_value(merged).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load and merge without deserializing
    pub fn load_value(&self) -> Result<Value, ConfigError> {
        let mut merged = read_config_file(&self.path)?;

        if let Some(ref override_path) = self.override_path {
            let overrides = read_config_file(override_path)?;
            merge_values(&mut merged, overrides);
        }

        for bindings in &self.env_bindings {
            apply_env_bindings(&mut merged, bindings, |name| std::env::var(name).ok());
        }

        Ok(merged)
    }
}

fn read_config_file(path: &Path) -> Result<Value, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let content =
        fs::read_to_string(path).map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let value = match extension.as_str() {
        "yml" | "yaml" => parse_yaml(&content),
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        "toml" => toml::from_str::<toml::Value>(&content)
            .map_err(|e| e.to_string())
            .and_then(|v| serde_json::to_value(v).map_err(|e| e.to_string())),
        _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
    .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

    Ok(lowercase_keys(value))
}

fn parse_yaml(content: &str) -> Result<Value, String> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    // an empty document parses as null
    Ok(if value.is_null() {
        Value::Object(Map::new())
    } else {
        value
    })
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Maps merge key by key; anything else is replaced.
fn merge_values(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

fn apply_env_bindings<F>(root: &mut Value, bindings: &EnvBindings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for (key_path, env_name) in bindings {
        if env_name.is_empty() {
            continue;
        }
        let raw = match lookup(env_name) {
            Some(raw) if !raw.is_empty() => raw,
            _ => continue,
        };
        let key_path = key_path.to_lowercase();
        let segments: Vec<&str> = key_path.split('.').collect();
        set_path(root, &segments, scalar_from_env(&raw));
    }
}

/// Type an environment string the way a YAML scalar would be typed.
/// Numbers whose text would change (`007`, `1e3`) stay strings.
fn scalar_from_env(raw: &str) -> Value {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value @ Value::Bool(_)) => value,
        Ok(Value::Number(n)) if n.to_string() == raw => Value::Number(n),
        _ => Value::String(raw.to_string()),
    }
}

/// `deserialize_with` helper for string fields that may be set from the
/// environment, where `1234` has already been typed as a number.
pub fn string_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!("expected a string, found {}", other))),
    }
}

fn set_path(root: &mut Value, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *root = value;
        return;
    };
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    if let Value::Object(map) = root {
        let child = map.entry(first.to_string()).or_insert(Value::Null);
        set_path(child, rest, value);
    }
}
