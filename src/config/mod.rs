//! Effective configuration: defaults layered with the project manifest
//! and explicit overrides.
//!
//! Priority (highest to lowest):
//! 1. `--define key=value` overrides
//! 2. `[tool.semantic_release]` in `<cwd>/pyproject.toml`
//! 3. Built-in defaults

pub mod credentials;
pub mod defaults;
pub mod loader;
pub mod overrides;

use indexmap::IndexMap;
use serde::Serialize;
use toml::Value;

pub use credentials::Credentials;
pub use defaults::defaults;
pub use loader::{LoadedConfig, ManifestOutcome, load_config, load_config_from};
pub use overrides::apply_defines;

/// Flat, insertion-ordered settings map.
///
/// Keys from the defaults table keep their position when overridden;
/// keys introduced by the manifest are appended in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EffectiveConfig {
    values: IndexMap<String, Value>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        defaults().clone()
    }
}

impl EffectiveConfig {
    /// Build a config from raw entries, without consulting the defaults.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value of `key`, or `None` when missing or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Boolean value of `key`.
    ///
    /// Accepts TOML booleans and the usual string spellings
    /// (`true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`).
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Boolean(b) => Some(*b),
            Value::Integer(i) => Some(*i != 0),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Integer(i) => Some(*i),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// List value of `key`: a TOML array of strings or a comma-separated string.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            Value::String(s) => Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Insert or replace a setting. Returns the previous value, if any.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as a flat TOML document.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&self.values)
    }
}
