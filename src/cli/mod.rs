//! CLI command definitions and terminal rendering.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use colored::Colorize;
use toml::Value;

use semrel::config::{EffectiveConfig, ManifestOutcome};

/// Render the configuration as an aligned `key = value` listing.
///
/// Keys that differ from the built-in defaults are highlighted.
pub fn render_config(config: &EffectiveConfig, outcome: Option<&ManifestOutcome>) -> String {
    let defaults = semrel::config::defaults();
    let width = config.keys().map(str::len).max().unwrap_or(0);
    let mut out = String::new();

    if let Some(outcome) = outcome {
        out.push_str(&format!("  {} {}\n\n", "pyproject.toml:".dimmed(), outcome));
    }

    for (key, value) in config.iter() {
        let rendered = render_value(value);
        let line = if defaults.get(key) == Some(value) {
            format!("  {key:<width$}  {}", rendered.dimmed())
        } else {
            format!("  {}  {}", format!("{key:<width$}").cyan().bold(), rendered)
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Convert the configuration to JSON, rendering TOML datetimes as strings.
pub fn config_to_json(config: &EffectiveConfig) -> serde_json::Value {
    serde_json::Value::Object(
        config
            .iter()
            .map(|(key, value)| (key.to_string(), value_to_json(value)))
            .collect(),
    )
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Value::from(*f),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "\"\"".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
