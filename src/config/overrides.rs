//! `key=value` overrides applied on top of the manifest.

use toml::Value;

use super::EffectiveConfig;

/// Apply `key=value` definitions to `config`, last one wins.
///
/// The pair is split on the first `=`, so values may themselves contain
/// `=`. Malformed entries are skipped with a warning. Returns the number
/// of definitions applied.
pub fn apply_defines<S: AsRef<str>>(config: &mut EffectiveConfig, defines: &[S]) -> usize {
    let mut applied = 0;
    for define in defines {
        let define = define.as_ref();
        match define.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                config.set(key.trim(), coerce(value));
                applied += 1;
            }
            _ => tracing::warn!("Ignoring malformed definition '{define}': expected key=value"),
        }
    }
    applied
}

/// Interpret a command-line value the way the manifest would have.
fn coerce(raw: &str) -> Value {
    match raw {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => match raw.parse::<i64>() {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::String(raw.to_string()),
        },
    }
}
