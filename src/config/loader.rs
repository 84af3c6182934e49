//! Manifest discovery and merging.
//!
//! The loader never fails: a missing manifest or a manifest without a
//! `[tool.semantic_release]` table is silently treated as "use the
//! defaults", and a manifest that cannot be read or decoded is reported
//! with a single warning and otherwise ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::EffectiveConfig;
use crate::constants::{MANIFEST_FILENAME, MANIFEST_TOOL_TABLE, TOOL_NAMESPACE};

/// What happened to the manifest during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    /// No manifest in the directory.
    NoManifest,
    /// Manifest decoded, but it has no `[tool.semantic_release]` table.
    NoToolTable,
    /// Manifest decoded and `keys` settings were merged.
    Merged { keys: usize },
    /// Manifest is not valid TOML; defaults were kept.
    Malformed { message: String },
    /// Manifest exists but could not be read; defaults were kept.
    Unreadable { message: String },
}

impl ManifestOutcome {
    /// Whether the manifest contributed any settings.
    pub fn is_merged(&self) -> bool {
        matches!(self, ManifestOutcome::Merged { .. })
    }
}

impl fmt::Display for ManifestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestOutcome::NoManifest => write!(f, "no {MANIFEST_FILENAME} found"),
            ManifestOutcome::NoToolTable => {
                write!(f, "no [{MANIFEST_TOOL_TABLE}.{TOOL_NAMESPACE}] table")
            }
            ManifestOutcome::Merged { keys } => write!(f, "merged {keys} setting(s)"),
            ManifestOutcome::Malformed { message } => write!(f, "ignored, could not decode: {message}"),
            ManifestOutcome::Unreadable { message } => write!(f, "ignored, could not read: {message}"),
        }
    }
}

/// A loaded configuration together with how the manifest was treated.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: EffectiveConfig,
    /// Manifest path that was consulted, whether or not it existed.
    pub manifest_path: PathBuf,
    pub outcome: ManifestOutcome,
}

/// Load the effective configuration for the current working directory.
///
/// The working directory is looked up on every call and the manifest is
/// re-read each time; nothing is cached between calls.
pub fn load_config() -> EffectiveConfig {
    match std::env::current_dir() {
        Ok(cwd) => load_config_from(&cwd).config,
        Err(e) => {
            tracing::warn!("Could not determine working directory: {e}");
            EffectiveConfig::default()
        }
    }
}

/// Load the effective configuration using `dir` as the project root.
pub fn load_config_from(dir: &Path) -> LoadedConfig {
    let manifest_path = dir.join(MANIFEST_FILENAME);
    let mut config = EffectiveConfig::default();
    let outcome = merge_manifest(&mut config, &manifest_path);
    tracing::debug!(path = %manifest_path.display(), %outcome, "loaded configuration");

    LoadedConfig {
        config,
        manifest_path,
        outcome,
    }
}

/// Merge the tool table of the manifest at `path` into `config`.
fn merge_manifest(config: &mut EffectiveConfig, path: &Path) -> ManifestOutcome {
    if !path.exists() {
        return ManifestOutcome::NoManifest;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Could not read {MANIFEST_FILENAME}: {e}");
            return ManifestOutcome::Unreadable {
                message: e.to_string(),
            };
        }
    };

    // Decode the whole document before touching `config` so a bad file
    // never leaves a partial merge behind.
    let document: Table = match toml::from_str(&content) {
        Ok(document) => document,
        Err(e) => {
            let message = describe_decode_error(&content, &e);
            tracing::warn!("Could not decode {MANIFEST_FILENAME}: {message}");
            return ManifestOutcome::Malformed { message };
        }
    };

    let Some(section) = document
        .get(MANIFEST_TOOL_TABLE)
        .and_then(|tool| tool.get(TOOL_NAMESPACE))
    else {
        return ManifestOutcome::NoToolTable;
    };

    let Value::Table(settings) = section else {
        tracing::warn!(
            "Ignoring [{MANIFEST_TOOL_TABLE}.{TOOL_NAMESPACE}] in {MANIFEST_FILENAME}: expected a table, found {}",
            section.type_str()
        );
        return ManifestOutcome::NoToolTable;
    };

    for (key, value) in settings {
        config.set(key.clone(), value.clone());
    }

    ManifestOutcome::Merged {
        keys: settings.len(),
    }
}

/// Render a decoder error as `<message> at line L col C`.
///
/// Falls back to the bare message when the decoder reports no location.
fn describe_decode_error(content: &str, err: &toml::de::Error) -> String {
    let message = err.message().trim_end();
    match err.span() {
        Some(span) => {
            let (line, col) = line_col(content, span.start);
            format!("{message} at line {line} col {col}")
        }
        None => message.to_string(),
    }
}

/// 1-based line and column of a byte offset.
fn line_col(content: &str, offset: usize) -> (usize, usize) {
    let before = content.get(..offset.min(content.len())).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
