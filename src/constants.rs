//! App-wide constants.
//!
//! Centralises the tool name, manifest location, parser identifiers,
//! and environment variable names so a rename only requires changing
//! this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "semrel";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project manifest looked up in the current working directory.
pub const MANIFEST_FILENAME: &str = "pyproject.toml";

/// Top-level manifest table that holds per-tool sections.
pub const MANIFEST_TOOL_TABLE: &str = "tool";

/// Namespaced table under `[tool]` consumed by the loader.
pub const TOOL_NAMESPACE: &str = "semantic_release";

/// Package whose version variable is tracked when nothing else is configured.
pub const DEFAULT_PACKAGE: &str = "semantic_release";

// ── Commit parser identifiers ───────────────────────────────────────

pub const ANGULAR_PARSER: &str = "semantic_release.history.angular_parser";
pub const EMOJI_PARSER: &str = "semantic_release.history.emoji_parser";
pub const TAG_PARSER: &str = "semantic_release.history.tag_parser";

/// Parser used when the configuration does not name one.
pub const DEFAULT_COMMIT_PARSER: &str = ANGULAR_PARSER;

// ── Environment variable names ──────────────────────────────────────

/// Log filter for the binary (`tracing_subscriber::EnvFilter` syntax).
pub const ENV_LOG: &str = "SEMREL_LOG";
