//! Integration tests for loading the effective configuration from the
//! process working directory.
//!
//! Every test that changes the working directory runs under `#[serial]`
//! and restores the original directory through a guard, even on panic.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serial_test::serial;
use toml::Value;

use semrel::config::{self, EffectiveConfig};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/manifests");

/// Switch into a fresh temp dir; switch back on drop.
struct CwdGuard {
    original: PathBuf,
    dir: tempfile::TempDir,
}

impl CwdGuard {
    fn enter() -> Self {
        let original = std::env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        Self { original, dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy a fixture into the temp dir as `pyproject.toml`.
    fn install(&self, fixture: &str) {
        std::fs::copy(
            Path::new(FIXTURES).join(fixture),
            self.path().join("pyproject.toml"),
        )
        .unwrap();
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Run `f` with a subscriber that records every WARN message.
fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    use tracing_subscriber::layer::SubscriberExt;

    let collector = warning_layer::WarningCollector::default();
    let messages = std::sync::Arc::clone(&collector.messages);
    let subscriber = tracing_subscriber::registry().with(collector);

    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = messages.lock().unwrap().clone();
    (result, captured)
}

// ---------------------------------------------------------------------------
// defaults
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn defaults_without_manifest() {
    let _cwd = CwdGuard::enter();
    let config = config::load_config();

    assert_eq!(config.get_str("minor_tag"), Some(":sparkles:"));
    assert_eq!(config.get_str("fix_tag"), Some(":nut_and_bolt:"));
    assert_eq!(config.get_bool("patch_without_tag"), Some(false));
    assert_eq!(config.get_bool("major_on_zero"), Some(true));
    assert_eq!(config.get_bool("check_build_status"), Some(false));
    assert_eq!(config.get_str("hvcs"), Some("github"));
    assert_eq!(config.get_bool("upload_to_repository"), Some(true));
    assert_eq!(config.get_str("github_token_var"), Some("GH_TOKEN"));
    assert_eq!(config.get_str("gitea_token_var"), Some("GITEA_TOKEN"));
    assert_eq!(config.get_str("gitlab_token_var"), Some("GL_TOKEN"));
    assert_eq!(config.get_str("pypi_pass_var"), Some("PYPI_PASSWORD"));
    assert_eq!(config.get_str("pypi_token_var"), Some("PYPI_TOKEN"));
    assert_eq!(config.get_str("pypi_user_var"), Some("PYPI_USERNAME"));
    assert_eq!(config.get_str("repository_user_var"), Some("REPOSITORY_USERNAME"));
    assert_eq!(config.get_str("repository_pass_var"), Some("REPOSITORY_PASSWORD"));
    assert_eq!(
        config.get_str("version_variable"),
        Some("semantic_release/__init__.py:__version__")
    );
    assert_eq!(
        config.get_str("commit_parser"),
        Some("semantic_release.history.angular_parser")
    );
    assert_eq!(config, *config::defaults());
}

// ---------------------------------------------------------------------------
// manifest overrides
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn tool_table_overrides_defaults() {
    let cwd = CwdGuard::enter();
    cwd.install("override.toml");

    let config = config::load_config();
    assert_eq!(config.get_str("hvcs"), Some("github"));
    assert_eq!(config.get("upload_to_repository"), Some(&Value::Boolean(false)));
    assert_eq!(config.get_str("version_source"), Some("tag"));
    assert_eq!(config.get_str("foo"), Some("bar"));
    // [tool.foo] belongs to another tool
    assert!(!config.contains_key("bar"));
}

#[test]
#[serial]
fn unrelated_tables_only_yield_defaults() {
    let cwd = CwdGuard::enter();
    cwd.install("unrelated.toml");

    let (config, warnings) = capture_warnings(config::load_config);
    assert_eq!(config, EffectiveConfig::default());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
#[serial]
fn empty_manifest_yields_defaults() {
    let cwd = CwdGuard::enter();
    std::fs::write(cwd.path().join("pyproject.toml"), "").unwrap();

    assert_eq!(config::load_config(), EffectiveConfig::default());
}

// ---------------------------------------------------------------------------
// malformed manifests
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn malformed_manifest_warns_once_and_keeps_defaults() {
    let cwd = CwdGuard::enter();
    cwd.install("malformed.toml");

    let (config, warnings) = capture_warnings(config::load_config);

    assert_eq!(config.get_str("hvcs"), Some("github"));
    assert_eq!(config, EffectiveConfig::default());
    assert_eq!(warnings.len(), 1, "expected one warning, got {warnings:?}");
    assert!(
        warnings[0].starts_with("Could not decode pyproject.toml: "),
        "unexpected warning: {}",
        warnings[0]
    );
    assert!(warnings[0].contains("at line 1 col"), "missing location: {}", warnings[0]);
}

#[test]
#[serial]
fn missing_manifest_is_silent() {
    let _cwd = CwdGuard::enter();
    let (_, warnings) = capture_warnings(config::load_config);
    assert!(warnings.is_empty());
}

#[test]
#[serial]
fn vanished_working_directory_warns_and_keeps_defaults() {
    let cwd = CwdGuard::enter();
    std::fs::remove_dir(cwd.path()).unwrap();

    let (config, warnings) = capture_warnings(config::load_config);
    assert_eq!(config, EffectiveConfig::default());
    assert_eq!(warnings.len(), 1, "expected one warning, got {warnings:?}");
    assert!(
        warnings[0].starts_with("Could not determine working directory"),
        "unexpected warning: {}",
        warnings[0]
    );
}

// ---------------------------------------------------------------------------
// working directory and re-reading
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn working_directory_is_looked_up_on_every_call() {
    let first = CwdGuard::enter();
    first.install("override.toml");
    assert_eq!(config::load_config().get_str("version_source"), Some("tag"));

    let second = CwdGuard::enter();
    assert_eq!(config::load_config().get_str("version_source"), Some("commit"));

    drop(second);
    assert_eq!(config::load_config().get_str("version_source"), Some("tag"));
}

#[test]
#[serial]
fn repeated_loads_do_not_drift() {
    let cwd = CwdGuard::enter();
    cwd.install("override.toml");

    assert_eq!(config::load_config(), config::load_config());
}

#[test]
#[serial]
fn manifest_changes_are_picked_up_without_caching() {
    let cwd = CwdGuard::enter();
    let manifest = cwd.path().join("pyproject.toml");

    std::fs::write(&manifest, "[tool.semantic_release]\nbranch = \"main\"\n").unwrap();
    assert_eq!(config::load_config().get_str("branch"), Some("main"));

    std::fs::write(&manifest, "[tool.semantic_release]\nbranch = \"develop\"\n").unwrap();
    assert_eq!(config::load_config().get_str("branch"), Some("develop"));

    std::fs::remove_file(&manifest).unwrap();
    assert_eq!(config::load_config().get_str("branch"), Some("master"));
}

// ---------------------------------------------------------------------------
// defines
// ---------------------------------------------------------------------------

#[test]
fn defines_apply_after_manifest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        Path::new(FIXTURES).join("override.toml"),
        dir.path().join("pyproject.toml"),
    )
    .unwrap();

    let mut loaded = config::load_config_from(dir.path());
    assert!(loaded.outcome.is_merged());

    config::apply_defines(&mut loaded.config, &["version_source=commit", "hvcs=gitea"]);
    assert_eq!(loaded.config.get_str("version_source"), Some("commit"));
    assert_eq!(loaded.config.get_str("hvcs"), Some("gitea"));
    assert_eq!(loaded.config.get_str("foo"), Some("bar"));
}

/// A tracing layer that records the message of every WARN event.
mod warning_layer {
    use std::sync::{Arc, Mutex};

    use tracing::Subscriber;
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;

    #[derive(Clone, Default)]
    pub struct WarningCollector {
        pub messages: Arc<Mutex<Vec<String>>>,
    }

    impl<S: Subscriber> Layer<S> for WarningCollector {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != tracing::Level::WARN {
                return;
            }

            struct MsgVisitor(String);
            impl tracing::field::Visit for MsgVisitor {
                fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                    if field.name() == "message" {
                        self.0 = format!("{value:?}");
                    }
                }
                fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                    if field.name() == "message" {
                        self.0 = value.to_string();
                    }
                }
            }

            let mut visitor = MsgVisitor(String::new());
            event.record(&mut visitor);
            self.messages.lock().unwrap().push(visitor.0);
        }
    }
}
