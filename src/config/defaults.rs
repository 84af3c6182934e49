//! Built-in defaults for every setting the tool understands.
//!
//! The table is built once on first use and never mutated afterwards;
//! loaders start from a clone of it.

use std::sync::LazyLock;

use toml::Value;

use super::EffectiveConfig;
use crate::constants::{DEFAULT_COMMIT_PARSER, DEFAULT_PACKAGE};

static DEFAULTS: LazyLock<EffectiveConfig> =
    LazyLock::new(|| EffectiveConfig::from_entries(default_entries()));

/// The process-wide defaults table.
pub fn defaults() -> &'static EffectiveConfig {
    &DEFAULTS
}

fn string(value: &str) -> Value {
    Value::String(value.to_string())
}

fn default_entries() -> Vec<(String, Value)> {
    let entries = [
        // Commit parsing
        ("commit_parser", string(DEFAULT_COMMIT_PARSER)),
        ("minor_tag", string(":sparkles:")),
        ("fix_tag", string(":nut_and_bolt:")),
        ("major_emoji", string(":boom:")),
        (
            "minor_emoji",
            string(":sparkles:,:children_crossing:,:lipstick:,:iphone:,:egg:,:chart_with_upwards_trend:"),
        ),
        (
            "patch_emoji",
            string(
                ":ambulance:,:lock:,:bug:,:zap:,:goal_net:,:alien:,:wheelchair:,:speech_balloon:,\
                 :mag:,:apple:,:penguin:,:checkered_flag:,:robot:,:green_apple:",
            ),
        ),
        ("patch_without_tag", Value::Boolean(false)),
        ("major_on_zero", Value::Boolean(true)),
        // Versioning
        ("version_variable", string(&format!("{DEFAULT_PACKAGE}/__init__.py:__version__"))),
        ("version_source", string("commit")),
        ("tag_format", string("v{version}")),
        ("tag_commit", Value::Boolean(true)),
        ("branch", string("master")),
        // Commit authoring
        ("commit_subject", string("{version}")),
        ("commit_message", string("Automatically generated by python-semantic-release")),
        ("commit_author", string("github-actions <action@github.com>")),
        ("commit_version_number", Value::Boolean(false)),
        // Changelog
        ("changelog_file", string("CHANGELOG.md")),
        ("changelog_placeholder", string("<!--next-version-placeholder-->")),
        ("changelog_sections", string("feature,fix,breaking,documentation,performance")),
        ("changelog_components", string("semantic_release.changelog.changelog_headers")),
        ("changelog_capitalize", Value::Boolean(true)),
        ("changelog_scope", Value::Boolean(true)),
        // Build and upload
        ("build_command", string("python setup.py sdist bdist_wheel")),
        ("pre_commit_command", string("")),
        ("dist_path", string("dist")),
        ("remove_dist", Value::Boolean(true)),
        ("upload_to_repository", Value::Boolean(true)),
        ("upload_to_pypi", Value::Boolean(true)),
        ("upload_to_release", Value::Boolean(true)),
        ("check_build_status", Value::Boolean(false)),
        // Hosting
        ("hvcs", string("github")),
        ("hvcs_domain", string("")),
        // Credential variable names
        ("github_token_var", string("GH_TOKEN")),
        ("gitea_token_var", string("GITEA_TOKEN")),
        ("gitlab_token_var", string("GL_TOKEN")),
        ("pypi_pass_var", string("PYPI_PASSWORD")),
        ("pypi_token_var", string("PYPI_TOKEN")),
        ("pypi_user_var", string("PYPI_USERNAME")),
        ("repository_user_var", string("REPOSITORY_USERNAME")),
        ("repository_pass_var", string("REPOSITORY_PASSWORD")),
    ];

    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
