//! Credential lookup through the `*_var` settings.
//!
//! The configuration never holds secrets itself, only the names of the
//! environment variables that do.

use super::EffectiveConfig;
use crate::env::Env;

/// Secrets resolved from the environment for the configured hosts.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Token for the configured `hvcs` (GitHub, GitLab, or Gitea).
    pub hvcs_token: Option<String>,
    pub pypi_token: Option<String>,
    pub pypi_username: Option<String>,
    pub pypi_password: Option<String>,
    pub repository_username: Option<String>,
    pub repository_password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Credentials")
            .field("hvcs_token", &redact(&self.hvcs_token))
            .field("pypi_token", &redact(&self.pypi_token))
            .field("pypi_username", &self.pypi_username)
            .field("pypi_password", &redact(&self.pypi_password))
            .field("repository_username", &self.repository_username)
            .field("repository_password", &redact(&self.repository_password))
            .finish()
    }
}

impl Credentials {
    /// Resolve every credential named by `config` from `env`.
    pub fn from_env(config: &EffectiveConfig, env: &Env) -> Self {
        let lookup = |setting: &str| config.get_str(setting).and_then(|name| env.non_empty(name));

        Self {
            hvcs_token: hvcs_token_setting(config).and_then(lookup),
            pypi_token: lookup("pypi_token_var"),
            pypi_username: lookup("pypi_user_var"),
            pypi_password: lookup("pypi_pass_var"),
            repository_username: lookup("repository_user_var"),
            repository_password: lookup("repository_pass_var"),
        }
    }
}

/// Setting that names the token variable for the configured `hvcs`.
fn hvcs_token_setting(config: &EffectiveConfig) -> Option<&'static str> {
    match config.get_str("hvcs")?.to_lowercase().as_str() {
        "github" => Some("github_token_var"),
        "gitlab" => Some("gitlab_token_var"),
        "gitea" => Some("gitea_token_var"),
        other => {
            tracing::warn!("Unknown hvcs '{other}', no token variable configured");
            None
        }
    }
}
