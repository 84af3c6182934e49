//! Identifier → parser registry and the resolution entry points.
//!
//! A registry holds the bundled parsers plus any plugins registered at
//! startup. Lookups fail in two distinguishable ways: the module portion
//! of the identifier is unknown, or the module is known but has no parser
//! with the requested name.

use std::sync::Arc;

use indexmap::IndexMap;
use toml::Value;

use super::{CommitParser, EmojiParser, ImproperConfigurationError, ParserRef, TagParser, angular};
use crate::config::EffectiveConfig;
use crate::constants::{ANGULAR_PARSER, DEFAULT_COMMIT_PARSER, EMOJI_PARSER, TAG_PARSER};

/// Setting that names the commit parser.
pub const COMMIT_PARSER_KEY: &str = "commit_parser";

/// Known commit parsers, keyed by dotted identifier.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: IndexMap<String, Arc<dyn CommitParser>>,
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ParserRegistry {
    /// A registry with no parsers at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the bundled parsers, configured from `config`.
    ///
    /// The angular parser is the shared process-wide instance, so every
    /// registry hands out the same `Arc` for it.
    pub fn builtin(config: &EffectiveConfig) -> Self {
        let mut registry = Self::empty();
        registry
            .parsers
            .insert(ANGULAR_PARSER.to_string(), angular::shared());
        registry.parsers.insert(
            EMOJI_PARSER.to_string(),
            Arc::new(EmojiParser::from_config(config)),
        );
        registry.parsers.insert(
            TAG_PARSER.to_string(),
            Arc::new(TagParser::from_config(config)),
        );
        registry
    }

    /// Register a parser under `identifier`, replacing any previous entry.
    ///
    /// Returns the replaced parser, if any.
    pub fn register(
        &mut self,
        identifier: &str,
        parser: Arc<dyn CommitParser>,
    ) -> Result<Option<Arc<dyn CommitParser>>, ImproperConfigurationError> {
        let parsed = ParserRef::parse(identifier)?;
        let key = format!("{}.{}", parsed.module, parsed.attribute);
        tracing::debug!(identifier = %key, parser = parser.name(), "registered commit parser");
        Ok(self.parsers.insert(key, parser))
    }

    /// Registered identifiers in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    /// Whether `module` is the module path of a registered parser or a
    /// dotted prefix of one.
    pub fn has_module(&self, module: &str) -> bool {
        self.parsers.keys().any(|identifier| {
            let Some((owner, _)) = identifier.rsplit_once('.') else {
                return false;
            };
            owner == module
                || owner
                    .strip_prefix(module)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// Resolve `identifier` to its registered parser.
    pub fn resolve(&self, identifier: &str) -> Result<Arc<dyn CommitParser>, ImproperConfigurationError> {
        let parsed = ParserRef::parse(identifier)?;

        if !self.has_module(parsed.module) {
            return Err(ImproperConfigurationError::ModuleNotFound {
                identifier: identifier.to_string(),
                module: parsed.module.to_string(),
            });
        }

        self.parsers
            .get(&format!("{}.{}", parsed.module, parsed.attribute))
            .cloned()
            .ok_or_else(|| ImproperConfigurationError::AttributeNotFound {
                identifier: identifier.to_string(),
                module: parsed.module.to_string(),
                attribute: parsed.attribute.to_string(),
            })
    }
}

/// Resolve `identifier` against `registry`.
pub fn resolve_commit_parser(
    identifier: &str,
    registry: &ParserRegistry,
) -> Result<Arc<dyn CommitParser>, ImproperConfigurationError> {
    registry.resolve(identifier)
}

/// Resolve the parser named by the `commit_parser` setting against the
/// bundled parsers.
pub fn current_commit_parser(
    config: &EffectiveConfig,
) -> Result<Arc<dyn CommitParser>, ImproperConfigurationError> {
    let identifier = commit_parser_identifier(config)?;
    ParserRegistry::builtin(config).resolve(&identifier)
}

/// The configured parser identifier, or the default when unset.
pub fn commit_parser_identifier(config: &EffectiveConfig) -> Result<String, ImproperConfigurationError> {
    match config.get(COMMIT_PARSER_KEY) {
        None => Ok(DEFAULT_COMMIT_PARSER.to_string()),
        Some(Value::String(identifier)) => Ok(identifier.trim().to_string()),
        Some(other) => Err(ImproperConfigurationError::InvalidIdentifier {
            identifier: other.to_string(),
        }),
    }
}
