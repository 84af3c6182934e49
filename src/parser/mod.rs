//! Commit parser strategies and their lookup by identifier.
//!
//! A commit parser turns a commit message into a [`ParsedCommit`]. The
//! configuration names the parser with a dotted identifier such as
//! `semantic_release.history.angular_parser`; [`registry::ParserRegistry`]
//! maps those identifiers to strategy instances.

pub mod angular;
pub mod emoji;
pub mod registry;
pub mod tag;

use thiserror::Error;

pub use angular::AngularParser;
pub use emoji::EmojiParser;
pub use tag::TagParser;
pub use registry::{ParserRegistry, current_commit_parser, resolve_commit_parser};

/// The configuration names a commit parser that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImproperConfigurationError {
    #[error("invalid commit parser identifier '{identifier}': expected <module>.<name>")]
    InvalidIdentifier { identifier: String },

    #[error("unable to import parser module '{module}' (commit_parser = '{identifier}')")]
    ModuleNotFound { identifier: String, module: String },

    #[error("parser module '{module}' has no parser named '{attribute}' (commit_parser = '{identifier}')")]
    AttributeNotFound {
        identifier: String,
        module: String,
        attribute: String,
    },
}

/// Errors from parsing a single commit message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unable to parse the given commit message: {0}")]
    UnknownCommitMessageStyle(String),
}

/// How far a commit moves the version.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum LevelBump {
    #[default]
    NoRelease,
    Patch,
    Minor,
    Major,
}

/// Structured description of a commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub bump: LevelBump,
    /// Changelog section the commit belongs to (e.g. `feature`, `fix`).
    pub kind: String,
    pub scope: Option<String>,
    /// Subject line followed by any body paragraphs.
    pub descriptions: Vec<String>,
    pub breaking_descriptions: Vec<String>,
}

/// A pluggable commit message parser.
pub trait CommitParser: Send + Sync + std::fmt::Debug {
    /// Short human-readable name.
    fn name(&self) -> &str;

    fn parse(&self, message: &str) -> Result<ParsedCommit, ParseError>;
}

/// A dotted parser identifier split into module path and attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserRef<'a> {
    pub module: &'a str,
    pub attribute: &'a str,
}

impl<'a> ParserRef<'a> {
    /// Split `identifier` on its last `.`.
    ///
    /// Rejects identifiers without a separator and identifiers with an
    /// empty module path or attribute.
    pub fn parse(identifier: &'a str) -> Result<Self, ImproperConfigurationError> {
        match identifier.trim().rsplit_once('.') {
            Some((module, attribute)) if !module.is_empty() && !attribute.is_empty() => {
                Ok(Self { module, attribute })
            }
            _ => Err(ImproperConfigurationError::InvalidIdentifier {
                identifier: identifier.to_string(),
            }),
        }
    }
}

/// Split a paragraph-separated message into trimmed, non-empty blocks.
fn paragraphs(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}
