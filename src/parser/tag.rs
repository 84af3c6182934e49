//! Tagged commit messages: `:sparkles:` / `:nut_and_bolt:` markers in the subject.

use super::{CommitParser, LevelBump, ParseError, ParsedCommit, paragraphs};
use crate::config::EffectiveConfig;

const BREAKING_PREFIXES: &[&str] = &["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// Parser that bumps on configured tags in the subject line.
///
/// `minor_tag` marks a feature, `fix_tag` a fix. Untagged commits are
/// patches only when `patch_without_tag` is set. A `BREAKING CHANGE:`
/// paragraph makes any commit major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParser {
    minor_tag: String,
    fix_tag: String,
    patch_without_tag: bool,
}

impl TagParser {
    pub fn new(minor_tag: impl Into<String>, fix_tag: impl Into<String>, patch_without_tag: bool) -> Self {
        Self {
            minor_tag: minor_tag.into(),
            fix_tag: fix_tag.into(),
            patch_without_tag,
        }
    }

    /// Read the tags from `config`; missing settings disable that tag.
    pub fn from_config(config: &EffectiveConfig) -> Self {
        Self::new(
            config.get_str("minor_tag").unwrap_or_default(),
            config.get_str("fix_tag").unwrap_or_default(),
            config.get_bool("patch_without_tag").unwrap_or(false),
        )
    }

    fn tagged(tag: &str, subject: &str) -> bool {
        !tag.is_empty() && subject.contains(tag)
    }
}

impl CommitParser for TagParser {
    fn name(&self) -> &str {
        "tag"
    }

    fn parse(&self, message: &str) -> Result<ParsedCommit, ParseError> {
        let mut blocks = paragraphs(message).into_iter();
        let raw_subject = blocks.next().unwrap_or_default();

        let (mut bump, kind, tag) = if Self::tagged(&self.minor_tag, &raw_subject) {
            (LevelBump::Minor, "feature", Some(&self.minor_tag))
        } else if Self::tagged(&self.fix_tag, &raw_subject) {
            (LevelBump::Patch, "fix", Some(&self.fix_tag))
        } else if self.patch_without_tag {
            (LevelBump::Patch, "fix", None)
        } else {
            (LevelBump::NoRelease, "other", None)
        };

        let subject = match tag {
            Some(tag) => raw_subject.replacen(tag.as_str(), "", 1).trim().to_string(),
            None => raw_subject.trim().to_string(),
        };

        let mut descriptions = vec![subject];
        let mut breaking_descriptions = Vec::new();
        for block in blocks {
            match BREAKING_PREFIXES.iter().find_map(|p| block.strip_prefix(p)) {
                Some(text) => breaking_descriptions.push(text.trim().to_string()),
                None => descriptions.push(block),
            }
        }
        if !breaking_descriptions.is_empty() {
            bump = LevelBump::Major;
        }

        Ok(ParsedCommit {
            bump,
            kind: kind.to_string(),
            scope: None,
            descriptions,
            breaking_descriptions,
        })
    }
}
