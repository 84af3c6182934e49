//! Gitmoji-style commit messages: the emojis in the subject decide the bump.

use super::{CommitParser, LevelBump, ParseError, ParsedCommit, paragraphs};
use crate::config::EffectiveConfig;

/// Parser that looks for configured emoji codes in the subject line.
///
/// Emoji sets come from the `major_emoji`, `minor_emoji` and
/// `patch_emoji` settings. The highest level with a match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiParser {
    major: Vec<String>,
    minor: Vec<String>,
    patch: Vec<String>,
}

impl EmojiParser {
    pub fn new(major: Vec<String>, minor: Vec<String>, patch: Vec<String>) -> Self {
        Self { major, minor, patch }
    }

    /// Read the emoji sets from `config`, empty when a setting is missing.
    pub fn from_config(config: &EffectiveConfig) -> Self {
        let list = |key: &str| config.get_list(key).unwrap_or_default();
        Self::new(list("major_emoji"), list("minor_emoji"), list("patch_emoji"))
    }
}

impl CommitParser for EmojiParser {
    fn name(&self) -> &str {
        "emoji"
    }

    fn parse(&self, message: &str) -> Result<ParsedCommit, ParseError> {
        let mut blocks = paragraphs(message).into_iter();
        let subject = blocks.next().unwrap_or_default();

        let levels = [
            (LevelBump::Major, &self.major),
            (LevelBump::Minor, &self.minor),
            (LevelBump::Patch, &self.patch),
        ];
        let matched = levels.iter().find_map(|(level, emojis)| {
            emojis
                .iter()
                .find(|emoji| subject.contains(emoji.as_str()))
                .map(|emoji| (*level, emoji.clone()))
        });

        let (bump, kind) = matched.unwrap_or((LevelBump::NoRelease, "other".to_string()));
        let breaking_descriptions = if bump == LevelBump::Major {
            vec![subject.clone()]
        } else {
            Vec::new()
        };

        let mut descriptions = vec![subject];
        descriptions.extend(blocks);

        Ok(ParsedCommit {
            bump,
            kind,
            scope: None,
            descriptions,
            breaking_descriptions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> EmojiParser {
        EmojiParser::from_config(&EffectiveConfig::default())
    }

    #[test]
    fn default_emoji_sets_are_loaded() {
        let p = parser();
        assert_eq!(p.major, vec![":boom:"]);
        assert!(p.minor.contains(&":sparkles:".to_string()));
        assert!(p.patch.contains(&":bug:".to_string()));
    }

    #[test]
    fn highest_level_wins() {
        let commit = parser().parse(":bug: :boom: rewrite the loader").unwrap();
        assert_eq!(commit.bump, LevelBump::Major);
        assert_eq!(commit.kind, ":boom:");
        assert_eq!(commit.breaking_descriptions.len(), 1);
    }

    #[test]
    fn minor_and_patch_emojis() {
        assert_eq!(parser().parse(":sparkles: add parser").unwrap().bump, LevelBump::Minor);
        assert_eq!(parser().parse(":lock: patch token leak").unwrap().bump, LevelBump::Patch);
    }

    #[test]
    fn no_emoji_means_no_release() {
        let commit = parser().parse("Update README\n\nMore words.").unwrap();
        assert_eq!(commit.bump, LevelBump::NoRelease);
        assert_eq!(commit.kind, "other");
        assert_eq!(commit.descriptions, vec!["Update README", "More words."]);
    }

    #[test]
    fn custom_sets_from_config() {
        let mut config = EffectiveConfig::default();
        config.set("minor_emoji", toml::Value::String(":rocket:".into()));
        let commit = EmojiParser::from_config(&config).parse(":rocket: ship it").unwrap();
        assert_eq!(commit.bump, LevelBump::Minor);
    }
}
