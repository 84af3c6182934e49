//! Angular-style commit messages: `type(scope)!: subject`.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{CommitParser, LevelBump, ParseError, ParsedCommit, paragraphs};

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[A-Za-z]+)(?:\((?P<scope>[^\n)]+)\))?(?P<breaking>!)?: (?P<subject>[^\n]+)$")
        .expect("angular header pattern is valid")
});

static SHARED: LazyLock<Arc<dyn CommitParser>> = LazyLock::new(|| Arc::new(AngularParser));

const BREAKING_PREFIXES: &[&str] = &["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// Parser for the Angular commit message convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularParser;

/// The process-wide angular parser instance every registry shares.
pub fn shared() -> Arc<dyn CommitParser> {
    Arc::clone(&SHARED)
}

impl CommitParser for AngularParser {
    fn name(&self) -> &str {
        "angular"
    }

    fn parse(&self, message: &str) -> Result<ParsedCommit, ParseError> {
        let mut blocks = paragraphs(message).into_iter();
        let header = blocks.next().unwrap_or_default();
        let first_line = header.lines().next().unwrap_or_default();

        let caps = HEADER_RE
            .captures(first_line)
            .ok_or_else(|| ParseError::UnknownCommitMessageStyle(first_line.to_string()))?;

        let commit_type = caps["type"].to_lowercase();
        let (kind, mut bump) = match commit_type.as_str() {
            "feat" => ("feature", LevelBump::Minor),
            "fix" => ("fix", LevelBump::Patch),
            "perf" => ("performance", LevelBump::Patch),
            "docs" => ("documentation", LevelBump::NoRelease),
            "build" | "chore" | "ci" | "style" | "refactor" | "test" => {
                (commit_type.as_str(), LevelBump::NoRelease)
            }
            _ => {
                return Err(ParseError::UnknownCommitMessageStyle(format!(
                    "unknown commit type '{commit_type}'"
                )));
            }
        };

        let subject = caps["subject"].trim().to_string();
        let mut descriptions = vec![subject.clone()];
        let mut breaking_descriptions = Vec::new();

        // Any extra lines glued to the header belong to the body.
        let header_rest: Vec<&str> = header.lines().skip(1).collect();
        if !header_rest.is_empty() {
            descriptions.push(header_rest.join("\n"));
        }

        for block in blocks {
            match BREAKING_PREFIXES.iter().find_map(|p| block.strip_prefix(p)) {
                Some(text) => breaking_descriptions.push(text.trim().to_string()),
                None => descriptions.push(block),
            }
        }

        if caps.name("breaking").is_some() && breaking_descriptions.is_empty() {
            breaking_descriptions.push(subject);
        }
        if !breaking_descriptions.is_empty() {
            bump = LevelBump::Major;
        }

        Ok(ParsedCommit {
            bump,
            kind: kind.to_string(),
            scope: caps.name("scope").map(|s| s.as_str().to_string()),
            descriptions,
            breaking_descriptions,
        })
    }
}
