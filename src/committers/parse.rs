use anyhow::{Context, Result};
use regex::Regex;
use thiserror::Error;

/// Author strings beyond this many characters are truncated, not rejected.
pub const MAX_AUTHOR_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlogEntry {
    pub commits: u64,
    pub author: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no leading commit count")]
    MissingCount,

    #[error("commit count out of range: {0}")]
    CountOverflow(String),

    #[error("empty author field")]
    EmptyAuthor,
}

/// Extracts `(commit_count, author)` from one `git shortlog -nse` line.
///
/// Grammar: optional whitespace, decimal count, whitespace, then author text
/// up to a tab or end of line.
pub struct LineParser {
    line_re: Regex,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        let line_re = Regex::new(r"^\s*(\d+)(?:\s+([^\t\n]+))?")
            .context("Failed to compile shortlog line pattern")?;
        Ok(Self { line_re })
    }

    pub fn parse(&self, line: &str) -> std::result::Result<ShortlogEntry, ParseError> {
        let caps = self.line_re.captures(line).ok_or(ParseError::MissingCount)?;

        let digits = &caps[1];
        let commits = digits
            .parse::<u64>()
            .map_err(|_| ParseError::CountOverflow(digits.to_string()))?;

        let author = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if author.is_empty() {
            return Err(ParseError::EmptyAuthor);
        }

        let author = if author.chars().count() > MAX_AUTHOR_LEN {
            author.chars().take(MAX_AUTHOR_LEN).collect()
        } else {
            author.to_string()
        };

        Ok(ShortlogEntry { commits, author })
    }
}
