//! ## fyrvakt-detection::keywords
//! **Aho-Corasick keyword matching over payload text**
//!
//! Matching is case-sensitive and answers a single question: does the text
//! contain at least one of the keywords. How many keywords match, or how often,
//! is irrelevant to every caller.

use aho_corasick::AhoCorasick;

use crate::error::DetectionError;

/// Keyword that flags a packet as a threat.
pub const THREAT_KEYWORDS: [&str; 1] = ["error"];

/// Keywords that count as a device fault.
pub const FAULT_KEYWORDS: [&str; 3] = ["error", "fail", "timeout"];

#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    matcher: AhoCorasick,
}

impl KeywordMatcher {
    pub fn new<I, S>(keywords: I) -> Result<Self, DetectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        let matcher = AhoCorasick::new(&keywords)
            .map_err(|e| DetectionError::PatternError(e.to_string()))?;
        Ok(Self { matcher })
    }

    /// True if `text` contains any keyword.
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}
