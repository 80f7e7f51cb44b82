//! Regex-based tokenizer implementation.

use std::ops::Range;
use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, WikiRaiderError};

/// A tokenizer that emits either the matches of a pattern or the gaps
/// between them.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Whether to extract gaps (text between matches) instead of matches
    gaps: bool,
}

impl RegexTokenizer {
    /// Create a tokenizer that extracts the matches of `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(compile(pattern)?),
            gaps: false,
        })
    }

    /// Create a tokenizer that extracts gaps (text between matches) instead of matches.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(compile(pattern)?),
            gaps: true,
        })
    }

    /// Byte ranges of the tokens this tokenizer would emit for `text`.
    ///
    /// Empty gaps (adjacent matches) are never reported.
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        if !self.gaps {
            return self.pattern.find_iter(text).map(|m| m.range()).collect();
        }

        let mut spans = Vec::new();
        let mut last_end = 0;
        for mat in self.pattern.find_iter(text) {
            if mat.start() > last_end {
                spans.push(last_end..mat.start());
            }
            last_end = mat.end();
        }
        if last_end < text.len() {
            spans.push(last_end..text.len());
        }
        spans
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| WikiRaiderError::invalid_argument(format!("Invalid regex pattern: {e}")))
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .spans(text)
            .into_iter()
            .enumerate()
            .map(|(position, span)| {
                Token::with_offsets(&text[span.clone()], position, span.start, span.end)
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_tokenizer() {
        let tokenizer = RegexTokenizer::with_pattern(r"\w+").unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("hello world").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 5);

        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].start_offset, 6);
        assert_eq!(tokens[1].end_offset, 11);
    }

    #[test]
    fn test_regex_tokenizer_with_gaps() {
        let tokenizer = RegexTokenizer::with_gaps(r"[\s,]+").unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize(", hello,  world,").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[0].start_offset, 2);
        assert_eq!(tokens[1].text, "world");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RegexTokenizer::with_pattern("[unclosed").is_err());
    }

    #[test]
    fn test_tokenizer_name() {
        let tokenizer = RegexTokenizer::with_gaps(r"\s+").unwrap();
        assert_eq!(tokenizer.name(), "regex");
    }
}
