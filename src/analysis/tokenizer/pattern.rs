//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{AnalysisError, Result};

/// A regex-based tokenizer.
///
/// In split mode (the default) the pattern matches separators and the text
/// between matches becomes tokens. In match mode every match is a token.
#[derive(Clone, Debug)]
pub struct PatternTokenizer {
    /// The regex pattern used to find separators or tokens
    pattern: Arc<Regex>,
    /// Whether matches are tokens rather than separators
    match_tokens: bool,
}

impl PatternTokenizer {
    /// The default separator pattern, runs of non-word characters.
    pub const DEFAULT_PATTERN: &'static str = r"\W+";

    /// Create a tokenizer splitting on the default pattern.
    pub fn new() -> Result<Self> {
        Self::split_on(Self::DEFAULT_PATTERN)
    }

    /// Create a tokenizer whose tokens are the text between matches.
    pub fn split_on(pattern: &str) -> Result<Self> {
        Ok(PatternTokenizer {
            pattern: Arc::new(Self::compile(pattern)?),
            match_tokens: false,
        })
    }

    /// Create a tokenizer whose tokens are the matches themselves.
    pub fn matching(pattern: &str) -> Result<Self> {
        Ok(PatternTokenizer {
            pattern: Arc::new(Self::compile(pattern)?),
            match_tokens: true,
        })
    }

    fn compile(pattern: &str) -> Result<Regex> {
        Regex::new(pattern)
            .map_err(|e| AnalysisError::analysis(format!("Invalid regex pattern: {e}")))
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for PatternTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(PatternTokens {
            pattern: Arc::clone(&self.pattern),
            match_tokens: self.match_tokens,
            text: text.to_string(),
            search: 0,
            last_end: 0,
            position: 0,
            done: false,
        }))
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}

/// Tokens of a pattern tokenizer, produced one match at a time.
struct PatternTokens {
    pattern: Arc<Regex>,
    match_tokens: bool,
    text: String,
    /// Where the next regex search starts.
    search: usize,
    /// End of the last separator (split mode).
    last_end: usize,
    position: usize,
    done: bool,
}

impl PatternTokens {
    /// Next match as byte offsets, stepping past empty matches.
    fn next_match(&mut self) -> Option<(usize, usize)> {
        if self.done || self.search > self.text.len() {
            return None;
        }
        let (start, end) = self
            .pattern
            .find_at(&self.text, self.search)
            .map(|m| (m.start(), m.end()))?;
        self.search = if start == end {
            end + self.text[end..].chars().next().map_or(1, char::len_utf8)
        } else {
            end
        };
        Some((start, end))
    }

    fn emit(&mut self, start: usize, end: usize) -> Token {
        let token = Token::with_offsets(&self.text[start..end], self.position, start, end);
        self.position += 1;
        token
    }
}

impl Iterator for PatternTokens {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.match_tokens {
            loop {
                let (start, end) = self.next_match()?;
                if start < end {
                    return Some(self.emit(start, end));
                }
            }
        }

        while let Some((start, end)) = self.next_match() {
            let from = self.last_end;
            self.last_end = self.last_end.max(end);
            if start > from {
                return Some(self.emit(from, start));
            }
        }
        if self.done {
            return None;
        }
        self.done = true;
        let (from, len) = (self.last_end, self.text.len());
        if from < len {
            Some(self.emit(from, len))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tokenizer() {
        let tokenizer = PatternTokenizer::new().unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("hello, world").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 5));
        assert_eq!(tokens[1].text, "world");
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (7, 12));
    }

    #[test]
    fn test_custom_separator() {
        let tokenizer = PatternTokenizer::split_on(",").unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("a,b c,,d").unwrap().collect();

        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b c", "d"]);
    }

    #[test]
    fn test_matching_tokenizer() {
        let tokenizer = PatternTokenizer::matching(r"\d+").unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("tel 555 0100").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "555");
        assert_eq!(tokens[1].start_offset, 8);
    }

    #[test]
    fn test_empty_matches() {
        let tokenizer = PatternTokenizer::split_on(r"\s*").unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("ab c").unwrap().collect();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);

        let tokenizer = PatternTokenizer::matching(r"\d*").unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("x12y3").unwrap().collect();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["12", "3"]);
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_partial_consumption() {
        let tokenizer = PatternTokenizer::split_on(",").unwrap();
        let mut stream = tokenizer.tokenize("a,b,c").unwrap();

        assert_eq!(stream.next().unwrap().text, "a");
        let rest: Vec<_> = stream.map(|t| (t.text, t.start_offset)).collect();
        assert_eq!(rest, vec![("b".to_string(), 2), ("c".to_string(), 4)]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternTokenizer::split_on("[").is_err());
    }
}
