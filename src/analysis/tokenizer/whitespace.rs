//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
///
/// Tokens are typed `word`; no further classification is attempted.
#[derive(Clone, Debug)]
pub struct WhitespaceTokenizer {
    max_token_length: usize,
}

impl WhitespaceTokenizer {
    /// Default maximum token length in bytes.
    pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 255;

    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer {
            max_token_length: Self::DEFAULT_MAX_TOKEN_LENGTH,
        }
    }

    /// Split runs longer than `max_token_length` bytes into several tokens.
    pub fn with_max_token_length(mut self, max_token_length: usize) -> Self {
        self.max_token_length = max_token_length.max(1);
        self
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(WhitespaceTokens {
            text: text.to_string(),
            cursor: 0,
            position: 0,
            max_token_length: self.max_token_length,
        }))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Tokens of a whitespace split, produced one at a time.
struct WhitespaceTokens {
    text: String,
    cursor: usize,
    position: usize,
    max_token_length: usize,
}

impl Iterator for WhitespaceTokens {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let text = self.text.as_str();
        let start = self.cursor
            + text[self.cursor..]
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map(|(idx, _)| idx)?;
        let run_end = text[start..]
            .char_indices()
            .find(|(_, c)| c.is_whitespace())
            .map_or(text.len(), |(idx, _)| start + idx);

        // Long runs are cut into chunks on char boundaries.
        let mut end = (start + self.max_token_length).min(run_end);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            let width = text[start..].chars().next().map_or(1, char::len_utf8);
            end = (start + width).min(run_end);
        }

        let token = Token::with_offsets(&text[start..end], self.position, start, end);
        self.position += 1;
        self.cursor = end;
        Some(token)
    }
}
