//! Standard tokenizer implementation.
//!
//! This module provides a tokenizer that splits text using Unicode word
//! boundary rules (UAX #29). Segments without any alphanumeric character
//! (punctuation, whitespace) are dropped, and every kept token is typed by
//! the script of its characters.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::tokenizer::Tokenizer;
//! use sarissa_analyze::analysis::tokenizer::standard::StandardTokenizer;
//!
//! let tokenizer = StandardTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world! 2024").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].token_type().as_str(), "<NUM>");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
#[derive(Clone, Debug)]
pub struct StandardTokenizer {
    max_token_length: usize,
}

impl StandardTokenizer {
    /// Default maximum token length in bytes.
    pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 255;

    /// Create a new standard tokenizer.
    pub fn new() -> Self {
        StandardTokenizer {
            max_token_length: Self::DEFAULT_MAX_TOKEN_LENGTH,
        }
    }

    /// Drop words longer than `max_token_length` bytes.
    pub fn with_max_token_length(mut self, max_token_length: usize) -> Self {
        self.max_token_length = max_token_length.max(1);
        self
    }

    /// Detect token type based on character content.
    ///
    /// - All numeric → Num
    /// - All Hiragana → Hiragana
    /// - All Katakana → Katakana
    /// - Contains Hangul → Hangul
    /// - Contains CJK ideographs → Cjk
    /// - Otherwise → Alphanum
    fn detect_token_type(word: &str) -> TokenType {
        if word.chars().all(|c| c.is_numeric()) {
            return TokenType::Num;
        }

        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }

        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}')) {
            return TokenType::Katakana;
        }

        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }

        if word.chars().any(|c| {
            matches!(c,
                '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
                '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
                '\u{20000}'..='\u{2CEAF}'  // CJK Extensions B-E
            )
        }) {
            return TokenType::Cjk;
        }

        TokenType::Alphanum
    }
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        // Segmentation needs the whole text; tokens are built as they are pulled.
        let spans: Vec<(usize, usize)> = text
            .split_word_bound_indices()
            .filter(|(_, word)| word.chars().any(|c| c.is_alphanumeric()))
            .map(|(start, word)| (start, start + word.len()))
            .collect();

        let text = text.to_string();
        let max_token_length = self.max_token_length;
        let mut position = 0;
        let mut skipped = 0;

        Ok(Box::new(spans.into_iter().filter_map(move |(start, end)| {
            // Overlong words leave a hole, like a removed token.
            if end - start > max_token_length {
                skipped += 1;
                return None;
            }

            let word = &text[start..end];
            let token = Token::with_offsets(word, position, start, end)
                .with_token_type(Self::detect_token_type(word))
                .with_position_increment(1 + skipped);
            position += 1;
            skipped = 0;
            Some(token)
        })))
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tokenizer() {
        let tokenizer = StandardTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello, world!").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (7, 12));
        assert_eq!(tokens[0].token_type(), TokenType::Alphanum);
    }

    #[test]
    fn test_token_types() {
        let tokenizer = StandardTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("route 66 ひらがな").unwrap().collect();

        assert_eq!(tokens[0].token_type(), TokenType::Alphanum);
        assert_eq!(tokens[1].token_type(), TokenType::Num);
        assert_eq!(tokens[2].token_type(), TokenType::Hiragana);
    }

    #[test]
    fn test_overlong_word_leaves_hole() {
        let tokenizer = StandardTokenizer::new().with_max_token_length(4);
        let tokens: Vec<Token> = tokenizer.tokenize("a lengthy b").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "b");
        assert_eq!(tokens[1].position_increment, 2);
    }

    #[test]
    fn test_partial_consumption() {
        let tokenizer = StandardTokenizer::new().with_max_token_length(4);
        let mut stream = tokenizer.tokenize("one lengthy two three").unwrap();

        assert_eq!(stream.next().unwrap().text, "one");
        let second = stream.next().unwrap();
        assert_eq!((second.text.as_str(), second.position), ("two", 1));
        assert_eq!(second.position_increment, 2);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(StandardTokenizer::new().name(), "standard");
    }
}
