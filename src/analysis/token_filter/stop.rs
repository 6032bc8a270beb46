//! Stop filter implementation.
//!
//! This module provides a filter that removes common words (stop words) that
//! typically don't contribute to search relevance. Removed words are marked
//! stopped, so the composed stream leaves a position hole where they were.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::token_filter::Filter;
//! use sarissa_analyze::analysis::token_filter::stop::StopFilter;
//! use sarissa_analyze::analysis::token::Token;
//!
//! let filter = StopFilter::new(); // Uses default English stop words
//! let tokens = vec![Token::new("the", 0), Token::new("quick", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert!(result[0].is_stopped());
//! assert!(!result[1].is_stopped());
//! ```

use std::sync::Arc;

use ahash::AHashSet;
use lazy_static::lazy_static;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default English stop words list.
pub const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

lazy_static! {
    static ref DEFAULT_ENGLISH_STOP_WORDS_SET: Arc<AHashSet<String>> = Arc::new(
        DEFAULT_ENGLISH_STOP_WORDS
            .iter()
            .map(|s| s.to_string())
            .collect()
    );
}

/// A filter that marks stop words as stopped.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words, lowercased when `ignore_case` is set
    stop_words: Arc<AHashSet<String>>,
    /// Whether matching ignores case
    ignore_case: bool,
}

impl StopFilter {
    /// Create a new stop filter with the default English stop words.
    pub fn new() -> Self {
        StopFilter {
            stop_words: Arc::clone(&DEFAULT_ENGLISH_STOP_WORDS_SET),
            ignore_case: false,
        }
    }

    /// Create a new stop filter from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: Arc::new(words.into_iter().map(Into::into).collect()),
            ignore_case: false,
        }
    }

    /// Match stop words regardless of case.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        if ignore_case && !self.ignore_case {
            self.stop_words = Arc::new(self.stop_words.iter().map(|w| w.to_lowercase()).collect());
        }
        self.ignore_case = ignore_case;
        self
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        if self.ignore_case {
            self.stop_words.contains(&word.to_lowercase())
        } else {
            self.stop_words.contains(word)
        }
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filter = self.clone();
        Ok(Box::new(tokens.map(move |token| {
            if !token.is_stopped() && filter.is_stop_word(&token.text) {
                token.stop()
            } else {
                token
            }
        })))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
