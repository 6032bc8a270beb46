//! Lowercase filter implementation.
//!
//! This module provides a filter that converts all token text to lowercase,
//! which is essential for case-insensitive search.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::token_filter::Filter;
//! use sarissa_analyze::analysis::token_filter::lowercase::LowercaseFilter;
//! use sarissa_analyze::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("The", 0), Token::new("QUICK", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "the");
//! assert_eq!(result[1].text, "quick");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// Stopped tokens pass through untouched; positions and offsets are
/// preserved.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            if token.is_stopped() {
                token
            } else if token.text.is_ascii() {
                token.with_text(token.text.to_ascii_lowercase())
            } else {
                token.with_text(token.text.to_lowercase())
            }
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }

    fn normalizes(&self) -> bool {
        true
    }
}
