//! Remove empty filter implementation.
//!
//! This module provides a filter that removes tokens whose text is empty,
//! typically after a trim or a char filter emptied them.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::token_filter::Filter;
//! use sarissa_analyze::analysis::token_filter::remove_empty::RemoveEmptyFilter;
//! use sarissa_analyze::analysis::token::Token;
//!
//! let filter = RemoveEmptyFilter::new();
//! let tokens = vec![Token::new("hello", 0), Token::new("", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert!(!result[0].is_stopped());
//! assert!(result[1].is_stopped());
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that marks empty tokens as stopped.
#[derive(Clone, Debug, Default)]
pub struct RemoveEmptyFilter;

impl RemoveEmptyFilter {
    /// Create a new remove empty filter.
    pub fn new() -> Self {
        RemoveEmptyFilter
    }
}

impl Filter for RemoveEmptyFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            if token.is_empty() && !token.is_stopped() {
                token.stop()
            } else {
                token
            }
        })))
    }

    fn name(&self) -> &'static str {
        "remove_empty"
    }
}
