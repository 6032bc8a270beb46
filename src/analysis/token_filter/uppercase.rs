//! Uppercase filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to uppercase.
#[derive(Clone, Debug, Default)]
pub struct UppercaseFilter;

impl UppercaseFilter {
    /// Create a new uppercase filter.
    pub fn new() -> Self {
        UppercaseFilter
    }
}

impl Filter for UppercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            if token.is_stopped() {
                token
            } else {
                token.with_text(token.text.to_uppercase())
            }
        })))
    }

    fn name(&self) -> &'static str {
        "uppercase"
    }

    fn normalizes(&self) -> bool {
        true
    }
}
