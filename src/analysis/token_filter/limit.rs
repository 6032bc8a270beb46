//! Limit filter implementation.

use super::Filter;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that keeps only the first `limit` live tokens of the stream.
///
/// The stream ends once the limit is reached. Nothing after the last kept
/// token is pulled, so no trailing position increment is left behind.
#[derive(Clone, Debug)]
pub struct LimitFilter {
    limit: usize,
}

impl LimitFilter {
    /// Create a new limit filter with the given limit.
    pub fn new(limit: usize) -> Self {
        LimitFilter { limit }
    }

    /// Get the limit.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Filter for LimitFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let limit = self.limit;
        let mut seen = 0;
        Ok(Box::new(tokens.take_while(move |token| {
            if token.is_stopped() {
                return seen < limit;
            }
            seen += 1;
            seen <= limit
        })))
    }

    fn name(&self) -> &'static str {
        "limit"
    }
}
