//! Trim filter implementation.

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that removes leading and trailing whitespace from tokens.
///
/// Offsets are left as they were; only the term text changes.
#[derive(Clone, Debug, Default)]
pub struct TrimFilter;

impl TrimFilter {
    /// Create a new trim filter.
    pub fn new() -> Self {
        TrimFilter
    }
}

impl Filter for TrimFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            let trimmed = token.text.trim();
            if token.is_stopped() || trimmed.len() == token.text.len() {
                token
            } else {
                token.with_text(trimmed)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "trim"
    }

    fn normalizes(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_trim_filter() {
        let filter = TrimFilter::new();
        let tokens = vec![
            Token::with_offsets("  hello  ", 0, 0, 9),
            Token::new("world", 1),
            Token::new("   ", 2),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!((result[0].start_offset, result[0].end_offset), (0, 9));
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(TrimFilter::new().name(), "trim");
    }
}
