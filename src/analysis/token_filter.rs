//! Token filter implementations for token transformation.
//!
//! Filters transform the token streams produced by tokenizers. A filter that
//! wants to remove a token marks it stopped instead of dropping it; the
//! composed stream of an analyzer drops stopped tokens and carries their
//! position increments onward, so removed words leave position holes.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`uppercase::UppercaseFilter`] - Converts tokens to uppercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`limit::LimitFilter`] - Limits number of tokens
//! - [`trim::TrimFilter`] - Trims surrounding whitespace
//! - [`remove_empty::RemoveEmptyFilter`] - Removes empty tokens
//! - [`keyword_marker::KeywordMarkerFilter`] - Flags protected words
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::token_filter::Filter;
//! use sarissa_analyze::analysis::token_filter::lowercase::LowercaseFilter;
//! use sarissa_analyze::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use sarissa_analyze::analysis::token::{Token, TokenStream};
/// use sarissa_analyze::analysis::token_filter::Filter;
/// use sarissa_analyze::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         Ok(Box::new(tokens.map(|t| {
///             let reversed: String = t.text.chars().rev().collect();
///             t.with_text(reversed)
///         })))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Whether this filter works token by token without changing the token
    /// count, and may therefore be used inside a normalizer.
    fn normalizes(&self) -> bool {
        false
    }
}

pub mod keyword_marker;
pub mod limit;
pub mod lowercase;
pub mod remove_empty;
pub mod stop;
pub mod trim;
pub mod uppercase;

pub use keyword_marker::KeywordMarkerFilter;
pub use limit::LimitFilter;
pub use lowercase::LowercaseFilter;
pub use remove_empty::RemoveEmptyFilter;
pub use stop::StopFilter;
pub use trim::TrimFilter;
pub use uppercase::UppercaseFilter;
