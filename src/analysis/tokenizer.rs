//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first token-producing step of the analysis pipeline,
//! responsible for splitting (char-filtered) input text into tokens.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`keyword::KeywordTokenizer`] - Treats entire text as a single token
//! - [`standard::StandardTokenizer`] - Uses Unicode word boundaries
//! - [`pattern::PatternTokenizer`] - Regex-based splitting or matching
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::tokenizer::Tokenizer;
//! use sarissa_analyze::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// Tokens carry byte offsets into `text`. The trait requires `Send + Sync`
/// so that one instance can serve concurrent requests.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use sarissa_analyze::analysis::token::{Token, TokenStream};
/// use sarissa_analyze::analysis::tokenizer::Tokenizer;
/// use sarissa_analyze::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let mut start = 0;
///         let mut tokens = Vec::new();
///         for (position, part) in text.split(',').enumerate() {
///             tokens.push(Token::with_offsets(part, position, start, start + part.len()));
///             start += part.len() + 1;
///         }
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Position gap this tokenizer wants between consecutive texts, if any.
    fn position_increment_gap(&self) -> Option<usize> {
        None
    }

    /// Offset gap this tokenizer wants between consecutive texts, if any.
    fn offset_gap(&self) -> Option<usize> {
        None
    }
}

pub mod keyword;
pub mod pattern;
pub mod standard;
pub mod whitespace;

pub use keyword::KeywordTokenizer;
pub use pattern::PatternTokenizer;
pub use standard::StandardTokenizer;
pub use whitespace::WhitespaceTokenizer;
