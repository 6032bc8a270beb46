//! Token types and utilities for text analysis.
//!
//! This module defines the core data structures for representing text tokens,
//! which are the fundamental units that flow through the analysis pipeline.
//!
//! # Core Types
//!
//! - [`Token`] - A single analyzed token with text, offsets, and graph data
//! - [`TokenType`] - Classification of token content (alphanumeric, CJK, etc.)
//! - [`TokenMetadata`] - Type and named attributes attached by stages
//! - [`AttributeValue`] - Scalar value of a stage-attached attribute
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//!
//! # Positions
//!
//! Tokens describe their place in the stream through `position_increment`
//! and `position_length` rather than absolute positions. A filter that
//! removes a token marks it stopped; the composed stream then adds its
//! increment to the next live token:
//!
//! ```text
//! Input: "the quick fox", "the" stopped
//!
//!   "quick" (pos_inc=2)  -> position 1
//!   "fox"   (pos_inc=1)  -> position 2
//! ```
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::token::{AttributeValue, Token, TokenType};
//!
//! let token = Token::with_offsets("world", 1, 6, 11)
//!     .with_token_type(TokenType::Alphanum)
//!     .with_attribute("keyword", true);
//!
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.token_type().as_str(), "<ALPHANUM>");
//! assert_eq!(token.attribute("keyword"), Some(&AttributeValue::Bool(true)));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// `position` is the stage-local position a tokenizer assigned; executors
/// derive reported positions from `position_increment` alone so that filters
/// which drop or stack tokens never need to renumber.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position assigned by the producing tokenizer (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the stage input
    pub start_offset: usize,

    /// The byte offset where this token ends in the stage input
    pub end_offset: usize,

    /// Whether this token has been marked as stopped (removed) by a filter
    pub stopped: bool,

    /// Token type and stage-attached attributes
    pub metadata: Option<TokenMetadata>,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1 (default): Normal increment, next position
    /// - 0: Same position as previous token
    /// - >1: Skip positions (e.g., for removed stop words)
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    pub position_length: usize,
}

/// Token type classification for different kinds of tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Plain word with no further classification
    #[default]
    Word,
    /// Alphanumeric text (English, Latin scripts)
    Alphanum,
    /// Numeric values
    Num,
    /// CJK (Chinese, Japanese, Korean) characters
    Cjk,
    /// Katakana characters (Japanese)
    Katakana,
    /// Hiragana characters (Japanese)
    Hiragana,
    /// Hangul characters (Korean)
    Hangul,
}

impl TokenType {
    /// The type string reported in analyze output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Word => "word",
            TokenType::Alphanum => "<ALPHANUM>",
            TokenType::Num => "<NUM>",
            TokenType::Cjk => "<IDEOGRAPHIC>",
            TokenType::Katakana => "<KATAKANA>",
            TokenType::Hiragana => "<HIRAGANA>",
            TokenType::Hangul => "<HANGUL>",
        }
    }
}

/// Scalar value of a stage-attached token attribute.
///
/// `Bytes` is accepted from stages but never reported as-is; the analyze
/// output renders it through [`AttributeValue::to_display`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl AttributeValue {
    /// Convert non-text values into a displayable scalar.
    ///
    /// Byte values become a bracketed list of hex pairs, `[61 62]`.
    pub fn to_display(&self) -> AttributeValue {
        match self {
            AttributeValue::Bytes(bytes) => {
                let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
                AttributeValue::Text(format!("[{}]", hex.join(" ")))
            }
            other => other.clone(),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Bytes(value)
    }
}

/// Additional metadata that can be attached to tokens
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token type classification
    pub token_type: Option<TokenType>,

    /// Named attributes attached by stages, kept sorted by name
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            stopped: false,
            metadata: None,
            position_increment: 1,
            position_length: 1,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    /// Check if this token is stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Set the token type in metadata.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        let metadata = self.metadata.get_or_insert_with(TokenMetadata::default);
        metadata.token_type = Some(token_type);
        self
    }

    /// The token type, `word` when no stage classified the token.
    pub fn token_type(&self) -> TokenType {
        self.metadata
            .as_ref()
            .and_then(|m| m.token_type)
            .unwrap_or_default()
    }

    /// Attach a named attribute.
    pub fn with_attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        let metadata = self.metadata.get_or_insert_with(TokenMetadata::default);
        metadata.attributes.insert(key.into(), value.into());
        self
    }

    /// Get a named attribute.
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.metadata.as_ref()?.attributes.get(key)
    }

    /// All stage-attached attributes, sorted by name.
    pub fn attributes(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.metadata.iter().flat_map(|m| m.attributes.iter())
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
