//! Whitespace analyzer that splits on whitespace without any filtering.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::analyzer::analyzer::Analyzer;
//! use sarissa_analyze::analysis::analyzer::whitespace::WhitespaceAnalyzer;
//!
//! let analyzer = WhitespaceAnalyzer::new();
//! let tokens: Vec<_> = analyzer.token_stream("Hello World").unwrap().collect();
//!
//! // No filtering applied - original case preserved
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "World");
//! ```

use std::any::Any;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// An analyzer that only splits on whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceAnalyzer {
    tokenizer: WhitespaceTokenizer,
}

impl WhitespaceAnalyzer {
    /// Create a new whitespace analyzer.
    pub fn new() -> Self {
        WhitespaceAnalyzer {
            tokenizer: WhitespaceTokenizer::new(),
        }
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &WhitespaceTokenizer {
        &self.tokenizer
    }
}

impl Analyzer for WhitespaceAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &str {
        "whitespace"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
