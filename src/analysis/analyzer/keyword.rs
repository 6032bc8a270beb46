//! Keyword analyzer that treats the entire input as a single token.
//!
//! This analyzer is what keyword fields without a normalizer use, so
//! that the analyze output shows exactly the term that would be indexed.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::analyzer::analyzer::Analyzer;
//! use sarissa_analyze::analysis::analyzer::keyword::KeywordAnalyzer;
//!
//! let analyzer = KeywordAnalyzer::new();
//! let tokens: Vec<_> = analyzer.token_stream("user-123-abc").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "user-123-abc");
//! ```

use std::any::Any;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::keyword::KeywordTokenizer;
use crate::error::Result;

/// A keyword analyzer that treats the entire input as a single token.
#[derive(Clone, Debug, Default)]
pub struct KeywordAnalyzer {
    tokenizer: KeywordTokenizer,
}

impl KeywordAnalyzer {
    /// Create a new keyword analyzer.
    pub fn new() -> Self {
        KeywordAnalyzer {
            tokenizer: KeywordTokenizer::new(),
        }
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &str {
        "keyword"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
