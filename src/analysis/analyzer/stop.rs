//! Stop analyzer: letter runs, lowercased, with English stop words removed.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::analyzer::analyzer::Analyzer;
//! use sarissa_analyze::analysis::analyzer::stop::StopAnalyzer;
//!
//! let analyzer = StopAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.token_stream("The 2 QUICK foxes").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "quick");
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::pattern::PatternTokenizer;
use crate::error::Result;

/// Anything that is not a letter separates tokens.
const LETTER_SEPARATOR: &str = r"\P{L}+";

/// An analyzer that keeps letter runs and removes stop words.
pub struct StopAnalyzer {
    inner: PipelineAnalyzer,
}

impl StopAnalyzer {
    /// Create a new stop analyzer with the default English stop words.
    pub fn new() -> Result<Self> {
        Self::with_stop_filter(StopFilter::new())
    }

    /// Create a new stop analyzer with a custom stop filter.
    pub fn with_stop_filter(stop_filter: StopFilter) -> Result<Self> {
        let tokenizer = Arc::new(PatternTokenizer::split_on(LETTER_SEPARATOR)?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter))
            .with_name("stop");

        Ok(StopAnalyzer { inner: analyzer })
    }
}

impl Analyzer for StopAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "stop"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for StopAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stop_analyzer() {
        let analyzer = StopAnalyzer::new().unwrap();

        let tokens: Vec<Token> = analyzer.token_stream("a fox, and the dog").unwrap().collect();

        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["fox", "dog"]);
        assert_eq!(tokens[0].position_increment, 2);
        assert_eq!(tokens[1].position_increment, 3);
    }

    #[test]
    fn test_trailing_stop_word_leaves_final_increment() {
        let analyzer = StopAnalyzer::new().unwrap();
        let mut stream = analyzer.token_stream("fox the").unwrap();
        assert_eq!(stream.next().unwrap().text, "fox");
        assert_eq!(stream.end().final_position_increment, 1);
    }
}
