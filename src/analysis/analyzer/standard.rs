//! Standard analyzer that provides good defaults for most use cases.
//!
//! This analyzer splits text on Unicode word boundaries and lowercases the
//! result. Stop words are kept unless a stop filter is configured.
//!
//! # Pipeline
//!
//! 1. StandardTokenizer (Unicode word boundaries)
//! 2. LowercaseFilter
//! 3. StopFilter (only with [`StandardAnalyzer::with_stop_words`])
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::analyzer::analyzer::Analyzer;
//! use sarissa_analyze::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new();
//! let tokens: Vec<_> = analyzer.token_stream("Hello the World").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[2].text, "world");
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::standard::StandardTokenizer;
use crate::error::Result;

/// A standard analyzer that provides good defaults for most use cases.
///
/// The inner chain is not exposed stage by stage; explain output reports
/// this analyzer as a single step.
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
    pub fn new() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(StandardTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("standard");

        StandardAnalyzer { inner: analyzer }
    }

    /// Create a new standard analyzer that also removes the given stop words.
    pub fn with_stop_words(stop_filter: StopFilter) -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(StandardTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter))
            .with_name("standard");

        StandardAnalyzer { inner: analyzer }
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Default for StandardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "standard"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
