//! Pipeline analyzer that combines char filters, a tokenizer and filters.
//!
//! This is the decomposable analyzer: besides running the whole chain it
//! exposes every stage under the name it was configured with, and can run
//! any prefix of the chain on its own.
//!
//! # Architecture
//!
//! The PipelineAnalyzer applies processing in this order:
//! 1. Char Filters: Rewrite the raw text
//! 2. Tokenizer: Splits text into tokens
//! 3. Token Filters: Applied sequentially in the order they were added
//!
//! Token offsets are mapped back through every char filter so that they
//! always refer to the original text.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::analyzer::analyzer::Analyzer;
//! use sarissa_analyze::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use sarissa_analyze::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//! use sarissa_analyze::analysis::token_filter::lowercase::LowercaseFilter;
//! use sarissa_analyze::analysis::token_filter::stop::StopFilter;
//! use std::sync::Arc;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])))
//!     .with_name("my_custom_analyzer");
//!
//! let tokens: Vec<_> = analyzer.token_stream("Hello THE world AND test").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[1].position_increment, 2);
//! assert_eq!(tokens[2].text, "test");
//! ```

use std::any::Any;
use std::sync::Arc;

use log::trace;

use crate::analysis::analyzer::analyzer::{AnalysisStream, Analyzer};
use crate::analysis::char_filter::{CharFilter, Transformation, correct_offset};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{AnalysisError, Result};

/// Default position gap of an ad-hoc chain.
pub const DEFAULT_POSITION_INCREMENT_GAP: usize = 0;

/// Default offset gap of an ad-hoc chain.
pub const DEFAULT_OFFSET_GAP: usize = 1;

/// A stage together with the name it is reported under.
pub struct NamedStage<T: ?Sized> {
    name: String,
    stage: Arc<T>,
}

impl<T: ?Sized> Clone for NamedStage<T> {
    fn clone(&self) -> Self {
        NamedStage {
            name: self.name.clone(),
            stage: Arc::clone(&self.stage),
        }
    }
}

impl<T: ?Sized> NamedStage<T> {
    pub fn new<S: Into<String>>(name: S, stage: Arc<T>) -> Self {
        NamedStage {
            name: name.into(),
            stage,
        }
    }

    /// The reported name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stage itself.
    pub fn stage(&self) -> &Arc<T> {
        &self.stage
    }
}

/// Text after the char filters of a chain have run over it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharFiltered {
    /// The fully filtered text.
    pub text: String,
    /// The text after each char filter, in chain order.
    pub snapshots: Vec<String>,
    /// The transformations each char filter made, in chain order.
    pub transformations: Vec<Vec<Transformation>>,
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: NamedStage<dyn Tokenizer>,
    char_filters: Vec<NamedStage<dyn CharFilter>>,
    filters: Vec<NamedStage<dyn Filter>>,
    name: String,
    position_increment_gap: usize,
    offset_gap: usize,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    ///
    /// The gaps come from the tokenizer when it declares them.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        let name = tokenizer.name();
        Self::with_named_tokenizer(name, tokenizer)
    }

    /// Create a new pipeline analyzer whose tokenizer is reported as `name`.
    pub fn with_named_tokenizer<S: Into<String>>(name: S, tokenizer: Arc<dyn Tokenizer>) -> Self {
        let name = name.into();
        PipelineAnalyzer {
            position_increment_gap: tokenizer
                .position_increment_gap()
                .unwrap_or(DEFAULT_POSITION_INCREMENT_GAP),
            offset_gap: tokenizer.offset_gap().unwrap_or(DEFAULT_OFFSET_GAP),
            name: format!("pipeline_{name}"),
            tokenizer: NamedStage::new(name, tokenizer),
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(self, char_filter: Arc<dyn CharFilter>) -> Self {
        let name = char_filter.name();
        self.add_named_char_filter(name, char_filter)
    }

    /// Add a char filter reported under `name`.
    pub fn add_named_char_filter<S: Into<String>>(
        mut self,
        name: S,
        char_filter: Arc<dyn CharFilter>,
    ) -> Self {
        self.char_filters.push(NamedStage::new(name, char_filter));
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(self, filter: Arc<dyn Filter>) -> Self {
        let name = filter.name();
        self.add_named_filter(name, filter)
    }

    /// Add a filter reported under `name`.
    pub fn add_named_filter<S: Into<String>>(mut self, name: S, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(NamedStage::new(name, filter));
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Override the gaps inserted between consecutive texts.
    pub fn with_gaps(mut self, position_increment_gap: usize, offset_gap: usize) -> Self {
        self.position_increment_gap = position_increment_gap;
        self.offset_gap = offset_gap;
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &NamedStage<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[NamedStage<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[NamedStage<dyn Filter>] {
        &self.filters
    }

    /// Run the char filters over `text`, keeping the output of each one.
    pub fn apply_char_filters(&self, text: &str) -> CharFiltered {
        let mut filtered = CharFiltered {
            text: text.to_string(),
            snapshots: Vec::with_capacity(self.char_filters.len()),
            transformations: Vec::with_capacity(self.char_filters.len()),
        };

        for char_filter in &self.char_filters {
            let (new_text, transformations) = char_filter.stage().filter(&filtered.text);
            filtered.snapshots.push(new_text.clone());
            filtered.text = new_text;
            filtered.transformations.push(transformations);
        }

        filtered
    }

    /// Raw stream of the char filters, the tokenizer and the first
    /// `filter_count` token filters.
    ///
    /// Offsets are corrected back to `text`.
    pub fn stacked_analyze(&self, text: &str, filter_count: usize) -> Result<TokenStream> {
        let filter_count = filter_count.min(self.filters.len());
        trace!(
            "running [{}] through tokenizer [{}] and {} filter(s)",
            self.name,
            self.tokenizer.name(),
            filter_count
        );

        let CharFiltered {
            text: filtered_text,
            transformations,
            ..
        } = self.apply_char_filters(text);

        let mut tokens = self
            .tokenizer
            .stage()
            .tokenize(&filtered_text)
            .map_err(|e| AnalysisError::stage_io(self.tokenizer.name(), e))?;
        for filter in &self.filters[..filter_count] {
            tokens = filter
                .stage()
                .filter(tokens)
                .map_err(|e| AnalysisError::stage_io(filter.name(), e))?;
        }

        if transformations.iter().all(|t| t.is_empty()) {
            return Ok(tokens);
        }

        // Final -> Filter N -> ... -> Filter 1 -> Original
        Ok(Box::new(tokens.map(move |mut token| {
            for step in transformations.iter().rev() {
                token.start_offset = correct_offset(token.start_offset, step);
                token.end_offset = correct_offset(token.end_offset, step);
            }
            token.end_offset = token.end_offset.max(token.start_offset);
            token
        })))
    }

    /// Stream of live tokens for a prefix of the chain.
    pub fn stacked_stream(&self, text: &str, filter_count: usize) -> Result<AnalysisStream> {
        let filter_count = filter_count.min(self.filters.len());
        let source = match filter_count {
            0 => self.tokenizer.name().to_string(),
            n => self.filters[n - 1].name().to_string(),
        };
        Ok(AnalysisStream::new(
            source,
            self.stacked_analyze(text, filter_count)?,
            text.len(),
        ))
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.stacked_analyze(text, self.filters.len())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn position_increment_gap(&self) -> usize {
        self.position_increment_gap
    }

    fn offset_gap(&self) -> usize {
        self.offset_gap
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self.char_filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field("position_increment_gap", &self.position_increment_gap)
            .field("offset_gap", &self.offset_gap)
            .finish()
    }
}
