//! Core analyzer trait definition.
//!
//! This module defines the [`Analyzer`] trait and the [`AnalysisStream`] an
//! analyzer hands out for one text.
//!
//! # Role in Analysis Pipeline
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 … Filter N → AnalysisStream
//! ```
//!
//! Filters mark removed tokens as stopped. The [`AnalysisStream`] drops them
//! and adds their position increments to the next live token, or to the
//! final position increment reported by [`AnalysisStream::end`].
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::analyzer::analyzer::Analyzer;
//! use sarissa_analyze::analysis::analyzer::stop::StopAnalyzer;
//!
//! let analyzer = StopAnalyzer::new().unwrap();
//! let mut stream = analyzer.token_stream("the quick fox").unwrap();
//!
//! let quick = stream.next().unwrap();
//! assert_eq!(quick.text, "quick");
//! assert_eq!(quick.position_increment, 2);
//!
//! while stream.next().is_some() {}
//! let end = stream.end();
//! assert_eq!(end.final_offset, 13);
//! ```

use std::any::Any;

use log::trace;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so that a resolved analyzer can be
/// shared by concurrent requests.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return the raw token stream.
    ///
    /// Tokens removed by a filter are still present, marked stopped. Offsets
    /// refer to `text`.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer.
    fn name(&self) -> &str;

    /// Provide access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Positions inserted between consecutive texts of one request.
    fn position_increment_gap(&self) -> usize {
        0
    }

    /// Offset inserted between consecutive texts of one request.
    fn offset_gap(&self) -> usize {
        1
    }

    /// Open a stream over `text` that yields live tokens only.
    fn token_stream(&self, text: &str) -> Result<AnalysisStream> {
        Ok(AnalysisStream::new(self.name(), self.analyze(text)?, text.len()))
    }
}

/// End-of-stream state of an [`AnalysisStream`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamEnd {
    /// End offset of the stream in original-text coordinates.
    pub final_offset: usize,
    /// Position increment left over by trailing stopped tokens.
    pub final_position_increment: usize,
}

/// A stream of live tokens over one text.
///
/// The stream is released when dropped, whether or not it was consumed.
pub struct AnalysisStream {
    source: String,
    tokens: TokenStream,
    final_offset: usize,
    pending_increment: usize,
}

impl AnalysisStream {
    /// Wrap a raw token stream. `final_offset` is the length of the text the
    /// stream was opened over.
    pub fn new<S: Into<String>>(source: S, tokens: TokenStream, final_offset: usize) -> Self {
        let source = source.into();
        trace!("opened token stream for [{source}]");
        AnalysisStream {
            source,
            tokens,
            final_offset,
            pending_increment: 0,
        }
    }

    /// Name of the analyzer or stage prefix that produced this stream.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Consume the rest of the stream and report its end state.
    pub fn end(mut self) -> StreamEnd {
        while self.next().is_some() {}
        StreamEnd {
            final_offset: self.final_offset,
            final_position_increment: self.pending_increment,
        }
    }
}

impl Iterator for AnalysisStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        for mut token in self.tokens.by_ref() {
            if token.is_stopped() {
                self.pending_increment += token.position_increment;
                continue;
            }
            token.position_increment += self.pending_increment;
            self.pending_increment = 0;
            return Some(token);
        }
        None
    }
}

impl Drop for AnalysisStream {
    fn drop(&mut self) {
        trace!("released token stream for [{}]", self.source);
    }
}

impl std::fmt::Debug for AnalysisStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisStream")
            .field("source", &self.source)
            .field("final_offset", &self.final_offset)
            .field("pending_increment", &self.pending_increment)
            .finish()
    }
}
