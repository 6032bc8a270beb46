//! Analyzers that combine char filters, a tokenizer and token filters.
//!
//! - [`pipeline::PipelineAnalyzer`] - Decomposable chain of named stages
//! - [`standard::StandardAnalyzer`] - Unicode words, lowercased
//! - [`whitespace::WhitespaceAnalyzer`] - Whitespace split only
//! - [`keyword::KeywordAnalyzer`] - Whole input as one token
//! - [`stop::StopAnalyzer`] - Letter runs, lowercased, stop words removed

pub mod analyzer;
pub mod keyword;
pub mod pipeline;
pub mod standard;
pub mod stop;
pub mod whitespace;

pub use analyzer::{AnalysisStream, Analyzer, StreamEnd};
pub use keyword::KeywordAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;
pub use stop::StopAnalyzer;
pub use whitespace::WhitespaceAnalyzer;
