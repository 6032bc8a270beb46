//! Text analysis building blocks.
//!
//! This module provides the stages an analysis chain is made of (char
//! filters, tokenizers and token filters), the [`Token`](token::Token) type
//! that flows between them, and the analyzers that compose them.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::analyzer::{AnalysisStream, Analyzer, StreamEnd};
pub use analyzer::pipeline::PipelineAnalyzer;
pub use token::{AttributeValue, Token, TokenStream, TokenType};
