//! # sarissa-analyze
//!
//! Runs text through analysis pipelines and reports the tokens they
//! produce, the way a search engine's `_analyze` endpoint does.
//!
//! ## Features
//!
//! - Named analyzers, index normalizers and field mappings
//! - Ad-hoc chains of char filters, a tokenizer and token filters
//! - Per-stage explain output with selected token attributes
//! - Offsets corrected back to the original text across char filters
//! - A cap on the number of tokens per token list
//!
//! ```
//! use sarissa_analyze::analyze::{AnalyzeRequest, AnalyzeService};
//! use sarissa_analyze::config::AnalyzeConfig;
//!
//! let service = AnalyzeService::with_builtins(AnalyzeConfig::default()).unwrap();
//! let request = AnalyzeRequest::new(["The Quick fox"]).with_analyzer("stop");
//!
//! let result = service.analyze(&request).unwrap();
//! let terms: Vec<_> = result.tokens().unwrap().iter().map(|t| t.term.as_str()).collect();
//! assert_eq!(terms, vec!["quick", "fox"]);
//! ```

pub mod analysis;
pub mod analyze;
pub mod cli;
pub mod config;
pub mod error;

pub mod prelude {
    pub use crate::analysis::{Analyzer, PipelineAnalyzer, Token, TokenStream};
    pub use crate::analyze::{AnalysisResult, AnalyzeRequest, AnalyzeService, StageSpec};
    pub use crate::config::{AnalyzeConfig, IndexSettings};
    pub use crate::error::{AnalysisError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
