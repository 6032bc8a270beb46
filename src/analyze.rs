//! The analyze core: resolves a request to a pipeline and runs it.
//!
//! ```text
//! AnalyzeRequest → PipelineResolver → (StageChainBuilder) → SimpleExecutor
//!                                                         → DetailExecutor
//! ```
//!
//! Nothing is shared between calls beyond the read-only registry and index
//! contexts.

pub mod accumulator;
pub mod attributes;
pub mod chain;
pub mod context;
pub mod counter;
pub mod detail;
pub mod registry;
pub mod request;
pub mod resolver;
pub mod response;
pub mod service;
pub mod simple;

pub use context::IndexContext;
pub use registry::{BuiltinRegistry, StageRegistry};
pub use request::{AnalyzeRequest, StageSpec};
pub use response::{AnalysisResult, AnalyzeToken, AnalyzeTokenList, DetailResult};
pub use service::{AnalyzeService, analyze};
