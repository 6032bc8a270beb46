//! Error types for the analyze library.
//!
//! Every failure of an analyze call is represented by [`AnalysisError`]. All
//! variants are terminal for the request: nothing is retried and no partial
//! result is returned.
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::error::{AnalysisError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AnalysisError::invalid_request("texts must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;

use thiserror::Error;

/// The kind of pipeline stage a lookup or failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageKind {
    CharFilter,
    Tokenizer,
    TokenFilter,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            StageKind::CharFilter => "char filter",
            StageKind::Tokenizer => "tokenizer",
            StageKind::TokenFilter => "token filter",
        };
        f.write_str(kind)
    }
}

/// The main error type for analyze operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The requested analyzer does not exist in the applicable scope.
    #[error("failed to find {scope} analyzer [{name}]")]
    UnknownAnalyzer { name: String, scope: String },

    /// The requested normalizer does not exist in the index.
    #[error("failed to find normalizer under [{name}] in index [{index}]")]
    UnknownNormalizer { name: String, index: String },

    /// Normalizer or field based analysis was requested without an index.
    #[error("analysis based on a {what} requires an index")]
    MissingIndexContext { what: &'static str },

    /// Field based analysis was requested on a field that is not tokenized.
    #[error(
        "can't process field [{field}] of type [{field_type}], analysis requests are only supported on tokenized fields"
    )]
    UnsupportedFieldType { field: String, field_type: String },

    /// A token list grew beyond the configured maximum.
    #[error(
        "the number of tokens produced by [{stage}] for text [{text_index}] has exceeded the allowed maximum of [{max_token_count}]; this limit can be set by changing the [max_token_count] index setting"
    )]
    TokenCountExceeded {
        max_token_count: usize,
        stage: String,
        text_index: usize,
    },

    /// A stage failed while being constructed or while producing output.
    #[error("failed to analyze with [{stage}]: {source}")]
    StageIo {
        stage: String,
        #[source]
        source: anyhow::Error,
    },

    /// A stage name could not be resolved by the index or the registry.
    #[error("failed to find {kind} under [{name}]")]
    UnknownStage { kind: StageKind, name: String },

    /// The request itself is malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Index settings or global configuration are invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Stage-level analysis errors (bad patterns, bad parameters, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (settings files, CLI output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with AnalysisError.
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Create a new stage-level analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        AnalysisError::Analysis(msg.into())
    }

    /// Create a new invalid request error.
    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        AnalysisError::InvalidRequest(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        AnalysisError::InvalidConfig(msg.into())
    }

    /// Wrap a failure raised by the stage named `stage`.
    ///
    /// Errors that are already terminal request errors (an exceeded token
    /// count or a previously wrapped stage failure) pass through unchanged.
    pub fn stage_io<S: Into<String>>(stage: S, err: AnalysisError) -> Self {
        match err {
            err @ (AnalysisError::StageIo { .. }
            | AnalysisError::TokenCountExceeded { .. }
            | AnalysisError::UnknownStage { .. }) => err,
            other => AnalysisError::StageIo {
                stage: stage.into(),
                source: anyhow::Error::new(other),
            },
        }
    }

    /// Create a new unknown stage error.
    pub fn unknown_stage<S: Into<String>>(kind: StageKind, name: S) -> Self {
        AnalysisError::UnknownStage {
            kind,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = AnalysisError::analysis("Invalid regex pattern");
        assert_eq!(error.to_string(), "Analysis error: Invalid regex pattern");

        let error = AnalysisError::MissingIndexContext { what: "normalizer" };
        assert_eq!(
            error.to_string(),
            "analysis based on a normalizer requires an index"
        );

        let error = AnalysisError::unknown_stage(StageKind::TokenFilter, "nope");
        assert_eq!(error.to_string(), "failed to find token filter under [nope]");
    }

    #[test]
    fn test_stage_io_wraps_once() {
        let wrapped = AnalysisError::stage_io("pattern", AnalysisError::analysis("bad"));
        match &wrapped {
            AnalysisError::StageIo { stage, .. } => assert_eq!(stage, "pattern"),
            other => panic!("Expected StageIo, got {other:?}"),
        }

        let rewrapped = AnalysisError::stage_io("outer", wrapped);
        match rewrapped {
            AnalysisError::StageIo { stage, .. } => assert_eq!(stage, "pattern"),
            other => panic!("Expected StageIo, got {other:?}"),
        }
    }

    #[test]
    fn test_token_count_passes_through() {
        let err = AnalysisError::TokenCountExceeded {
            max_token_count: 2,
            stage: "whitespace".to_string(),
            text_index: 0,
        };
        match AnalysisError::stage_io("lowercase", err) {
            AnalysisError::TokenCountExceeded { max_token_count, .. } => {
                assert_eq!(max_token_count, 2)
            }
            other => panic!("Expected TokenCountExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        match AnalysisError::from(io_error) {
            AnalysisError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
