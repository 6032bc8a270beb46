//! Analyze result types.
//!
//! Results serialize to the `_analyze` response shape: a flat `tokens`
//! array, or a `detail` object with one token list per stage.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::token::AttributeValue;

fn is_one(value: &usize) -> bool {
    *value == 1
}

/// A token as reported by an analyze call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyzeToken {
    /// The term text
    #[serde(rename = "token")]
    pub term: String,

    /// Start offset, continued across the texts of the request
    pub start_offset: usize,

    /// End offset, continued across the texts of the request
    pub end_offset: usize,

    /// Token type
    #[serde(rename = "type")]
    pub token_type: String,

    /// Position, continued across the texts of the request
    pub position: usize,

    /// Number of positions the token spans
    #[serde(rename = "positionLength", skip_serializing_if = "is_one")]
    pub position_length: usize,

    /// Extended attributes; only collected in explain mode
    #[serde(flatten)]
    pub attributes: Option<BTreeMap<String, AttributeValue>>,
}

/// Tokens emitted by one analyzer or one stage prefix.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AnalyzeTokenList {
    pub name: String,
    pub tokens: Vec<AnalyzeToken>,
}

impl AnalyzeTokenList {
    pub fn new<S: Into<String>>(name: S) -> Self {
        AnalyzeTokenList {
            name: name.into(),
            tokens: Vec::new(),
        }
    }

    /// The term texts, in emission order.
    pub fn terms(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.term.as_str()).collect()
    }
}

/// Output of one char filter, one entry per input text.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CharFilteredText {
    pub name: String,
    #[serde(rename = "filtered_text")]
    pub texts: Vec<String>,
}

/// Per-stage output of an explain call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DetailResult {
    /// Whether the stages of the chain are listed one by one
    pub custom_analyzer: bool,

    /// Output of an analyzer that cannot be decomposed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<AnalyzeTokenList>,

    #[serde(rename = "charfilters", skip_serializing_if = "Vec::is_empty")]
    pub char_filters: Vec<CharFilteredText>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<AnalyzeTokenList>,

    #[serde(rename = "tokenfilters", skip_serializing_if = "Vec::is_empty")]
    pub token_filters: Vec<AnalyzeTokenList>,
}

/// The result of an analyze call, mirroring the request's `explain` flag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisResult {
    #[serde(rename = "tokens")]
    Simple(Vec<AnalyzeToken>),
    Detail(DetailResult),
}

impl AnalysisResult {
    /// The flat token list of a simple result.
    pub fn tokens(&self) -> Option<&[AnalyzeToken]> {
        match self {
            AnalysisResult::Simple(tokens) => Some(tokens),
            AnalysisResult::Detail(_) => None,
        }
    }

    /// The per-stage output of an explain result.
    pub fn detail(&self) -> Option<&DetailResult> {
        match self {
            AnalysisResult::Simple(_) => None,
            AnalysisResult::Detail(detail) => Some(detail),
        }
    }
}
