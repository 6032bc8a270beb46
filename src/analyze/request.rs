//! Analyze request types.
//!
//! An [`AnalyzeRequest`] is deserialized from the same JSON shape the
//! `_analyze` endpoint of Elasticsearch-like engines accepts:
//!
//! ```
//! use sarissa_analyze::analyze::request::{AnalyzeRequest, StageSpec};
//!
//! let request: AnalyzeRequest = serde_json::from_str(r#"{
//!     "text": ["Quick fox"],
//!     "tokenizer": "whitespace",
//!     "filter": ["lowercase", {"type": "stop", "stopwords": ["fox"]}],
//!     "explain": true
//! }"#).unwrap();
//!
//! assert_eq!(request.tokenizer, Some(StageSpec::from("whitespace")));
//! assert_eq!(request.token_filters[1].name(), "stop");
//! assert!(request.is_custom());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{AnalysisError, Result};

/// A reference to a pipeline stage.
///
/// Either the name of a stage known to the index or the registry, or an
/// inline definition whose `type` names the registry constructor and whose
/// other keys are its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStageSpec", into = "RawStageSpec")]
pub enum StageSpec {
    /// A named stage.
    Name(String),
    /// An inline definition.
    Definition {
        kind: String,
        params: Map<String, Value>,
    },
}

impl StageSpec {
    /// Create an inline definition.
    pub fn definition<S: Into<String>>(kind: S, params: Map<String, Value>) -> Self {
        StageSpec::Definition {
            kind: kind.into(),
            params,
        }
    }

    /// The stage name, or the constructor type of an inline definition.
    pub fn name(&self) -> &str {
        match self {
            StageSpec::Name(name) => name,
            StageSpec::Definition { kind, .. } => kind,
        }
    }

    /// Parameters of an inline definition.
    pub fn params(&self) -> Option<&Map<String, Value>> {
        match self {
            StageSpec::Name(_) => None,
            StageSpec::Definition { params, .. } => Some(params),
        }
    }
}

impl From<&str> for StageSpec {
    fn from(name: &str) -> Self {
        StageSpec::Name(name.to_string())
    }
}

impl From<String> for StageSpec {
    fn from(name: String) -> Self {
        StageSpec::Name(name)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawStageSpec {
    Name(String),
    Definition(Map<String, Value>),
}

impl TryFrom<RawStageSpec> for StageSpec {
    type Error = String;

    fn try_from(raw: RawStageSpec) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawStageSpec::Name(name) => Ok(StageSpec::Name(name)),
            RawStageSpec::Definition(mut params) => match params.remove("type") {
                Some(Value::String(kind)) => Ok(StageSpec::Definition { kind, params }),
                Some(other) => Err(format!("stage [type] must be a string, got {other}")),
                None => Err("stage definition is missing [type]".to_string()),
            },
        }
    }
}

impl From<StageSpec> for RawStageSpec {
    fn from(spec: StageSpec) -> Self {
        match spec {
            StageSpec::Name(name) => RawStageSpec::Name(name),
            StageSpec::Definition { kind, mut params } => {
                params.insert("type".to_string(), Value::String(kind));
                RawStageSpec::Definition(params)
            }
        }
    }
}

/// A request to analyze one or more texts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    /// Index whose analyzers, normalizers and mappings are in scope
    pub index: Option<String>,

    /// Texts to analyze, in order
    #[serde(rename = "text", deserialize_with = "one_or_many")]
    pub texts: Vec<String>,

    /// Named analyzer
    pub analyzer: Option<String>,

    /// Named normalizer
    pub normalizer: Option<String>,

    /// Field whose index-time analyzer is used
    pub field: Option<String>,

    /// Tokenizer of a custom chain
    pub tokenizer: Option<StageSpec>,

    /// Char filters of a custom chain
    #[serde(rename = "char_filter")]
    pub char_filters: Vec<StageSpec>,

    /// Token filters of a custom chain
    #[serde(rename = "filter")]
    pub token_filters: Vec<StageSpec>,

    /// Report the output of every stage
    pub explain: bool,

    /// Extended attributes to report in explain mode; empty reports all
    pub attributes: Vec<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(text) => vec![text],
        OneOrMany::Many(texts) => texts,
    })
}

impl AnalyzeRequest {
    /// Create a request over the given texts.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnalyzeRequest {
            texts: texts.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_index<S: Into<String>>(mut self, index: S) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_analyzer<S: Into<String>>(mut self, analyzer: S) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_normalizer<S: Into<String>>(mut self, normalizer: S) -> Self {
        self.normalizer = Some(normalizer.into());
        self
    }

    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_tokenizer<S: Into<StageSpec>>(mut self, tokenizer: S) -> Self {
        self.tokenizer = Some(tokenizer.into());
        self
    }

    pub fn add_char_filter<S: Into<StageSpec>>(mut self, char_filter: S) -> Self {
        self.char_filters.push(char_filter.into());
        self
    }

    pub fn add_token_filter<S: Into<StageSpec>>(mut self, token_filter: S) -> Self {
        self.token_filters.push(token_filter.into());
        self
    }

    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the request describes its own chain.
    pub fn is_custom(&self) -> bool {
        self.tokenizer.is_some() || !self.char_filters.is_empty() || !self.token_filters.is_empty()
    }

    /// Check the request before any stage is resolved.
    pub fn validate(&self) -> Result<()> {
        if self.texts.is_empty() {
            return Err(AnalysisError::invalid_request("text is missing"));
        }
        Ok(())
    }
}
