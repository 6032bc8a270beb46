//! Configuration types.
//!
//! [`AnalyzeConfig`] holds the global settings used when no index is in
//! scope. [`IndexSettings`] describes one index: its token cap, its analysis
//! components and its field mappings, in the JSON shape of Elasticsearch
//! index settings:
//!
//! ```
//! use sarissa_analyze::config::IndexSettings;
//!
//! let settings = IndexSettings::from_json_str(r#"{
//!     "max_token_count": 500,
//!     "analysis": {
//!         "analyzer": {
//!             "folded": {"tokenizer": "standard", "filter": ["lowercase"]}
//!         },
//!         "normalizer": {
//!             "upper": {"filter": ["uppercase"]}
//!         }
//!     },
//!     "mappings": {
//!         "properties": {
//!             "title": {"type": "text", "analyzer": "folded"},
//!             "tag": {"type": "keyword", "normalizer": "upper"}
//!         }
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(settings.max_token_count, Some(500));
//! assert_eq!(settings.mappings.properties["tag"].field_type, "keyword");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyze::request::StageSpec;
use crate::error::{AnalysisError, Result};

/// Token cap used when neither the index nor the caller sets one.
pub const DEFAULT_MAX_TOKEN_COUNT: usize = 10_000;

/// Position gap of index-configured custom analyzers.
pub const DEFAULT_INDEX_POSITION_INCREMENT_GAP: usize = 100;

/// Name of the analyzer that becomes the index default.
pub const DEFAULT_ANALYZER_NAME: &str = "default";

/// Global analyze settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Maximum number of tokens in one token list
    pub max_token_count: usize,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        AnalyzeConfig {
            max_token_count: DEFAULT_MAX_TOKEN_COUNT,
        }
    }
}

impl AnalyzeConfig {
    /// Load the configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: AnalyzeConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_token_count == 0 {
            return Err(AnalysisError::invalid_config(
                "max_token_count must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Settings of one index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Maximum number of tokens in one token list; the global value applies
    /// when unset
    pub max_token_count: Option<usize>,

    /// Analysis components defined by the index
    pub analysis: AnalysisSettings,

    /// Field mappings
    pub mappings: Mappings,
}

impl IndexSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load index settings from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// Named analysis components of an index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub analyzer: BTreeMap<String, AnalyzerDefinition>,
    pub normalizer: BTreeMap<String, NormalizerDefinition>,
    pub tokenizer: BTreeMap<String, StageSpec>,
    pub char_filter: BTreeMap<String, StageSpec>,
    pub filter: BTreeMap<String, StageSpec>,
}

/// An analyzer defined by an index.
///
/// `custom` analyzers are built from the listed stages; any other type
/// names a global analyzer that is made available under a new name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub tokenizer: Option<StageSpec>,
    pub char_filter: Vec<StageSpec>,
    pub filter: Vec<StageSpec>,
    pub position_increment_gap: Option<usize>,
    pub offset_gap: Option<usize>,
}

impl Default for AnalyzerDefinition {
    fn default() -> Self {
        AnalyzerDefinition {
            kind: "custom".to_string(),
            tokenizer: None,
            char_filter: Vec::new(),
            filter: Vec::new(),
            position_increment_gap: None,
            offset_gap: None,
        }
    }
}

/// A normalizer defined by an index: a keyword tokenizer followed by
/// normalizing char filters and token filters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerDefinition {
    pub char_filter: Vec<StageSpec>,
    pub filter: Vec<StageSpec>,
}

/// Field mappings of an index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mappings {
    pub properties: BTreeMap<String, FieldMapping>,
}

/// Mapping of one field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub analyzer: Option<String>,
    #[serde(default)]
    pub normalizer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn test_analyze_config_default() {
        let config = AnalyzeConfig::default();
        assert_eq!(config.max_token_count, DEFAULT_MAX_TOKEN_COUNT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analyze_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_token_count": 0}}"#).unwrap();

        match AnalyzeConfig::from_file(file.path()) {
            Err(AnalysisError::InvalidConfig(_)) => {}
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_analyzer_definition_defaults_to_custom() {
        let settings = IndexSettings::from_json_str(
            r#"{"analysis": {"analyzer": {"a": {"tokenizer": "whitespace"}}}}"#,
        )
        .unwrap();

        let definition = &settings.analysis.analyzer["a"];
        assert_eq!(definition.kind, "custom");
        assert_eq!(definition.tokenizer, Some(StageSpec::from("whitespace")));
        assert_eq!(settings.max_token_count, None);
    }

    #[test]
    fn test_stage_definitions() {
        let settings = IndexSettings::from_json_str(
            r#"{"analysis": {"filter": {"my_stop": {"type": "stop", "stopwords": ["x"]}}}}"#,
        )
        .unwrap();

        assert_eq!(settings.analysis.filter["my_stop"].name(), "stop");
    }
}
