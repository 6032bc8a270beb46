//! Index-scoped analysis context.
//!
//! An [`IndexContext`] is what an index contributes to an analyze call: its
//! own analyzers and normalizers, its named stage definitions, its field
//! mappings and its token cap. It is built once from [`IndexSettings`] and
//! shared read-only by every request against the index.

use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, warn};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::keyword::KeywordAnalyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::keyword::KeywordTokenizer;
use crate::analyze::chain::{DEFAULT_TOKENIZER, StageChainBuilder};
use crate::analyze::registry::StageRegistry;
use crate::analyze::request::StageSpec;
use crate::config::{
    AnalysisSettings, AnalyzerDefinition, DEFAULT_ANALYZER_NAME,
    DEFAULT_INDEX_POSITION_INCREMENT_GAP, FieldMapping, IndexSettings, NormalizerDefinition,
};
use crate::error::{AnalysisError, Result, StageKind};

/// Named stage definitions of an index.
#[derive(Clone, Debug, Default)]
pub struct StageDefinitions {
    tokenizers: AHashMap<String, StageSpec>,
    char_filters: AHashMap<String, StageSpec>,
    token_filters: AHashMap<String, StageSpec>,
}

impl StageDefinitions {
    pub fn from_settings(analysis: &AnalysisSettings) -> Self {
        let collect = |defs: &std::collections::BTreeMap<String, StageSpec>| {
            defs.iter()
                .map(|(name, spec)| (name.clone(), spec.clone()))
                .collect::<AHashMap<_, _>>()
        };

        StageDefinitions {
            tokenizers: collect(&analysis.tokenizer),
            char_filters: collect(&analysis.char_filter),
            token_filters: collect(&analysis.filter),
        }
    }

    fn map(&self, kind: StageKind) -> &AHashMap<String, StageSpec> {
        match kind {
            StageKind::CharFilter => &self.char_filters,
            StageKind::Tokenizer => &self.tokenizers,
            StageKind::TokenFilter => &self.token_filters,
        }
    }

    pub fn get(&self, kind: StageKind, name: &str) -> Option<&StageSpec> {
        self.map(kind).get(name)
    }

    pub fn insert<S: Into<String>>(&mut self, kind: StageKind, name: S, spec: StageSpec) {
        let map = match kind {
            StageKind::CharFilter => &mut self.char_filters,
            StageKind::Tokenizer => &mut self.tokenizers,
            StageKind::TokenFilter => &mut self.token_filters,
        };
        map.insert(name.into(), spec);
    }

    pub fn len(&self) -> usize {
        self.tokenizers.len() + self.char_filters.len() + self.token_filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a mapped field is analyzed.
#[derive(Clone)]
pub enum FieldKind {
    /// A tokenized string field.
    Text(Arc<dyn Analyzer>),
    /// An untokenized string field, analyzed by its normalizer.
    Keyword(Arc<dyn Analyzer>),
    /// Any other field type; analyze calls on it fail.
    Other(String),
}

impl FieldKind {
    /// The mapping type name.
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Text(_) => "text",
            FieldKind::Keyword(_) => "keyword",
            FieldKind::Other(field_type) => field_type,
        }
    }

    /// The index-time analyzer of a string field.
    pub fn analyzer(&self) -> Option<&Arc<dyn Analyzer>> {
        match self {
            FieldKind::Text(analyzer) | FieldKind::Keyword(analyzer) => Some(analyzer),
            FieldKind::Other(_) => None,
        }
    }
}

impl std::fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.analyzer() {
            Some(analyzer) => write!(f, "{}({})", self.type_name(), analyzer.name()),
            None => write!(f, "{}", self.type_name()),
        }
    }
}

/// Analysis components and mappings of one index.
pub struct IndexContext {
    name: String,
    analyzers: AHashMap<String, Arc<dyn Analyzer>>,
    normalizers: AHashMap<String, Arc<dyn Analyzer>>,
    definitions: StageDefinitions,
    fields: AHashMap<String, FieldKind>,
    max_token_count: Option<usize>,
}

fn lowercase_normalizer() -> Arc<dyn Analyzer> {
    Arc::new(
        PipelineAnalyzer::with_named_tokenizer(DEFAULT_TOKENIZER, Arc::new(KeywordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("lowercase"),
    )
}

impl IndexContext {
    /// Create an index with no analysis settings and no mappings.
    pub fn new<S: Into<String>>(name: S) -> Self {
        let mut normalizers = AHashMap::new();
        normalizers.insert("lowercase".to_string(), lowercase_normalizer());

        IndexContext {
            name: name.into(),
            analyzers: AHashMap::new(),
            normalizers,
            definitions: StageDefinitions::default(),
            fields: AHashMap::new(),
            max_token_count: None,
        }
    }

    /// Build the context of index `name` from its settings.
    ///
    /// Every analyzer, normalizer and field mapping is validated here, so a
    /// context that builds can serve any request.
    pub fn from_settings<S: Into<String>>(
        name: S,
        settings: &IndexSettings,
        registry: &dyn StageRegistry,
    ) -> Result<Self> {
        let mut context = Self::new(name);

        if settings.max_token_count == Some(0) {
            return Err(AnalysisError::invalid_config(format!(
                "[max_token_count] of index [{}] must be greater than 0",
                context.name
            )));
        }
        context.max_token_count = settings.max_token_count;
        context.definitions = StageDefinitions::from_settings(&settings.analysis);

        for (name, definition) in &settings.analysis.analyzer {
            let analyzer = context.build_analyzer(name, definition, registry)?;
            context.analyzers.insert(name.clone(), analyzer);
        }

        for (name, definition) in &settings.analysis.normalizer {
            let normalizer = context.build_normalizer(name, definition, registry)?;
            context.normalizers.insert(name.clone(), normalizer);
        }

        for (field, mapping) in &settings.mappings.properties {
            let kind = context.build_field(field, mapping, registry)?;
            context.fields.insert(field.clone(), kind);
        }

        debug!(
            "built index [{}]: {} analyzer(s), {} normalizer(s), {} stage definition(s), {} field(s)",
            context.name,
            context.analyzers.len(),
            context.normalizers.len(),
            context.definitions.len(),
            context.fields.len()
        );
        Ok(context)
    }

    fn build_analyzer(
        &self,
        name: &str,
        definition: &AnalyzerDefinition,
        registry: &dyn StageRegistry,
    ) -> Result<Arc<dyn Analyzer>> {
        if definition.kind != "custom" {
            return registry.analyzer(&definition.kind).ok_or_else(|| {
                AnalysisError::invalid_config(format!(
                    "analyzer [{name}] has unknown type [{}]",
                    definition.kind
                ))
            });
        }

        let tokenizer = definition.tokenizer.as_ref().ok_or_else(|| {
            AnalysisError::invalid_config(format!("custom analyzer [{name}] must specify a tokenizer"))
        })?;

        let chain = StageChainBuilder::new(registry)
            .with_definitions(Some(&self.definitions))
            .with_gaps(
                definition
                    .position_increment_gap
                    .unwrap_or(DEFAULT_INDEX_POSITION_INCREMENT_GAP),
                definition.offset_gap.unwrap_or(1),
            )
            .with_name(name)
            .build(&definition.char_filter, Some(tokenizer), &definition.filter)
            .map_err(|e| {
                AnalysisError::invalid_config(format!("failed to build analyzer [{name}]: {e}"))
            })?;

        Ok(Arc::new(chain))
    }

    fn build_normalizer(
        &self,
        name: &str,
        definition: &NormalizerDefinition,
        registry: &dyn StageRegistry,
    ) -> Result<Arc<dyn Analyzer>> {
        let chain = StageChainBuilder::new(registry)
            .with_definitions(Some(&self.definitions))
            .with_name(name)
            .build(&definition.char_filter, None, &definition.filter)
            .map_err(|e| {
                AnalysisError::invalid_config(format!("failed to build normalizer [{name}]: {e}"))
            })?;

        if let Some(stage) = chain.char_filters().iter().find(|s| !s.stage().normalizes()) {
            return Err(AnalysisError::invalid_config(format!(
                "custom normalizer [{name}] may not use char filter [{}]",
                stage.name()
            )));
        }
        if let Some(stage) = chain.filters().iter().find(|s| !s.stage().normalizes()) {
            return Err(AnalysisError::invalid_config(format!(
                "custom normalizer [{name}] may not use filter [{}]",
                stage.name()
            )));
        }

        Ok(Arc::new(chain))
    }

    fn build_field(
        &self,
        field: &str,
        mapping: &FieldMapping,
        registry: &dyn StageRegistry,
    ) -> Result<FieldKind> {
        match mapping.field_type.as_str() {
            "text" => {
                if mapping.normalizer.is_some() {
                    warn!("normalizer of text field [{field}] in index [{}] is ignored", self.name);
                }
                let analyzer = match &mapping.analyzer {
                    Some(name) => self.analyzer(name).or_else(|| registry.analyzer(name)).ok_or_else(
                        || {
                            AnalysisError::invalid_config(format!(
                                "analyzer [{name}] of field [{field}] not found"
                            ))
                        },
                    )?,
                    None => self.default_analyzer(registry),
                };
                Ok(FieldKind::Text(analyzer))
            }
            "keyword" => {
                if mapping.analyzer.is_some() {
                    warn!("analyzer of keyword field [{field}] in index [{}] is ignored", self.name);
                }
                let analyzer = match &mapping.normalizer {
                    Some(name) => self.normalizer(name).ok_or_else(|| {
                        AnalysisError::invalid_config(format!(
                            "normalizer [{name}] of field [{field}] not found"
                        ))
                    })?,
                    None => registry
                        .analyzer("keyword")
                        .unwrap_or_else(|| Arc::new(KeywordAnalyzer::new())),
                };
                Ok(FieldKind::Keyword(analyzer))
            }
            other => Ok(FieldKind::Other(other.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// An analyzer defined by this index.
    pub fn analyzer(&self, name: &str) -> Option<Arc<dyn Analyzer>> {
        self.analyzers.get(name).cloned()
    }

    /// A normalizer defined by this index, or the built-in `lowercase`.
    pub fn normalizer(&self, name: &str) -> Option<Arc<dyn Analyzer>> {
        self.normalizers.get(name).cloned()
    }

    /// The mapping of a field, if the field is mapped.
    pub fn field(&self, name: &str) -> Option<&FieldKind> {
        self.fields.get(name)
    }

    /// The analyzer named `default`, else the registry's `standard`.
    pub fn default_analyzer(&self, registry: &dyn StageRegistry) -> Arc<dyn Analyzer> {
        self.analyzer(DEFAULT_ANALYZER_NAME)
            .or_else(|| registry.analyzer("standard"))
            .unwrap_or_else(|| Arc::new(StandardAnalyzer::new()))
    }

    pub fn definitions(&self) -> &StageDefinitions {
        &self.definitions
    }

    /// Token cap set by the index, if any.
    pub fn max_token_count(&self) -> Option<usize> {
        self.max_token_count
    }
}

impl std::fmt::Debug for IndexContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut analyzers: Vec<_> = self.analyzers.keys().collect();
        analyzers.sort();
        let mut normalizers: Vec<_> = self.normalizers.keys().collect();
        normalizers.sort();

        f.debug_struct("IndexContext")
            .field("name", &self.name)
            .field("analyzers", &analyzers)
            .field("normalizers", &normalizers)
            .field("fields", &self.fields)
            .field("max_token_count", &self.max_token_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::registry::BuiltinRegistry;

    fn settings(json: &str) -> IndexSettings {
        IndexSettings::from_json_str(json).unwrap()
    }

    #[test]
    fn test_empty_index() {
        let registry = BuiltinRegistry::new().unwrap();
        let context = IndexContext::from_settings("idx", &IndexSettings::default(), &registry).unwrap();

        assert_eq!(context.name(), "idx");
        assert!(context.normalizer("lowercase").is_some());
        assert_eq!(context.default_analyzer(&registry).name(), "standard");
        assert_eq!(context.max_token_count(), None);
    }

    #[test]
    fn test_custom_analyzer_gaps() {
        let registry = BuiltinRegistry::new().unwrap();
        let context = IndexContext::from_settings(
            "idx",
            &settings(
                r#"{"analysis": {"analyzer": {
                    "default": {"tokenizer": "whitespace", "filter": ["lowercase"]},
                    "tight": {"tokenizer": "whitespace", "position_increment_gap": 0}
                }}}"#,
            ),
            &registry,
        )
        .unwrap();

        let default = context.default_analyzer(&registry);
        assert_eq!(default.name(), "default");
        assert_eq!(default.position_increment_gap(), 100);
        assert_eq!(context.analyzer("tight").unwrap().position_increment_gap(), 0);
    }

    #[test]
    fn test_normalizer_rejects_tokenizing_filters() {
        let registry = BuiltinRegistry::new().unwrap();
        let result = IndexContext::from_settings(
            "idx",
            &settings(r#"{"analysis": {"normalizer": {"bad": {"filter": ["stop"]}}}}"#),
            &registry,
        );

        match result {
            Err(AnalysisError::InvalidConfig(msg)) => assert!(msg.contains("[stop]")),
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_field_mappings() {
        let registry = BuiltinRegistry::new().unwrap();
        let context = IndexContext::from_settings(
            "idx",
            &settings(
                r#"{"mappings": {"properties": {
                    "title": {"type": "text", "analyzer": "whitespace"},
                    "tag": {"type": "keyword", "normalizer": "lowercase"},
                    "count": {"type": "long"}
                }}}"#,
            ),
            &registry,
        )
        .unwrap();

        assert_eq!(context.field("title").unwrap().analyzer().unwrap().name(), "whitespace");
        assert_eq!(context.field("tag").unwrap().analyzer().unwrap().name(), "lowercase");
        assert_eq!(context.field("count").unwrap().type_name(), "long");
        assert!(context.field("missing").is_none());
    }

    #[test]
    fn test_unknown_field_analyzer() {
        let registry = BuiltinRegistry::new().unwrap();
        let result = IndexContext::from_settings(
            "idx",
            &settings(r#"{"mappings": {"properties": {"t": {"type": "text", "analyzer": "nope"}}}}"#),
            &registry,
        );
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_max_token_count() {
        let registry = BuiltinRegistry::new().unwrap();
        let result = IndexContext::from_settings("idx", &settings(r#"{"max_token_count": 0}"#), &registry);
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }
}
