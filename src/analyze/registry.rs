//! Stage registry: resolves stage names to stage instances.
//!
//! The executor only sees the [`StageRegistry`] trait. [`BuiltinRegistry`]
//! is the in-process implementation; it ships the stages listed below and
//! accepts additional constructors at runtime.
//!
//! | kind         | built-in names                                                      |
//! |--------------|---------------------------------------------------------------------|
//! | tokenizer    | `whitespace`, `keyword`, `standard`, `pattern`                      |
//! | char filter  | `mapping`, `pattern_replace`                                        |
//! | token filter | `lowercase`, `uppercase`, `stop`, `limit`, `trim`, `remove_empty`, `keyword_marker` |
//! | analyzer     | `standard`, `whitespace`, `keyword`, `stop`                         |
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analyze::registry::{BuiltinRegistry, StageParams, StageRegistry};
//! use serde_json::{Map, json};
//!
//! let registry = BuiltinRegistry::new().unwrap();
//! let params: Map<_, _> = json!({"max_token_count": 2}).as_object().cloned().unwrap();
//!
//! let filter = registry.token_filter("limit", &StageParams::new(&params)).unwrap();
//! assert!(filter.is_some());
//! assert!(registry.analyzer("standard").is_some());
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::keyword::KeywordAnalyzer;
use crate::analysis::analyzer::pipeline::{DEFAULT_OFFSET_GAP, DEFAULT_POSITION_INCREMENT_GAP};
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::analyzer::stop::StopAnalyzer;
use crate::analysis::analyzer::whitespace::WhitespaceAnalyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::mapping::MappingCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
use crate::analysis::token_filter::limit::LimitFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::token_filter::trim::TrimFilter;
use crate::analysis::token_filter::uppercase::UppercaseFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::keyword::KeywordTokenizer;
use crate::analysis::tokenizer::pattern::PatternTokenizer;
use crate::analysis::tokenizer::standard::StandardTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{AnalysisError, Result};

/// Resolves stage names to stage instances.
///
/// Lookups return `Ok(None)` when the name is unknown and `Err` when the
/// stage exists but cannot be built from the given parameters.
pub trait StageRegistry: Send + Sync {
    /// Build the tokenizer registered as `name`.
    fn tokenizer(&self, name: &str, params: &StageParams) -> Result<Option<Arc<dyn Tokenizer>>>;

    /// Build the char filter registered as `name`.
    fn char_filter(&self, name: &str, params: &StageParams)
    -> Result<Option<Arc<dyn CharFilter>>>;

    /// Build the token filter registered as `name`.
    fn token_filter(&self, name: &str, params: &StageParams) -> Result<Option<Arc<dyn Filter>>>;

    /// Look up a global analyzer.
    fn analyzer(&self, name: &str) -> Option<Arc<dyn Analyzer>>;

    /// Position and offset gaps of an ad-hoc chain whose tokenizer declares
    /// none.
    fn chain_gaps(&self) -> (usize, usize) {
        (DEFAULT_POSITION_INCREMENT_GAP, DEFAULT_OFFSET_GAP)
    }
}

/// Typed read access to the parameters of a stage definition.
#[derive(Clone, Copy, Debug)]
pub struct StageParams<'a> {
    params: Option<&'a Map<String, Value>>,
}

impl<'a> StageParams<'a> {
    pub fn new(params: &'a Map<String, Value>) -> Self {
        StageParams {
            params: Some(params),
        }
    }

    /// Parameters of a stage referenced by name only.
    pub fn empty() -> Self {
        StageParams { params: None }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.params.and_then(|params| params.get(key))
    }

    /// Whether no parameters were given.
    pub fn is_empty(&self) -> bool {
        self.params.is_none_or(|params| params.is_empty())
    }

    pub fn str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(AnalysisError::analysis(format!(
                "[{key}] must be a string, got {other}"
            ))),
        }
    }

    pub fn usize(&self, key: &str) -> Result<Option<usize>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(|n| Some(n as usize)).ok_or_else(|| {
                AnalysisError::analysis(format!("[{key}] must be a non-negative integer, got {n}"))
            }),
            Some(other) => Err(AnalysisError::analysis(format!(
                "[{key}] must be an integer, got {other}"
            ))),
        }
    }

    pub fn i64(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
                AnalysisError::analysis(format!("[{key}] must be an integer, got {n}"))
            }),
            Some(other) => Err(AnalysisError::analysis(format!(
                "[{key}] must be an integer, got {other}"
            ))),
        }
    }

    pub fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(AnalysisError::analysis(format!(
                "[{key}] must be a boolean, got {other}"
            ))),
        }
    }

    /// A list of strings; a single string is a one-element list.
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(vec![value.clone()])),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| match value {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(AnalysisError::analysis(format!(
                        "[{key}] must only contain strings, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => Err(AnalysisError::analysis(format!(
                "[{key}] must be a list of strings, got {other}"
            ))),
        }
    }
}

/// Constructor of a tokenizer from its parameters.
pub type TokenizerFactory = Arc<dyn Fn(&StageParams) -> Result<Arc<dyn Tokenizer>> + Send + Sync>;

/// Constructor of a char filter from its parameters.
pub type CharFilterFactory =
    Arc<dyn Fn(&StageParams) -> Result<Arc<dyn CharFilter>> + Send + Sync>;

/// Constructor of a token filter from its parameters.
pub type FilterFactory = Arc<dyn Fn(&StageParams) -> Result<Arc<dyn Filter>> + Send + Sync>;

/// Names known to a registry, sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StageListing {
    pub tokenizers: Vec<String>,
    pub char_filters: Vec<String>,
    pub token_filters: Vec<String>,
    pub analyzers: Vec<String>,
}

/// In-process stage registry.
///
/// Lookups take a read lock; registration takes a write lock.
pub struct BuiltinRegistry {
    tokenizers: RwLock<AHashMap<String, TokenizerFactory>>,
    char_filters: RwLock<AHashMap<String, CharFilterFactory>>,
    token_filters: RwLock<AHashMap<String, FilterFactory>>,
    analyzers: RwLock<AHashMap<String, Arc<dyn Analyzer>>>,
}

impl BuiltinRegistry {
    /// Create a registry holding the built-in stages and analyzers.
    pub fn new() -> Result<Self> {
        let registry = Self::empty();

        registry.register_tokenizer("whitespace", |params| {
            let mut tokenizer = WhitespaceTokenizer::new();
            if let Some(max) = params.usize("max_token_length")? {
                tokenizer = tokenizer.with_max_token_length(max);
            }
            Ok(Arc::new(tokenizer))
        });
        registry.register_tokenizer("keyword", |_| Ok(Arc::new(KeywordTokenizer::new())));
        registry.register_tokenizer("standard", |params| {
            let mut tokenizer = StandardTokenizer::new();
            if let Some(max) = params.usize("max_token_length")? {
                tokenizer = tokenizer.with_max_token_length(max);
            }
            Ok(Arc::new(tokenizer))
        });
        registry.register_tokenizer("pattern", |params| {
            let pattern = params
                .str("pattern")?
                .unwrap_or(PatternTokenizer::DEFAULT_PATTERN);
            let tokenizer = match params.i64("group")?.unwrap_or(-1) {
                -1 => PatternTokenizer::split_on(pattern)?,
                0 => PatternTokenizer::matching(pattern)?,
                group => {
                    return Err(AnalysisError::analysis(format!(
                        "[group] must be -1 or 0, got {group}"
                    )));
                }
            };
            Ok(Arc::new(tokenizer))
        });

        registry.register_char_filter("mapping", |params| {
            let rules = params
                .string_list("mappings")?
                .ok_or_else(|| AnalysisError::analysis("mapping requires [mappings]"))?;
            Ok(Arc::new(MappingCharFilter::from_rules(&rules)?))
        });
        registry.register_char_filter("pattern_replace", |params| {
            let pattern = params
                .str("pattern")?
                .ok_or_else(|| AnalysisError::analysis("pattern_replace requires [pattern]"))?;
            let replacement = params.str("replacement")?.unwrap_or("");
            Ok(Arc::new(PatternReplaceCharFilter::new(pattern, replacement)?))
        });

        registry.register_token_filter("lowercase", |_| Ok(Arc::new(LowercaseFilter::new())));
        registry.register_token_filter("uppercase", |_| Ok(Arc::new(UppercaseFilter::new())));
        registry.register_token_filter("trim", |_| Ok(Arc::new(TrimFilter::new())));
        registry.register_token_filter("remove_empty", |_| Ok(Arc::new(RemoveEmptyFilter::new())));
        registry.register_token_filter("stop", |params| {
            let ignore_case = params.bool("ignore_case")?.unwrap_or(false);
            Ok(Arc::new(stop_filter(params)?.ignore_case(ignore_case)))
        });
        registry.register_token_filter("limit", |params| {
            let limit = params.usize("max_token_count")?.unwrap_or(1);
            Ok(Arc::new(LimitFilter::new(limit)))
        });
        registry.register_token_filter("keyword_marker", |params| {
            let keywords = params.string_list("keywords")?.unwrap_or_default();
            let ignore_case = params.bool("ignore_case")?.unwrap_or(false);
            Ok(Arc::new(KeywordMarkerFilter::new(keywords).ignore_case(ignore_case)))
        });

        registry.register_analyzer("standard", Arc::new(StandardAnalyzer::new()));
        registry.register_analyzer("whitespace", Arc::new(WhitespaceAnalyzer::new()));
        registry.register_analyzer("keyword", Arc::new(KeywordAnalyzer::new()));
        registry.register_analyzer("stop", Arc::new(StopAnalyzer::new()?));

        Ok(registry)
    }

    /// Create a registry with nothing registered.
    pub fn empty() -> Self {
        BuiltinRegistry {
            tokenizers: RwLock::new(AHashMap::new()),
            char_filters: RwLock::new(AHashMap::new()),
            token_filters: RwLock::new(AHashMap::new()),
            analyzers: RwLock::new(AHashMap::new()),
        }
    }

    /// Register a tokenizer constructor, replacing any previous one.
    pub fn register_tokenizer<S, F>(&self, name: S, factory: F)
    where
        S: Into<String>,
        F: Fn(&StageParams) -> Result<Arc<dyn Tokenizer>> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("registering tokenizer [{name}]");
        self.tokenizers.write().insert(name, Arc::new(factory));
    }

    /// Register a char filter constructor, replacing any previous one.
    pub fn register_char_filter<S, F>(&self, name: S, factory: F)
    where
        S: Into<String>,
        F: Fn(&StageParams) -> Result<Arc<dyn CharFilter>> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("registering char filter [{name}]");
        self.char_filters.write().insert(name, Arc::new(factory));
    }

    /// Register a token filter constructor, replacing any previous one.
    pub fn register_token_filter<S, F>(&self, name: S, factory: F)
    where
        S: Into<String>,
        F: Fn(&StageParams) -> Result<Arc<dyn Filter>> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("registering token filter [{name}]");
        self.token_filters.write().insert(name, Arc::new(factory));
    }

    /// Register a global analyzer, replacing any previous one.
    pub fn register_analyzer<S: Into<String>>(&self, name: S, analyzer: Arc<dyn Analyzer>) {
        let name = name.into();
        debug!("registering analyzer [{name}]");
        self.analyzers.write().insert(name, analyzer);
    }

    /// All registered names.
    pub fn listing(&self) -> StageListing {
        fn sorted<V>(map: &AHashMap<String, V>) -> Vec<String> {
            map.keys().cloned().collect::<BTreeSet<_>>().into_iter().collect()
        }

        StageListing {
            tokenizers: sorted(&*self.tokenizers.read()),
            char_filters: sorted(&*self.char_filters.read()),
            token_filters: sorted(&*self.token_filters.read()),
            analyzers: sorted(&*self.analyzers.read()),
        }
    }
}

fn stop_filter(params: &StageParams) -> Result<StopFilter> {
    let Some(words) = params.string_list("stopwords")? else {
        return Ok(StopFilter::new());
    };
    if words.len() == 1 && words[0] == "_english_" {
        Ok(StopFilter::new())
    } else if words.len() == 1 && words[0] == "_none_" {
        Ok(StopFilter::from_words(Vec::<String>::new()))
    } else {
        Ok(StopFilter::from_words(words))
    }
}

impl StageRegistry for BuiltinRegistry {
    fn tokenizer(&self, name: &str, params: &StageParams) -> Result<Option<Arc<dyn Tokenizer>>> {
        let factory = self.tokenizers.read().get(name).cloned();
        factory.map(|factory| factory(params)).transpose()
    }

    fn char_filter(
        &self,
        name: &str,
        params: &StageParams,
    ) -> Result<Option<Arc<dyn CharFilter>>> {
        let factory = self.char_filters.read().get(name).cloned();
        factory.map(|factory| factory(params)).transpose()
    }

    fn token_filter(&self, name: &str, params: &StageParams) -> Result<Option<Arc<dyn Filter>>> {
        let factory = self.token_filters.read().get(name).cloned();
        factory.map(|factory| factory(params)).transpose()
    }

    fn analyzer(&self, name: &str) -> Option<Arc<dyn Analyzer>> {
        self.analyzers.read().get(name).cloned()
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("listing", &self.listing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_builtin_listing() {
        let listing = BuiltinRegistry::new().unwrap().listing();

        assert_eq!(listing.tokenizers, vec!["keyword", "pattern", "standard", "whitespace"]);
        assert_eq!(listing.char_filters, vec!["mapping", "pattern_replace"]);
        assert!(listing.token_filters.contains(&"keyword_marker".to_string()));
        assert_eq!(listing.analyzers, vec!["keyword", "standard", "stop", "whitespace"]);
    }

    #[test]
    fn test_unknown_name_is_none() {
        let registry = BuiltinRegistry::new().unwrap();
        assert!(registry.tokenizer("nope", &StageParams::empty()).unwrap().is_none());
        assert!(registry.analyzer("nope").is_none());
    }

    #[test]
    fn test_bad_parameters_fail() {
        let registry = BuiltinRegistry::new().unwrap();

        let bad_pattern = params(json!({"pattern": "["}));
        assert!(registry.char_filter("pattern_replace", &StageParams::new(&bad_pattern)).is_err());

        let missing = StageParams::empty();
        assert!(registry.char_filter("mapping", &missing).is_err());

        let wrong_type = params(json!({"max_token_count": "two"}));
        assert!(registry.token_filter("limit", &StageParams::new(&wrong_type)).is_err());
    }

    #[test]
    fn test_stop_parameters() {
        let registry = BuiltinRegistry::new().unwrap();
        let p = params(json!({"stopwords": ["Fox"], "ignore_case": true}));
        let filter = registry.token_filter("stop", &StageParams::new(&p)).unwrap().unwrap();

        let tokens = vec![Token::new("fox", 0), Token::new("the", 1)];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        assert!(result[0].is_stopped());
        assert!(!result[1].is_stopped());
    }

    #[test]
    fn test_runtime_registration() {
        let registry = BuiltinRegistry::empty();
        assert!(registry.token_filter("lowercase", &StageParams::empty()).unwrap().is_none());

        registry.register_token_filter("lowercase", |_| Ok(Arc::new(LowercaseFilter::new())));
        assert!(registry.token_filter("lowercase", &StageParams::empty()).unwrap().is_some());
    }
}
