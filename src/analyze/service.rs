//! Entry points of the analyze core.

use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info};
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::analyze::attributes::AttributeFilter;
use crate::analyze::context::IndexContext;
use crate::analyze::detail::DetailExecutor;
use crate::analyze::registry::{BuiltinRegistry, StageRegistry};
use crate::analyze::request::AnalyzeRequest;
use crate::analyze::resolver::PipelineResolver;
use crate::analyze::response::AnalysisResult;
use crate::analyze::simple::SimpleExecutor;
use crate::config::{AnalyzeConfig, IndexSettings};
use crate::error::{AnalysisError, Result};

/// Analyze the texts of `request`.
///
/// `index` scopes analyzer, normalizer and field lookups; without it only
/// global analyzers are visible. `max_token_count` caps every token list.
/// Any failure aborts the whole call.
///
/// # Examples
///
/// ```
/// use sarissa_analyze::analyze::analyze;
/// use sarissa_analyze::analyze::registry::BuiltinRegistry;
/// use sarissa_analyze::analyze::request::AnalyzeRequest;
///
/// let registry = BuiltinRegistry::new().unwrap();
/// let request = AnalyzeRequest::new(["ab cd", "ef"]).with_tokenizer("whitespace");
///
/// let result = analyze(&request, &registry, None, 10_000).unwrap();
/// let offsets: Vec<_> = result
///     .tokens()
///     .unwrap()
///     .iter()
///     .map(|t| (t.position, t.start_offset, t.end_offset))
///     .collect();
/// assert_eq!(offsets, vec![(0, 0, 2), (1, 3, 5), (2, 6, 8)]);
/// ```
pub fn analyze(
    request: &AnalyzeRequest,
    registry: &dyn StageRegistry,
    index: Option<&IndexContext>,
    max_token_count: usize,
) -> Result<AnalysisResult> {
    request.validate()?;
    if max_token_count == 0 {
        return Err(AnalysisError::invalid_config(
            "max_token_count must be greater than 0",
        ));
    }

    let resolved = PipelineResolver::new(registry, index).resolve(request)?;

    if request.explain {
        let attributes = AttributeFilter::new(&request.attributes);
        DetailExecutor::new(resolved.analyzer(), max_token_count, &attributes)
            .execute(&request.texts)
            .map(AnalysisResult::Detail)
    } else {
        SimpleExecutor::new(resolved.analyzer(), max_token_count)
            .execute(&request.texts)
            .map(AnalysisResult::Simple)
    }
}

/// A registry, the global configuration and a set of indices.
///
/// Requests name their index through [`AnalyzeRequest::index`]; the token
/// cap is the index's own when it sets one, else the global one.
pub struct AnalyzeService {
    registry: Arc<dyn StageRegistry>,
    config: AnalyzeConfig,
    indices: RwLock<AHashMap<String, Arc<IndexContext>>>,
}

impl AnalyzeService {
    pub fn new(registry: Arc<dyn StageRegistry>, config: AnalyzeConfig) -> Result<Self> {
        config.validate()?;
        Ok(AnalyzeService {
            registry,
            config,
            indices: RwLock::new(AHashMap::new()),
        })
    }

    /// A service over the built-in registry.
    pub fn with_builtins(config: AnalyzeConfig) -> Result<Self> {
        Self::new(Arc::new(BuiltinRegistry::new()?), config)
    }

    pub fn registry(&self) -> &dyn StageRegistry {
        self.registry.as_ref()
    }

    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    /// Build and add an index, replacing any index of the same name.
    pub fn add_index<S: Into<String>>(&self, name: S, settings: &IndexSettings) -> Result<()> {
        let name = name.into();
        let context = IndexContext::from_settings(name.clone(), settings, self.registry.as_ref())?;
        info!("added index [{name}]");
        self.indices.write().insert(name, Arc::new(context));
        Ok(())
    }

    pub fn remove_index(&self, name: &str) -> Option<Arc<IndexContext>> {
        self.indices.write().remove(name)
    }

    pub fn index(&self, name: &str) -> Option<Arc<IndexContext>> {
        self.indices.read().get(name).cloned()
    }

    /// Token cap for requests against `index`.
    pub fn max_token_count(&self, index: Option<&IndexContext>) -> usize {
        index
            .and_then(|index| index.max_token_count())
            .unwrap_or(self.config.max_token_count)
    }

    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult> {
        let index = match &request.index {
            Some(name) => Some(self.index(name).ok_or_else(|| {
                AnalysisError::invalid_request(format!("no such index [{name}]"))
            })?),
            None => None,
        };
        let index = index.as_deref();
        let max_token_count = self.max_token_count(index);

        debug!(
            "analyzing {} text(s) with max_token_count {max_token_count}",
            request.texts.len()
        );
        analyze(request, self.registry.as_ref(), index, max_token_count)
    }

    /// Analyze independent requests in parallel.
    ///
    /// Results are returned in request order; one failing request does not
    /// affect the others.
    pub fn analyze_batch(&self, requests: &[AnalyzeRequest]) -> Vec<Result<AnalysisResult>> {
        requests
            .par_iter()
            .map(|request| self.analyze(request))
            .collect()
    }
}

impl std::fmt::Debug for AnalyzeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut indices: Vec<_> = self.indices.read().keys().cloned().collect();
        indices.sort();
        f.debug_struct("AnalyzeService")
            .field("config", &self.config)
            .field("indices", &indices)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AnalyzeService {
        AnalyzeService::with_builtins(AnalyzeConfig { max_token_count: 3 }).unwrap()
    }

    #[test]
    fn test_global_cap() {
        let service = service();
        let request = AnalyzeRequest::new(["a b c d"]).with_analyzer("whitespace");

        assert!(matches!(
            service.analyze(&request),
            Err(AnalysisError::TokenCountExceeded { max_token_count: 3, .. })
        ));
    }

    #[test]
    fn test_index_cap_overrides_global() {
        let service = service();
        let settings = IndexSettings::from_json_str(r#"{"max_token_count": 10}"#).unwrap();
        service.add_index("idx", &settings).unwrap();

        let request = AnalyzeRequest::new(["a b c d"])
            .with_index("idx")
            .with_analyzer("whitespace");
        assert_eq!(service.analyze(&request).unwrap().tokens().unwrap().len(), 4);
    }

    #[test]
    fn test_add_and_remove_index() {
        let service = service();
        service.add_index("idx", &IndexSettings::default()).unwrap();
        assert!(service.index("idx").is_some());

        assert!(service.remove_index("idx").is_some());
        assert!(service.index("idx").is_none());
        assert!(service.remove_index("idx").is_none());
    }

    #[test]
    fn test_unknown_index() {
        let request = AnalyzeRequest::new(["a"]).with_index("nope");
        assert!(matches!(
            service().analyze(&request),
            Err(AnalysisError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let registry = BuiltinRegistry::new().unwrap();
        let request = AnalyzeRequest::new(["a"]);
        assert!(analyze(&request, &registry, None, 0).is_err());
    }

    #[test]
    fn test_analyze_batch_keeps_order() {
        let service = service();
        let requests = vec![
            AnalyzeRequest::new(["one"]),
            AnalyzeRequest::new(["a b c d"]).with_analyzer("whitespace"),
            AnalyzeRequest::new(["two three"]),
        ];

        let results = service.analyze_batch(&requests);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().tokens().unwrap()[0].term, "one");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().tokens().unwrap().len(), 2);
    }
}
