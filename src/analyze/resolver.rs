//! Selection of the pipeline an analyze request runs.
//!
//! The first matching rule wins:
//!
//! 1. a tokenizer, char filters or token filters in the request build a
//!    custom chain;
//! 2. `analyzer` names an analyzer of the index (or a global one);
//! 3. `normalizer` names a normalizer of the index;
//! 4. `field` selects the index-time analyzer of a mapped string field;
//! 5. otherwise the index default, or the global `standard` analyzer.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analyze::chain::StageChainBuilder;
use crate::analyze::context::{FieldKind, IndexContext};
use crate::analyze::registry::StageRegistry;
use crate::analyze::request::AnalyzeRequest;
use crate::error::{AnalysisError, Result};

/// Which rule selected a pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineSource {
    Custom,
    Analyzer,
    Normalizer,
    Field,
    Default,
}

impl fmt::Display for PipelineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self {
            PipelineSource::Custom => "custom chain",
            PipelineSource::Analyzer => "named analyzer",
            PipelineSource::Normalizer => "named normalizer",
            PipelineSource::Field => "field analyzer",
            PipelineSource::Default => "default analyzer",
        };
        f.write_str(source)
    }
}

/// The analyzer a request runs, and why it was chosen.
#[derive(Clone)]
pub struct ResolvedPipeline {
    analyzer: Arc<dyn Analyzer>,
    source: PipelineSource,
}

impl ResolvedPipeline {
    pub fn new(analyzer: Arc<dyn Analyzer>, source: PipelineSource) -> Self {
        ResolvedPipeline { analyzer, source }
    }

    pub fn analyzer(&self) -> &dyn Analyzer {
        self.analyzer.as_ref()
    }

    pub fn source(&self) -> PipelineSource {
        self.source
    }
}

impl fmt::Debug for ResolvedPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedPipeline")
            .field("analyzer", &self.analyzer.name())
            .field("source", &self.source)
            .finish()
    }
}

/// Resolves requests against a registry and an optional index.
pub struct PipelineResolver<'a> {
    registry: &'a dyn StageRegistry,
    index: Option<&'a IndexContext>,
}

impl<'a> PipelineResolver<'a> {
    pub fn new(registry: &'a dyn StageRegistry, index: Option<&'a IndexContext>) -> Self {
        PipelineResolver { registry, index }
    }

    pub fn resolve(&self, request: &AnalyzeRequest) -> Result<ResolvedPipeline> {
        let resolved = self.select(request)?;
        debug!(
            "resolved [{}] from {} in {}",
            resolved.analyzer.name(),
            resolved.source,
            self.index
                .map(|index| format!("index [{}]", index.name()))
                .unwrap_or_else(|| "global scope".to_string())
        );
        Ok(resolved)
    }

    fn select(&self, request: &AnalyzeRequest) -> Result<ResolvedPipeline> {
        if request.is_custom() {
            let chain = StageChainBuilder::new(self.registry)
                .with_definitions(self.index.map(|index| index.definitions()))
                .with_name("_custom")
                .build(
                    &request.char_filters,
                    request.tokenizer.as_ref(),
                    &request.token_filters,
                )?;
            return Ok(ResolvedPipeline::new(Arc::new(chain), PipelineSource::Custom));
        }

        if let Some(name) = &request.analyzer {
            let analyzer = match self.index {
                Some(index) => index
                    .analyzer(name)
                    .or_else(|| self.registry.analyzer(name))
                    .ok_or_else(|| AnalysisError::UnknownAnalyzer {
                        name: name.clone(),
                        scope: "index".to_string(),
                    })?,
                None => self
                    .registry
                    .analyzer(name)
                    .ok_or_else(|| AnalysisError::UnknownAnalyzer {
                        name: name.clone(),
                        scope: "global".to_string(),
                    })?,
            };
            return Ok(ResolvedPipeline::new(analyzer, PipelineSource::Analyzer));
        }

        if let Some(name) = &request.normalizer {
            let index = self
                .index
                .ok_or(AnalysisError::MissingIndexContext { what: "normalizer" })?;
            let normalizer =
                index
                    .normalizer(name)
                    .ok_or_else(|| AnalysisError::UnknownNormalizer {
                        name: name.clone(),
                        index: index.name().to_string(),
                    })?;
            return Ok(ResolvedPipeline::new(normalizer, PipelineSource::Normalizer));
        }

        if let Some(field) = &request.field {
            let index = self.index.ok_or(AnalysisError::MissingIndexContext {
                what: "specific field",
            })?;
            match index.field(field) {
                Some(FieldKind::Text(analyzer)) | Some(FieldKind::Keyword(analyzer)) => {
                    return Ok(ResolvedPipeline::new(
                        Arc::clone(analyzer),
                        PipelineSource::Field,
                    ));
                }
                Some(FieldKind::Other(field_type)) => {
                    return Err(AnalysisError::UnsupportedFieldType {
                        field: field.clone(),
                        field_type: field_type.clone(),
                    });
                }
                None => debug!("field [{field}] is not mapped, using the default analyzer"),
            }
        }

        let analyzer = match self.index {
            Some(index) => index.default_analyzer(self.registry),
            None => self
                .registry
                .analyzer("standard")
                .unwrap_or_else(|| Arc::new(StandardAnalyzer::new())),
        };
        Ok(ResolvedPipeline::new(analyzer, PipelineSource::Default))
    }
}
