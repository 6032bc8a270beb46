//! Assembly of custom stage chains.

use log::debug;

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analyze::context::StageDefinitions;
use crate::analyze::registry::{StageParams, StageRegistry};
use crate::analyze::request::StageSpec;
use crate::error::{AnalysisError, Result, StageKind};

/// Tokenizer of a chain that names only filters.
pub const DEFAULT_TOKENIZER: &str = "keyword";

/// A stage reference resolved to its reported name and its constructor.
struct StageRef<'s> {
    reported: String,
    constructor: &'s str,
    params: StageParams<'s>,
}

/// Builds a [`PipelineAnalyzer`] from stage specs.
///
/// A bare name is looked up in the index's stage definitions first and in
/// the registry second. Inline definitions always go to the registry.
pub struct StageChainBuilder<'a> {
    registry: &'a dyn StageRegistry,
    definitions: Option<&'a StageDefinitions>,
    gaps: Option<(usize, usize)>,
    name: Option<String>,
}

impl<'a> StageChainBuilder<'a> {
    pub fn new(registry: &'a dyn StageRegistry) -> Self {
        StageChainBuilder {
            registry,
            definitions: None,
            gaps: None,
            name: None,
        }
    }

    /// Resolve bare names against an index's stage definitions too.
    pub fn with_definitions(mut self, definitions: Option<&'a StageDefinitions>) -> Self {
        self.definitions = definitions;
        self
    }

    /// Gaps to use when the tokenizer declares none. Without this the
    /// registry's chain defaults apply.
    pub fn with_gaps(mut self, position_increment_gap: usize, offset_gap: usize) -> Self {
        self.gaps = Some((position_increment_gap, offset_gap));
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    fn lookup<'s>(&'s self, kind: StageKind, spec: &'s StageSpec) -> StageRef<'s> {
        match spec {
            StageSpec::Definition { kind: constructor, params } => StageRef {
                reported: constructor.clone(),
                constructor,
                params: StageParams::new(params),
            },
            StageSpec::Name(name) => {
                match self.definitions.and_then(|d| d.get(kind, name)) {
                    Some(StageSpec::Definition { kind: constructor, params }) => StageRef {
                        reported: name.clone(),
                        constructor,
                        params: StageParams::new(params),
                    },
                    Some(StageSpec::Name(alias)) => StageRef {
                        reported: name.clone(),
                        constructor: alias,
                        params: StageParams::empty(),
                    },
                    None => StageRef {
                        reported: name.clone(),
                        constructor: name,
                        params: StageParams::empty(),
                    },
                }
            }
        }
    }

    /// Instantiate every stage in declared order.
    ///
    /// Without a tokenizer the chain uses the `keyword` tokenizer.
    pub fn build(
        &self,
        char_filters: &[StageSpec],
        tokenizer: Option<&StageSpec>,
        token_filters: &[StageSpec],
    ) -> Result<PipelineAnalyzer> {
        let default_tokenizer = StageSpec::from(DEFAULT_TOKENIZER);
        let tokenizer_spec = tokenizer.unwrap_or(&default_tokenizer);

        let stage = self.lookup(StageKind::Tokenizer, tokenizer_spec);
        let tokenizer = self
            .registry
            .tokenizer(stage.constructor, &stage.params)
            .map_err(|e| AnalysisError::stage_io(&stage.reported, e))?
            .ok_or_else(|| AnalysisError::unknown_stage(StageKind::Tokenizer, stage.constructor))?;

        let (default_position_gap, default_offset_gap) =
            self.gaps.unwrap_or_else(|| self.registry.chain_gaps());
        let position_increment_gap = tokenizer
            .position_increment_gap()
            .unwrap_or(default_position_gap);
        let offset_gap = tokenizer.offset_gap().unwrap_or(default_offset_gap);

        let mut chain = PipelineAnalyzer::with_named_tokenizer(stage.reported, tokenizer)
            .with_gaps(position_increment_gap, offset_gap);

        for spec in char_filters {
            let stage = self.lookup(StageKind::CharFilter, spec);
            let char_filter = self
                .registry
                .char_filter(stage.constructor, &stage.params)
                .map_err(|e| AnalysisError::stage_io(&stage.reported, e))?
                .ok_or_else(|| {
                    AnalysisError::unknown_stage(StageKind::CharFilter, stage.constructor)
                })?;
            chain = chain.add_named_char_filter(stage.reported, char_filter);
        }

        for spec in token_filters {
            let stage = self.lookup(StageKind::TokenFilter, spec);
            let filter = self
                .registry
                .token_filter(stage.constructor, &stage.params)
                .map_err(|e| AnalysisError::stage_io(&stage.reported, e))?
                .ok_or_else(|| {
                    AnalysisError::unknown_stage(StageKind::TokenFilter, stage.constructor)
                })?;
            chain = chain.add_named_filter(stage.reported, filter);
        }

        if let Some(name) = &self.name {
            chain = chain.with_name(name.clone());
        }

        debug!("built stage chain {chain:?}");
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::analyzer::Analyzer;
    use crate::analyze::registry::BuiltinRegistry;
    use serde_json::{Map, json};

    fn definition(value: serde_json::Value) -> StageSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_build_in_declared_order() {
        let registry = BuiltinRegistry::new().unwrap();
        let chain = StageChainBuilder::new(&registry)
            .build(
                &[definition(json!({"type": "pattern_replace", "pattern": "-"}))],
                Some(&StageSpec::from("whitespace")),
                &[StageSpec::from("lowercase"), StageSpec::from("stop")],
            )
            .unwrap();

        assert_eq!(chain.tokenizer().name(), "whitespace");
        assert_eq!(chain.char_filters()[0].name(), "pattern_replace");
        let filters: Vec<_> = chain.filters().iter().map(|f| f.name()).collect();
        assert_eq!(filters, vec!["lowercase", "stop"]);
        assert_eq!((chain.position_increment_gap(), chain.offset_gap()), (0, 1));
    }

    #[test]
    fn test_missing_tokenizer_defaults_to_keyword() {
        let registry = BuiltinRegistry::new().unwrap();
        let chain = StageChainBuilder::new(&registry)
            .build(&[], None, &[StageSpec::from("lowercase")])
            .unwrap();

        assert_eq!(chain.tokenizer().name(), "keyword");
        let tokens: Vec<_> = chain.token_stream("Hello World").unwrap().collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "hello world");
    }

    #[test]
    fn test_unknown_stage() {
        let registry = BuiltinRegistry::new().unwrap();
        let result = StageChainBuilder::new(&registry).build(
            &[],
            Some(&StageSpec::from("whitespace")),
            &[StageSpec::from("nope")],
        );

        match result {
            Err(AnalysisError::UnknownStage { kind, name }) => {
                assert_eq!(kind, StageKind::TokenFilter);
                assert_eq!(name, "nope");
            }
            other => panic!("Expected UnknownStage, got {other:?}"),
        }
    }

    #[test]
    fn test_construction_failure_is_stage_io() {
        let registry = BuiltinRegistry::new().unwrap();
        let result = StageChainBuilder::new(&registry).build(
            &[],
            Some(&definition(json!({"type": "pattern", "pattern": "("}))),
            &[],
        );

        match result {
            Err(AnalysisError::StageIo { stage, .. }) => assert_eq!(stage, "pattern"),
            other => panic!("Expected StageIo, got {other:?}"),
        }
    }

    #[test]
    fn test_index_definitions_and_gaps() {
        let registry = BuiltinRegistry::new().unwrap();
        let mut params = Map::new();
        params.insert("stopwords".to_string(), json!(["fox"]));

        let mut definitions = StageDefinitions::default();
        definitions.insert(StageKind::TokenFilter, "fox_stop", StageSpec::definition("stop", params));

        let chain = StageChainBuilder::new(&registry)
            .with_definitions(Some(&definitions))
            .with_gaps(100, 1)
            .with_name("my_analyzer")
            .build(&[], Some(&StageSpec::from("whitespace")), &[StageSpec::from("fox_stop")])
            .unwrap();

        assert_eq!(chain.filters()[0].name(), "fox_stop");
        assert_eq!(chain.position_increment_gap(), 100);
        assert_eq!(chain.name(), "my_analyzer");

        let tokens: Vec<_> = chain.token_stream("quick fox jumps").unwrap().collect();
        assert_eq!(tokens.len(), 2);
    }
}
