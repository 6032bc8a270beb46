//! Per-stage token output for explain requests.

use log::trace;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analyze::accumulator::TokenListBuilder;
use crate::analyze::attributes::AttributeFilter;
use crate::analyze::response::{AnalyzeTokenList, CharFilteredText, DetailResult};
use crate::error::{AnalysisError, Result};

/// Runs an analyzer in explain mode.
///
/// A [`PipelineAnalyzer`] is decomposed: every char filter reports its
/// output text, the tokenizer reports its tokens, and every token filter
/// reports the tokens of the chain up to and including itself. Any other
/// analyzer is reported as a single step.
pub struct DetailExecutor<'a> {
    analyzer: &'a dyn Analyzer,
    max_token_count: usize,
    attributes: &'a AttributeFilter,
}

impl<'a> DetailExecutor<'a> {
    pub fn new(
        analyzer: &'a dyn Analyzer,
        max_token_count: usize,
        attributes: &'a AttributeFilter,
    ) -> Self {
        DetailExecutor {
            analyzer,
            max_token_count,
            attributes,
        }
    }

    pub fn execute(&self, texts: &[String]) -> Result<DetailResult> {
        match self.analyzer.as_any().downcast_ref::<PipelineAnalyzer>() {
            Some(chain) => self.decomposed(chain, texts),
            None => self.opaque(texts),
        }
    }

    fn decomposed(&self, chain: &PipelineAnalyzer, texts: &[String]) -> Result<DetailResult> {
        let mut char_filters: Vec<CharFilteredText> = chain
            .char_filters()
            .iter()
            .map(|stage| CharFilteredText {
                name: stage.name().to_string(),
                texts: Vec::with_capacity(texts.len()),
            })
            .collect();

        for text in texts {
            let filtered = chain.apply_char_filters(text);
            for (output, snapshot) in char_filters.iter_mut().zip(filtered.snapshots) {
                output.texts.push(snapshot);
            }
        }

        let tokenizer = self.stage_list(chain, chain.tokenizer().name(), 0, texts)?;

        let token_filters = chain
            .filters()
            .iter()
            .enumerate()
            .map(|(i, stage)| self.stage_list(chain, stage.name(), i + 1, texts))
            .collect::<Result<Vec<_>>>()?;

        Ok(DetailResult {
            custom_analyzer: true,
            analyzer: None,
            char_filters,
            tokenizer: Some(tokenizer),
            token_filters,
        })
    }

    /// Token list of the chain prefix ending with `filter_count` filters.
    fn stage_list(
        &self,
        chain: &PipelineAnalyzer,
        name: &str,
        filter_count: usize,
        texts: &[String],
    ) -> Result<AnalyzeTokenList> {
        let mut builder = TokenListBuilder::new(name, self.max_token_count, Some(self.attributes));

        for (text_index, text) in texts.iter().enumerate() {
            trace!("explaining [{name}] on text {text_index}");
            let stream = chain
                .stacked_stream(text, filter_count)
                .map_err(|e| AnalysisError::stage_io(name, e))?;
            builder.consume(
                stream,
                text_index,
                chain.position_increment_gap(),
                chain.offset_gap(),
            )?;
        }

        Ok(builder.finish())
    }

    fn opaque(&self, texts: &[String]) -> Result<DetailResult> {
        let analyzer = self.analyzer;
        let mut builder =
            TokenListBuilder::new(analyzer.name(), self.max_token_count, Some(self.attributes));

        for (text_index, text) in texts.iter().enumerate() {
            trace!("explaining [{}] on text {text_index}", analyzer.name());
            let stream = analyzer
                .token_stream(text)
                .map_err(|e| AnalysisError::stage_io(analyzer.name(), e))?;
            builder.consume(
                stream,
                text_index,
                analyzer.position_increment_gap(),
                analyzer.offset_gap(),
            )?;
        }

        Ok(DetailResult {
            custom_analyzer: false,
            analyzer: Some(builder.finish()),
            ..Default::default()
        })
    }
}
