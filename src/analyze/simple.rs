//! Flat token output.

use log::trace;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analyze::accumulator::TokenListBuilder;
use crate::analyze::response::AnalyzeToken;
use crate::error::{AnalysisError, Result};

/// Runs an analyzer over every text and returns one flat token list.
///
/// One counter spans the whole request.
pub struct SimpleExecutor<'a> {
    analyzer: &'a dyn Analyzer,
    max_token_count: usize,
}

impl<'a> SimpleExecutor<'a> {
    pub fn new(analyzer: &'a dyn Analyzer, max_token_count: usize) -> Self {
        SimpleExecutor {
            analyzer,
            max_token_count,
        }
    }

    pub fn execute(&self, texts: &[String]) -> Result<Vec<AnalyzeToken>> {
        let analyzer = self.analyzer;
        let mut builder = TokenListBuilder::new(analyzer.name(), self.max_token_count, None);

        for (text_index, text) in texts.iter().enumerate() {
            trace!("analyzing text {text_index} with [{}]", analyzer.name());
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

        Ok(builder.into_tokens())
    }
}
