//! Position and offset bookkeeping across the texts of one request.

use log::trace;

use crate::analysis::analyzer::analyzer::{AnalysisStream, StreamEnd};
use crate::analysis::token::Token;
use crate::analyze::attributes::AttributeFilter;
use crate::analyze::counter::TokenCounter;
use crate::analyze::response::{AnalyzeToken, AnalyzeTokenList};
use crate::error::Result;

/// Running position and offset bases.
///
/// Text `i + 1` continues where text `i` ended, plus the analyzer's gaps.
#[derive(Clone, Debug)]
pub struct OffsetPositionAccumulator {
    last_position: i64,
    last_offset: usize,
}

impl Default for OffsetPositionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetPositionAccumulator {
    pub fn new() -> Self {
        OffsetPositionAccumulator {
            last_position: -1,
            last_offset: 0,
        }
    }

    /// Absolute position and offsets of the next token of the current text.
    pub fn place(&mut self, token: &Token) -> (usize, usize, usize) {
        if token.position_increment > 0 {
            self.last_position += token.position_increment as i64;
        }
        (
            self.last_position.max(0) as usize,
            self.last_offset + token.start_offset,
            self.last_offset + token.end_offset.max(token.start_offset),
        )
    }

    /// Move the bases past a finished text.
    pub fn advance(&mut self, end: StreamEnd, position_increment_gap: usize, offset_gap: usize) {
        self.last_offset += end.final_offset + offset_gap;
        self.last_position += (end.final_position_increment + position_increment_gap) as i64;
    }

    pub fn last_position(&self) -> i64 {
        self.last_position
    }

    pub fn last_offset(&self) -> usize {
        self.last_offset
    }
}

/// Builds one token list over all the texts of a request.
///
/// Each list owns its counter and accumulator.
pub struct TokenListBuilder<'a> {
    list: AnalyzeTokenList,
    counter: TokenCounter,
    accumulator: OffsetPositionAccumulator,
    attributes: Option<&'a AttributeFilter>,
}

impl<'a> TokenListBuilder<'a> {
    /// Create a builder for the list named `name`. Extended attributes are
    /// collected only when a filter is given.
    pub fn new<S: Into<String>>(
        name: S,
        max_token_count: usize,
        attributes: Option<&'a AttributeFilter>,
    ) -> Self {
        let name = name.into();
        TokenListBuilder {
            counter: TokenCounter::new(max_token_count, name.clone()),
            list: AnalyzeTokenList::new(name),
            accumulator: OffsetPositionAccumulator::new(),
            attributes,
        }
    }

    /// Drain the stream of the text at `text_index` into the list.
    ///
    /// The stream is released when this returns, on success or failure.
    pub fn consume(
        &mut self,
        mut stream: AnalysisStream,
        text_index: usize,
        position_increment_gap: usize,
        offset_gap: usize,
    ) -> Result<()> {
        for token in stream.by_ref() {
            let (position, start_offset, end_offset) = self.accumulator.place(&token);
            self.counter.increment(text_index)?;
            self.list.tokens.push(AnalyzeToken {
                start_offset,
                end_offset,
                token_type: token.token_type().as_str().to_string(),
                position,
                position_length: token.position_length.max(1),
                attributes: self.attributes.map(|filter| filter.extract(&token)),
                term: token.text,
            });
        }

        let end = stream.end();
        trace!(
            "[{}] text {} ended at offset {} with final increment {}",
            self.list.name, text_index, end.final_offset, end.final_position_increment
        );
        self.accumulator.advance(end, position_increment_gap, offset_gap);
        Ok(())
    }

    pub fn finish(self) -> AnalyzeTokenList {
        self.list
    }

    /// Finish and return only the tokens.
    pub fn into_tokens(self) -> Vec<AnalyzeToken> {
        self.list.tokens
    }
}
