//! Bounded token counter.

use crate::error::{AnalysisError, Result};

/// Counts the tokens emitted into one token list.
///
/// The count is checked after each increment, so exactly
/// `max_token_count` tokens are accepted and the next one fails.
#[derive(Clone, Debug)]
pub struct TokenCounter {
    count: usize,
    max_token_count: usize,
    stage: String,
}

impl TokenCounter {
    /// Create a counter for the list produced by `stage`.
    pub fn new<S: Into<String>>(max_token_count: usize, stage: S) -> Self {
        TokenCounter {
            count: 0,
            max_token_count,
            stage: stage.into(),
        }
    }

    /// Count one token of the text at `text_index`.
    pub fn increment(&mut self, text_index: usize) -> Result<()> {
        self.count += 1;
        if self.count > self.max_token_count {
            return Err(AnalysisError::TokenCountExceeded {
                max_token_count: self.max_token_count,
                stage: self.stage.clone(),
                text_index,
            });
        }
        Ok(())
    }

    /// Tokens counted so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_allows_exactly_max() {
        let mut counter = TokenCounter::new(2, "whitespace");
        assert!(counter.increment(0).is_ok());
        assert!(counter.increment(0).is_ok());

        match counter.increment(1) {
            Err(AnalysisError::TokenCountExceeded {
                max_token_count,
                stage,
                text_index,
            }) => {
                assert_eq!(max_token_count, 2);
                assert_eq!(stage, "whitespace");
                assert_eq!(text_index, 1);
            }
            other => panic!("Expected TokenCountExceeded, got {other:?}"),
        }
        assert_eq!(counter.count(), 3);
    }
}
