//! Keyword marker filter implementation.

use std::sync::Arc;

use ahash::AHashSet;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Name of the attribute this filter sets.
pub const KEYWORD_ATTRIBUTE: &str = "keyword";

/// A filter that flags protected words with a `keyword` attribute.
///
/// Every live token gets the attribute, `true` for listed words and `false`
/// otherwise, so later stages and explain output can see the decision.
#[derive(Clone, Debug)]
pub struct KeywordMarkerFilter {
    keywords: Arc<AHashSet<String>>,
    ignore_case: bool,
}

impl KeywordMarkerFilter {
    /// Create a new keyword marker filter.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordMarkerFilter {
            keywords: Arc::new(keywords.into_iter().map(Into::into).collect()),
            ignore_case: false,
        }
    }

    /// Match keywords regardless of case.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        if ignore_case && !self.ignore_case {
            self.keywords = Arc::new(self.keywords.iter().map(|w| w.to_lowercase()).collect());
        }
        self.ignore_case = ignore_case;
        self
    }

    /// Check if a word is protected.
    pub fn is_keyword(&self, word: &str) -> bool {
        if self.ignore_case {
            self.keywords.contains(&word.to_lowercase())
        } else {
            self.keywords.contains(word)
        }
    }
}

impl Filter for KeywordMarkerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let marker = self.clone();
        Ok(Box::new(tokens.map(move |token| {
            if token.is_stopped() {
                token
            } else {
                let is_keyword = marker.is_keyword(&token.text);
                token.with_attribute(KEYWORD_ATTRIBUTE, is_keyword)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "keyword_marker"
    }
}
