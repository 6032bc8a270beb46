//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the text string before it is passed to the
//! tokenizer. Each filter returns the rewritten text plus the list of
//! [`Transformation`]s it made, so that token offsets computed on the
//! rewritten text can be mapped back to the original input with
//! [`correct_offset`].
//!
//! # Available Filters
//!
//! - [`mapping::MappingCharFilter`] - Literal string mapping replacement
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::analysis::char_filter::{CharFilter, correct_offset};
//! use sarissa_analyze::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new("-", "").unwrap();
//! let (text, transformations) = filter.filter("foo-bar");
//! assert_eq!(text, "foobar");
//! assert_eq!(correct_offset(6, &transformations), 7);
//! ```

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }
}

/// Trait for character filters that transform text before tokenization.
///
/// Filters are pure functions of their input, so applying the same filter to
/// the same text twice yields the same output.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    ///
    /// Returns the filtered text and the transformations that occurred,
    /// ordered by position.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;

    /// Whether this filter may be used inside a normalizer.
    fn normalizes(&self) -> bool {
        false
    }
}

/// Map an offset in filtered text back to the text the filter received.
///
/// Offsets after a transformation shift by its length difference; offsets
/// inside a transformation are interpolated linearly into the original span.
pub fn correct_offset(offset: usize, transformations: &[Transformation]) -> usize {
    let mut corrected = offset as isize;
    for t in transformations {
        let original_len = (t.original_end - t.original_start) as isize;
        let new_len = (t.new_end - t.new_start) as isize;

        if offset >= t.new_end {
            corrected += original_len - new_len;
        } else if offset >= t.new_start {
            if new_len == 0 {
                return t.original_start;
            }
            let offset_in_new = (offset - t.new_start) as isize;
            return t.original_start + (offset_in_new * original_len / new_len) as usize;
        } else {
            break;
        }
    }
    corrected.max(0) as usize
}

pub mod mapping;
pub mod pattern_replace;

pub use mapping::MappingCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
