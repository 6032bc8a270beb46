use regex::Regex;

use super::{CharFilter, Transformation};
use crate::error::{AnalysisError, Result};

/// A char filter that replaces every regex match with a replacement string.
///
/// The replacement may reference capture groups (`$1`, `${name}`).
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| AnalysisError::analysis(format!("Invalid regex pattern: {e}")))?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();
        let mut last_match_end = 0;

        for caps in self.pattern.captures_iter(input) {
            let Some(m) = caps.get(0) else { continue };

            output.push_str(&input[last_match_end..m.start()]);
            let replacement_start = output.len();
            caps.expand(&self.replacement, &mut output);
            let replacement_end = output.len();

            // Same-length replacements map offsets one to one.
            if m.len() != replacement_end - replacement_start {
                transformations.push(Transformation::new(
                    m.start(),
                    m.end(),
                    replacement_start,
                    replacement_end,
                ));
            }
            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);
        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }

    fn normalizes(&self) -> bool {
        true
    }
}
