//! Mapping char filter implementation.

use aho_corasick::{AhoCorasick, MatchKind};

use super::{CharFilter, Transformation};
use crate::error::{AnalysisError, Result};

/// A char filter that replaces literal strings according to a mapping table.
///
/// When several keys match at the same place the longest one wins.
pub struct MappingCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
}

impl MappingCharFilter {
    /// Create a new mapping filter from `(from, to)` pairs.
    pub fn new<I, K, V>(mappings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (keys, replacements): (Vec<String>, Vec<String>) = mappings
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();

        if keys.iter().any(|k| k.is_empty()) {
            return Err(AnalysisError::analysis("mapping keys must not be empty"));
        }

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&keys)
            .map_err(|e| AnalysisError::analysis(format!("Invalid mapping: {e}")))?;

        Ok(Self { ac, replacements })
    }

    /// Parse rules of the form `from => to`.
    pub fn from_rules<S: AsRef<str>>(rules: &[S]) -> Result<Self> {
        let mut mappings = Vec::with_capacity(rules.len());
        for rule in rules {
            let rule = rule.as_ref();
            let (from, to) = rule.split_once("=>").ok_or_else(|| {
                AnalysisError::analysis(format!("Invalid mapping rule [{rule}], expected `a => b`"))
            })?;
            mappings.push((from.trim().to_string(), to.trim().to_string()));
        }
        Self::new(mappings)
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();
        let mut last_match_end = 0;

        for m in self.ac.find_iter(input) {
            let replacement = &self.replacements[m.pattern().as_usize()];

            output.push_str(&input[last_match_end..m.start()]);
            let new_start = output.len();
            output.push_str(replacement);

            transformations.push(Transformation::new(
                m.start(),
                m.end(),
                new_start,
                output.len(),
            ));
            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);
        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "mapping"
    }

    fn normalizes(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_char_filter() {
        let filter = MappingCharFilter::new(vec![("ph", "f"), ("qu", "k")]).unwrap();
        let (output, trans) = filter.filter("phone queue");

        assert_eq!(output, "fone keue");
        assert_eq!(trans.len(), 2);
        assert_eq!(trans[0], Transformation::new(0, 2, 0, 1));
        assert_eq!(trans[1], Transformation::new(6, 8, 5, 6));
    }

    #[test]
    fn test_mapping_deletion() {
        let filter = MappingCharFilter::new(vec![("foo", "")]).unwrap();
        let (output, trans) = filter.filter("afoob");
        assert_eq!(output, "ab");
        assert_eq!(trans, vec![Transformation::new(1, 4, 1, 1)]);
    }

    #[test]
    fn test_mapping_longest_match() {
        let filter = MappingCharFilter::new(vec![("ab", "1"), ("abc", "2")]).unwrap();
        let (output, _) = filter.filter("abc");
        assert_eq!(output, "2");
    }

    #[test]
    fn test_mapping_multibyte() {
        let filter = MappingCharFilter::new(vec![("壱", "1")]).unwrap();
        let (output, trans) = filter.filter("第壱位");
        assert_eq!(output, "第1位");
        assert_eq!(trans, vec![Transformation::new(3, 6, 3, 4)]);
    }

    #[test]
    fn test_mapping_rules() {
        let filter = MappingCharFilter::from_rules(&["& => and", ":) => happy"]).unwrap();
        let (output, _) = filter.filter("you & me :)");
        assert_eq!(output, "you and me happy");

        assert!(MappingCharFilter::from_rules(&["no arrow"]).is_err());
    }
}
