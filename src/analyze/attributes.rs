//! Selection of extended token attributes for explain output.

use std::collections::BTreeMap;

use ahash::AHashSet;

use crate::analysis::token::{AttributeValue, Token};

/// Attribute names that describe the token itself and are reported in
/// their own fields.
const CANONICAL_ATTRIBUTES: &[&str] = &[
    "term",
    "bytes",
    "position",
    "positionincrement",
    "position_increment",
    "startoffset",
    "start_offset",
    "endoffset",
    "end_offset",
    "type",
];

/// Case-insensitive set of attribute names to report.
///
/// An empty filter reports every extended attribute.
#[derive(Clone, Debug, Default)]
pub struct AttributeFilter {
    include: AHashSet<String>,
}

impl AttributeFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        AttributeFilter {
            include: names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    /// Whether the attribute `name` is reported.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        !CANONICAL_ATTRIBUTES.contains(&name.as_str())
            && (self.include.is_empty() || self.include.contains(&name))
    }

    /// Collect the reported attributes of `token`, rendering byte values
    /// for display.
    pub fn extract(&self, token: &Token) -> BTreeMap<String, AttributeValue> {
        token
            .attributes()
            .filter(|(name, _)| self.matches(name))
            .map(|(name, value)| (name.clone(), value.to_display()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Token {
        Token::new("foo", 0)
            .with_attribute("keyword", true)
            .with_attribute("payload", vec![0x61u8, 0x62])
            .with_attribute("type", "ignored")
    }

    #[test]
    fn test_empty_filter_reports_all_extended() {
        let attributes = AttributeFilter::default().extract(&token());

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes["keyword"], AttributeValue::Bool(true));
        assert_eq!(attributes["payload"], AttributeValue::Text("[61 62]".to_string()));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let attributes = AttributeFilter::new(["KeyWord"]).extract(&token());

        assert_eq!(attributes.len(), 1);
        assert!(attributes.contains_key("keyword"));
    }
}
