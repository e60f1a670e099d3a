//! MIME type scrublists.

use serde::{Deserialize, Serialize};

/// An ordered list of MIME type prefixes.
///
/// A pattern matches every mimeType whose essence (lowercase `type/subtype`,
/// parameters stripped) starts with it, ignoring case. A trailing `*` is
/// dropped, so `image/*` behaves like `image/`.
///
/// ```rust
/// use harsan_core::MimeScrublist;
///
/// let scrublist = MimeScrublist::new(["text/java", "application/vnd.", "image/*"]);
/// assert!(scrublist.matches("text/javascript"));
/// assert!(scrublist.matches("application/vnd.api+json; charset=utf-8"));
/// assert!(scrublist.matches("image/png"));
/// assert!(!scrublist.matches("text/html"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct MimeScrublist {
    patterns: Vec<String>,
}

impl MimeScrublist {
    /// Creates a scrublist from MIME patterns, dropping duplicates.
    pub fn new<S: Into<String>>(patterns: impl IntoIterator<Item = S>) -> Self {
        let mut result = Self::default();
        for pattern in patterns {
            let pattern = pattern.into();
            if !result.patterns.contains(&pattern) {
                result.patterns.push(pattern);
            }
        }
        result
    }

    /// Returns `true` when any pattern matches the given mimeType.
    pub fn matches(&self, mime_type: &str) -> bool {
        let essence = essence(mime_type);
        self.patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, &essence))
    }

    /// Iterates over the patterns.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.iter().map(String::as_str)
    }

    /// Returns `true` when the scrublist has no pattern.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MimeScrublist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<String>> for MimeScrublist {
    fn from(patterns: Vec<String>) -> Self {
        Self::new(patterns)
    }
}

impl From<MimeScrublist> for Vec<String> {
    fn from(scrublist: MimeScrublist) -> Self {
        scrublist.patterns
    }
}

/// Lowercase `type/subtype` of a mimeType, without parameters.
///
/// Values the `mime` crate cannot parse fall back to their trimmed, lowercased text.
pub(crate) fn essence(mime_type: &str) -> String {
    match mime_type.trim().parse::<::mime::Mime>() {
        Ok(parsed) => parsed.essence_str().to_ascii_lowercase(),
        Err(_) => mime_type.trim().to_ascii_lowercase(),
    }
}

// A pattern left empty once trimmed never matches.
fn pattern_matches(pattern: &str, essence: &str) -> bool {
    let pattern = pattern.trim().to_ascii_lowercase();
    let prefix = pattern.trim_end_matches('*');
    !prefix.is_empty() && essence.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::type_prefix("text/", "text/javascript", true)]
    #[case::type_prefix_with_params("text/", "text/html; charset=UTF-8", true)]
    #[case::wildcard("image/*", "image/png", true)]
    #[case::exact("application/json", "application/json", true)]
    #[case::exact_with_params("application/json", "application/json; charset=utf-8", true)]
    #[case::case_insensitive("Text/JavaScript", "text/javascript", true)]
    #[case::longer_subtype("application/json", "application/jsonp", true)]
    #[case::vendor_prefix("application/vnd.", "application/vnd.api+json", true)]
    #[case::partial_subtype("text/java", "text/javascript", true)]
    #[case::partial_subtype_mismatch("text/java", "text/html", false)]
    #[case::bare_type("text", "text/html", true)]
    #[case::unrelated("application/json", "text/json", false)]
    #[case::other_type("text/", "application/javascript", false)]
    #[case::bare_wildcard("*", "text/plain", false)]
    fn should_match_patterns(#[case] pattern: &str, #[case] mime_type: &str, #[case] expected: bool) {
        let scrublist = MimeScrublist::new([pattern]);

        assert_eq!(scrublist.matches(mime_type), expected);
    }

    #[test]
    fn should_deduplicate_deserialized_patterns() {
        let scrublist: MimeScrublist =
            serde_json::from_value(serde_json::json!(["text/", "image/*", "text/"]))
                .expect("should deserialize");

        assert_eq!(scrublist, MimeScrublist::new(["text/", "image/*"]));
        assert_eq!(
            serde_json::to_value(&scrublist).expect("should serialize"),
            serde_json::json!(["text/", "image/*"])
        );
    }

    #[test]
    fn should_use_raw_text_when_mime_cannot_be_parsed() {
        let scrublist = MimeScrublist::new(["not a mime"]);

        assert!(scrublist.matches(" Not a MIME "));
    }

    #[test]
    fn empty_scrublist_matches_nothing() {
        let scrublist = MimeScrublist::default();

        assert!(scrublist.is_empty());
        assert!(!scrublist.matches("text/html"));
    }

    #[test]
    fn should_deduplicate_patterns() {
        let scrublist = MimeScrublist::new(["text/", "image/", "text/"]);

        insta::assert_debug_snapshot!(scrublist.iter().collect::<Vec<_>>(), @r#"
        [
            "text/",
            "image/",
        ]
        "#);
    }
}
