//! Wordlist loading, normalization and narrowing.

use std::borrow::Cow;
use std::collections::HashSet;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::HarsanError;
use crate::har::{HarDocument, json_kind};

/// An ordered set of sensitive words.
///
/// Words are case-sensitive and distinct; insertion order is preserved so every
/// output derived from a wordlist is deterministic.
///
/// # Example
///
/// ```rust
/// use harsan_core::Wordlist;
///
/// let wordlist = Wordlist::new(["token", "password", "token"]);
/// assert_eq!(wordlist.len(), 2);
/// assert_eq!(wordlist.to_vec(), vec!["token", "password"]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Wordlist {
    words: IndexSet<String>,
}

impl Wordlist {
    /// Creates a wordlist from any sequence of strings, dropping duplicates.
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        words.into_iter().map(Into::into).collect()
    }

    /// Loads a wordlist from an untrusted JSON value.
    ///
    /// The value must be a JSON array whose items are all strings.
    ///
    /// # Errors
    ///
    /// Returns [`HarsanError::InvalidWordlist`] when the value is a string, an
    /// object, any other scalar, or an array holding a non-string item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use harsan_core::Wordlist;
    /// use serde_json::json;
    ///
    /// let wordlist = Wordlist::load(&json!(["word1", "word2", "word3"]))?;
    /// assert_eq!(wordlist.to_vec(), vec!["word1", "word2", "word3"]);
    ///
    /// assert!(Wordlist::load(&json!("words words more WORDS")).is_err());
    /// assert!(Wordlist::load(&json!(["what", "is", 12])).is_err());
    /// # Ok::<(), harsan_core::HarsanError>(())
    /// ```
    pub fn load(input: &Value) -> Result<Self, HarsanError> {
        let Value::Array(items) = input else {
            return Err(HarsanError::invalid_wordlist(format!(
                "expected an array of strings, got {}",
                json_kind(input)
            )));
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str().map(str::to_owned).ok_or_else(|| {
                    HarsanError::invalid_wordlist(format!(
                        "item #{index} is {}, expected a string",
                        json_kind(item)
                    ))
                })
            })
            .collect()
    }

    /// Keeps only the words that occur in the document's requests.
    ///
    /// A word is retained when it is exactly equal to a key or a scalar leaf found
    /// while walking every entry's `request` mapping recursively. Responses are not
    /// inspected and no substring matching is done. The result keeps this
    /// wordlist's order.
    pub fn trim(&self, har: &HarDocument) -> Self {
        let mut tokens = HashSet::new();
        for request in har.requests() {
            collect_tokens(request, &mut tokens);
        }

        let trimmed: Self = self
            .words
            .iter()
            .filter(|word| tokens.contains(word.as_str()))
            .cloned()
            .collect();

        debug!(
            before = self.len(),
            after = trimmed.len(),
            "trimmed wordlist against request data"
        );
        trimmed
    }

    /// Returns `true` when the word is part of the list.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterates over the words in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` when there are no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Copies the words into a vector, in insertion order.
    pub fn to_vec(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }
}

// Order matters: two wordlists are equal only when they list the same words in
// the same order.
impl PartialEq for Wordlist {
    fn eq(&self, other: &Self) -> bool {
        self.words.iter().eq(other.words.iter())
    }
}

impl Eq for Wordlist {}

impl<S: Into<String>> FromIterator<S> for Wordlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<String>> for Wordlist {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl From<Wordlist> for Vec<String> {
    fn from(wordlist: Wordlist) -> Self {
        wordlist.words.into_iter().collect()
    }
}

impl TryFrom<&Value> for Wordlist {
    type Error = HarsanError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::load(value)
    }
}

fn collect_tokens<'a>(value: &'a Value, tokens: &mut HashSet<Cow<'a, str>>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                tokens.insert(Cow::Borrowed(key.as_str()));
                collect_tokens(nested, tokens);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_tokens(item, tokens);
            }
        }
        Value::String(text) => {
            tokens.insert(Cow::Borrowed(text.as_str()));
        }
        Value::Number(number) => {
            tokens.insert(Cow::Owned(number.to_string()));
        }
        Value::Bool(flag) => {
            tokens.insert(Cow::Owned(flag.to_string()));
        }
        Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn har(value: Value) -> HarDocument {
        HarDocument::parse(value).expect("should be a valid HAR")
    }

    #[test]
    fn should_load_array_of_strings() {
        let wordlist = Wordlist::load(&json!(["word1", "word2", "word3"])).expect("should load");

        assert_eq!(wordlist.to_vec(), vec!["word1", "word2", "word3"]);
    }

    #[test]
    fn should_drop_duplicates_keeping_first_position() {
        let wordlist =
            Wordlist::load(&json!(["b", "a", "b", "c", "a"])).expect("should load");

        assert_eq!(wordlist.to_vec(), vec!["b", "a", "c"]);
    }

    #[rstest]
    #[case::mixed_items(json!(["what", "is", 12]))]
    #[case::plain_string(json!("words words more WORDS"))]
    #[case::object(json!({"wordlist": {"list": ["one", "two", "three"]}}))]
    #[case::null(json!(null))]
    #[case::nested_array(json!([["one"]]))]
    fn should_reject_non_string_sequences(#[case] input: Value) {
        let result = Wordlist::load(&input);

        let error = result.expect_err("should be rejected");
        assert!(error.is_type_error(), "unexpected error: {error}");
    }

    #[test]
    fn should_trim_to_request_keys_and_values() {
        let har = har(json!({"log": {"entries": [{"request": {"one": "two"}}]}}));
        let wordlist = Wordlist::new(["one", "two", "three"]);

        let trimmed = wordlist.trim(&har);

        assert_eq!(trimmed.to_vec(), vec!["one", "two"]);
    }

    #[test]
    fn should_keep_wordlist_order_when_trimming() {
        let har = har(json!({"log": {"entries": [{"request": {"two": "one"}}]}}));
        let wordlist = Wordlist::new(["three", "two", "one"]);

        let trimmed = wordlist.trim(&har);

        assert_eq!(trimmed.to_vec(), vec!["two", "one"]);
    }

    #[test]
    fn should_walk_nested_request_structures() {
        let har = har(json!({"log": {"entries": [{
            "request": {
                "method": "POST",
                "headers": [{"name": "Authorization", "value": "Bearer abc"}],
                "queryString": [{"name": "page", "value": 2}],
                "postData": {"params": [{"name": "password", "value": "hunter2"}]}
            }
        }]}}));
        let wordlist = Wordlist::new(["Authorization", "password", "hunter2", "2", "Bearer"]);

        let trimmed = wordlist.trim(&har);

        assert_eq!(
            trimmed.to_vec(),
            vec!["Authorization", "password", "hunter2", "2"]
        );
    }

    #[test]
    fn should_ignore_response_data_when_trimming() {
        let har = har(json!({"log": {"entries": [{
            "request": {"url": "https://example.com/"},
            "response": {"headers": [{"name": "token", "value": "secret"}]}
        }]}}));
        let wordlist = Wordlist::new(["token", "secret"]);

        assert!(wordlist.trim(&har).is_empty());
    }

    #[test]
    fn should_not_match_substrings_when_trimming() {
        let har = har(json!({"log": {"entries": [{"request": {"url": "https://example.com/?token=1"}}]}}));
        let wordlist = Wordlist::new(["token"]);

        assert!(wordlist.trim(&har).is_empty());
    }

    #[test]
    fn trim_should_be_idempotent() {
        let har = har(json!({"log": {"entries": [
            {"request": {"one": "two", "nested": [{"four": true}]}},
            {"response": {"three": "five"}}
        ]}}));
        let wordlist = Wordlist::new(["one", "two", "three", "four", "five", "true"]);

        let once = wordlist.trim(&har);
        let twice = once.trim(&har);

        assert_eq!(once, twice);
        assert_eq!(once.to_vec(), vec!["one", "two", "four", "true"]);
    }

    #[test]
    fn equality_should_depend_on_order() {
        assert_eq!(Wordlist::new(["a", "b"]), Wordlist::new(["a", "b", "a"]));
        assert_ne!(Wordlist::new(["a", "b"]), Wordlist::new(["b", "a"]));
    }

    #[test]
    fn should_deserialize_from_json_array() {
        let wordlist: Wordlist =
            serde_json::from_value(json!(["x", "y", "x"])).expect("should deserialize");

        assert_eq!(wordlist.to_vec(), vec!["x", "y"]);
        assert_eq!(
            serde_json::to_value(&wordlist).expect("should serialize"),
            json!(["x", "y"])
        );
    }
}
