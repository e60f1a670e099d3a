//! Whole-word matching of wordlist entries inside body text.

use std::borrow::Cow;

use indexmap::IndexSet;
use regex::Regex;
use tracing::warn;

use super::redactor::Redactor;
use crate::wordlist::Wordlist;

/// Finds whole-word, case-sensitive occurrences of wordlist entries.
///
/// A side of a word that starts (or ends) with a word character must sit on a
/// word boundary, so `one` matches in `"I have one thing"` but not in
/// `"oneness"`. Longer words are tried first.
#[derive(Debug, Clone)]
pub(crate) struct WordMatcher {
    regexes: Vec<Regex>,
}

impl WordMatcher {
    pub(crate) fn new(wordlist: &Wordlist) -> Self {
        let mut words: Vec<&str> = wordlist.iter().filter(|word| !word.is_empty()).collect();
        words.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));
        if words.is_empty() {
            return Self {
                regexes: Vec::new(),
            };
        }

        let alternation = words
            .iter()
            .map(|word| word_pattern(word))
            .collect::<Vec<_>>()
            .join("|");

        match Regex::new(&alternation) {
            Ok(regex) => Self {
                regexes: vec![regex],
            },
            Err(error) => {
                warn!(%error, words = words.len(), "combined word pattern rejected, matching word by word");
                let regexes = words
                    .iter()
                    .filter_map(|word| match Regex::new(&word_pattern(word)) {
                        Ok(regex) => Some(regex),
                        Err(error) => {
                            warn!(%error, word, "skipping word that cannot be matched");
                            None
                        }
                    })
                    .collect();
                Self { regexes }
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }

    /// Distinct words found in the text, in order of first occurrence.
    pub(crate) fn find_words<'t>(&self, text: &'t str) -> IndexSet<&'t str> {
        self.regexes
            .iter()
            .flat_map(|regex| regex.find_iter(text))
            .map(|found| found.as_str())
            .collect()
    }

    /// Replaces every occurrence and returns the new text with the replacement count.
    pub(crate) fn replace<'t>(
        &self,
        text: &'t str,
        redactor: &dyn Redactor,
    ) -> (Cow<'t, str>, usize) {
        let mut result = Cow::Borrowed(text);
        let mut count = 0;
        for regex in &self.regexes {
            let replaced = match regex.replace_all(&result, |captures: &regex::Captures<'_>| {
                count += 1;
                let word = captures.get(0).map_or("", |found| found.as_str());
                redactor.apply_text(word, word)
            }) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                result = Cow::Owned(replaced);
            }
        }
        (result, count)
    }
}

/// Redacts whole-word occurrences of the wordlist in `text`.
///
/// ```rust
/// use harsan_core::{NameTagRedactor, Wordlist, redact_words_in_text};
///
/// let wordlist = Wordlist::new(["one", "two"]);
/// let text = redact_words_in_text("Hello I have one thing, not two. oneness", &wordlist, &NameTagRedactor);
/// assert_eq!(text, "Hello I have [one_redacted] thing, not [two_redacted]. oneness");
/// ```
pub fn redact_words_in_text(text: &str, wordlist: &Wordlist, redactor: &dyn Redactor) -> String {
    WordMatcher::new(wordlist)
        .replace(text, redactor)
        .0
        .into_owned()
}

fn word_pattern(word: &str) -> String {
    let leading = if word.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trailing = if word.chars().next_back().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("{leading}{}{trailing}", regex::escape(word))
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
