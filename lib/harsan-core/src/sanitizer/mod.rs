//! The sanitization engine.
//!
//! [`HarSanitizer`] offers two kinds of operations:
//!
//! - **listing passes** borrow a [`HarDocument`] and report what a sanitize
//!   pass would touch (`scrub_cookies`, `scrub_headers`, `scrub_query_params`,
//!   `scrub_mime_types`, `matched_body_words`);
//! - **sanitize passes** consume a [`HarDocument`] and return the redacted one
//!   (`scrub_body_words`, `sanitize_all`).
//!
//! # Example
//!
//! ```rust
//! use harsan_core::{HarDocument, HarSanitizer, MimeScrublist, NameFilter, SanitizerConfig, Wordlist};
//! use serde_json::json;
//!
//! let har = HarDocument::parse(json!({"log": {"entries": [{
//!     "request": {
//!         "url": "https://example.com/login?user=bob&password=hunter2",
//!         "cookies": [{"name": "session", "value": "abc"}],
//!         "headers": [{"name": "Accept", "value": "*/*"}],
//!         "queryString": [
//!             {"name": "user", "value": "bob"},
//!             {"name": "password", "value": "hunter2"}
//!         ]
//!     },
//!     "response": {
//!         "content": {"mimeType": "text/javascript", "text": "var password = 1;"}
//!     }
//! }]}}))?;
//!
//! let sanitizer = HarSanitizer::new(SanitizerConfig {
//!     cookies: NameFilter::All,
//!     ..SanitizerConfig::default()
//! });
//! assert_eq!(sanitizer.scrub_cookies(&har), vec!["session"]);
//!
//! let clean = sanitizer.sanitize_all(
//!     har,
//!     &Wordlist::new(["password"]),
//!     &MimeScrublist::new(["text/javascript"]),
//! );
//! let json = clean.into_json();
//! let request = &json["log"]["entries"][0]["request"];
//! assert_eq!(request["cookies"][0]["value"], "[session_redacted]");
//! assert_eq!(request["queryString"][1]["value"], "[password_redacted]");
//! assert_eq!(json["log"]["entries"][0]["response"]["content"]["text"], "");
//! # Ok::<(), harsan_core::HarsanError>(())
//! ```

use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::har::{HarDocument, REQUEST, RESPONSE};
use crate::scrublist::MimeScrublist;
use crate::wordlist::Wordlist;

mod body;
mod config;
mod fields;
mod redactor;

pub use self::body::redact_words_in_text;
use self::body::WordMatcher;
pub use self::config::{NameFilter, SanitizerConfig};
use self::fields::{
    NameMatcher, redact_cookie_headers, redact_form_text, redact_items, redact_url_query,
};
pub use self::redactor::{NameTagRedactor, Redactor};

/// The HAR substructure a scrub pass operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ScrubTarget {
    /// Request and response cookies, and `Cookie`/`Set-Cookie` header pairs.
    #[display("cookie")]
    Cookie,
    /// Request and response headers.
    #[display("header")]
    Header,
    /// Query-string items, form parameters and the request URL query.
    #[display("query_param")]
    QueryParam,
    /// Response body text.
    #[display("body")]
    Body,
}

/// What a sanitize pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    /// Words actually used after narrowing the wordlist.
    pub wordlist: Vec<String>,
    /// Distinct mimeTypes whose bodies were blanked.
    pub blanked_mime_types: Vec<String>,
    /// Number of cookie values redacted.
    pub cookies: usize,
    /// Number of header values redacted.
    pub headers: usize,
    /// Number of query-string, form and URL parameter values redacted.
    pub query_params: usize,
    /// Number of word occurrences redacted in bodies.
    pub body_words: usize,
}

impl SanitizeReport {
    /// Number of redactions recorded for a target.
    pub fn count(&self, target: ScrubTarget) -> usize {
        match target {
            ScrubTarget::Cookie => self.cookies,
            ScrubTarget::Header => self.headers,
            ScrubTarget::QueryParam => self.query_params,
            ScrubTarget::Body => self.body_words,
        }
    }
}

/// Scrubs sensitive values from HAR documents.
///
/// The engine holds only its configuration and redactor: it is `Send + Sync`
/// and may be shared, while each call owns the document it works on.
#[derive(derive_more::Debug)]
pub struct HarSanitizer {
    config: SanitizerConfig,
    #[debug(skip)]
    redactor: Box<dyn Redactor + Send + Sync>,
}

impl Default for HarSanitizer {
    fn default() -> Self {
        Self::new(SanitizerConfig::default())
    }
}

impl HarSanitizer {
    /// Creates an engine.
    ///
    /// Values are replaced with `config.redaction_marker` when set, otherwise
    /// with [`NameTagRedactor`].
    pub fn new(config: SanitizerConfig) -> Self {
        let redactor: Box<dyn Redactor + Send + Sync> = match &config.redaction_marker {
            Some(marker) => Box::new(marker.clone()),
            None => Box::new(NameTagRedactor),
        };
        Self { config, redactor }
    }

    /// Replaces the redactor.
    #[must_use]
    pub fn with_redactor(mut self, redactor: impl Redactor + Send + Sync + 'static) -> Self {
        self.redactor = Box::new(redactor);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Names of the cookies selected by the configured cookie filter.
    pub fn scrub_cookies(&self, har: &HarDocument) -> Vec<String> {
        matching_names(
            har.cookies().into_iter().map(|cookie| cookie.name),
            &self.config.cookies,
        )
    }

    /// Names of the headers selected by the configured header filter.
    pub fn scrub_headers(&self, har: &HarDocument) -> Vec<String> {
        matching_names(
            har.headers().into_iter().map(|header| header.name),
            &self.config.headers,
        )
    }

    /// Names of the query-string and form parameters selected by the configured filter.
    pub fn scrub_query_params(&self, har: &HarDocument) -> Vec<String> {
        matching_names(
            har.query_params()
                .into_iter()
                .chain(har.post_params())
                .map(|param| param.name),
            &self.config.query_params,
        )
    }

    /// Distinct mimeTypes of the document that the scrublist selects.
    pub fn scrub_mime_types(&self, har: &HarDocument, scrublist: &MimeScrublist) -> Vec<String> {
        har.mime_types()
            .into_iter()
            .filter(|mime_type| scrublist.matches(mime_type))
            .collect()
    }

    /// Distinct wordlist entries found as whole words in eligible bodies.
    pub fn matched_body_words(&self, har: &HarDocument, wordlist: &Wordlist) -> Vec<String> {
        let matcher = WordMatcher::new(wordlist);
        let bodies = har.body_texts();
        let words: IndexSet<&str> = bodies
            .iter()
            .flat_map(|body| matcher.find_words(&body.text))
            .collect();
        words.into_iter().map(str::to_owned).collect()
    }

    /// Redacts whole-word occurrences of the wordlist in eligible bodies.
    pub fn scrub_body_words(&self, mut har: HarDocument, wordlist: &Wordlist) -> HarDocument {
        self.redact_bodies(&mut har, wordlist);
        har
    }

    /// Applies every pass and returns the sanitized document.
    ///
    /// See [`sanitize_all_with_report`](Self::sanitize_all_with_report) for the pass order.
    pub fn sanitize_all(
        &self,
        har: HarDocument,
        wordlist: &Wordlist,
        scrublist: &MimeScrublist,
    ) -> HarDocument {
        self.sanitize_all_with_report(har, wordlist, scrublist).0
    }

    /// Applies every pass with the configured wordlist and MIME scrublist.
    pub fn sanitize_default(&self, har: HarDocument) -> HarDocument {
        self.sanitize_all(har, &self.config.wordlist, &self.config.mime_scrublist)
    }

    /// Applies every pass and reports what changed.
    ///
    /// Passes run in a fixed order:
    /// 1. narrow the wordlist to the requests, when `trim_wordlist` is set;
    /// 2. blank the body text of every response whose mimeType is scrubbed;
    /// 3. redact cookie values (cookie arrays, `Cookie` and `Set-Cookie` headers);
    /// 4. redact header values;
    /// 5. redact query-string, form and URL parameter values, including the raw
    ///    text of url-encoded form bodies;
    /// 6. redact wordlist entries in the remaining bodies.
    ///
    /// Names are never changed. With a redactor that ignores the current value,
    /// running this again on its own output changes nothing.
    pub fn sanitize_all_with_report(
        &self,
        mut har: HarDocument,
        wordlist: &Wordlist,
        scrublist: &MimeScrublist,
    ) -> (HarDocument, SanitizeReport) {
        let wordlist = if self.config.trim_wordlist {
            wordlist.trim(&har)
        } else {
            wordlist.clone()
        };
        let redactor = self.redactor.as_ref();

        let mut report = SanitizeReport {
            wordlist: wordlist.to_vec(),
            blanked_mime_types: blank_mime_types(&mut har, scrublist),
            ..SanitizeReport::default()
        };

        let cookies = NameMatcher::new(&self.config.cookies, &wordlist);
        let headers = NameMatcher::new(&self.config.headers, &wordlist);
        let params = NameMatcher::new(&self.config.query_params, &wordlist);

        for entry in har.entries_mut() {
            for key in [REQUEST, RESPONSE] {
                let Some(section) = entry.get_mut(key).filter(|section| section.is_object()) else {
                    continue;
                };
                report.cookies += redact_items(section, "/cookies", cookies, redactor);
                report.cookies += redact_cookie_headers(section, cookies, redactor);
                report.headers += redact_items(section, "/headers", headers, redactor);
                if key == REQUEST {
                    report.query_params +=
                        redact_items(section, "/queryString", params, redactor);
                    report.query_params +=
                        redact_items(section, "/postData/params", params, redactor);
                    report.query_params += redact_form_text(section, params, redactor);
                    report.query_params += redact_url_query(section, params, redactor);
                }
            }
        }

        report.body_words = self.redact_bodies(&mut har, &wordlist);

        debug!(
            words = report.wordlist.len(),
            blanked = report.blanked_mime_types.len(),
            cookies = report.cookies,
            headers = report.headers,
            query_params = report.query_params,
            body_words = report.body_words,
            "sanitized HAR document"
        );
        (har, report)
    }

    fn redact_bodies(&self, har: &mut HarDocument, wordlist: &Wordlist) -> usize {
        let matcher = WordMatcher::new(wordlist);
        if matcher.is_empty() {
            return 0;
        }

        let bodies = har.body_texts();
        let entries = har.entries_mut();
        let mut total = 0;
        for body in bodies {
            let (text, count) = matcher.replace(&body.text, self.redactor.as_ref());
            if count == 0 {
                continue;
            }
            if let Some(slot) = entries
                .get_mut(body.entry_index)
                .and_then(|entry| entry.pointer_mut("/response/content/text"))
            {
                *slot = Value::String(text.into_owned());
                total += count;
            }
        }
        debug!(target_pass = %ScrubTarget::Body, total, "redacted body words");
        total
    }
}

/// Blanks the text of every response body whose mimeType the scrublist selects.
fn blank_mime_types(har: &mut HarDocument, scrublist: &MimeScrublist) -> Vec<String> {
    let mut blanked = IndexSet::new();
    for entry in har.entries_mut() {
        let Some(content) = entry.pointer_mut("/response/content") else {
            continue;
        };
        let Some(mime_type) = content.get("mimeType").and_then(Value::as_str) else {
            continue;
        };
        if !scrublist.matches(mime_type) {
            continue;
        }
        let mime_type = mime_type.to_owned();
        if let Some(text) = content.get_mut("text")
            && text.as_str().is_none_or(|text| !text.is_empty())
        {
            *text = Value::String(String::new());
            blanked.insert(mime_type);
        }
    }
    blanked.into_iter().collect()
}

fn matching_names(names: impl Iterator<Item = String>, filter: &NameFilter) -> Vec<String> {
    let names: IndexSet<String> = names.filter(|name| filter.matches(name)).collect();
    names.into_iter().collect()
}
