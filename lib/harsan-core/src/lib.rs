//! # Harsan Core
//!
//! Sanitize HTTP Archive (HAR) captures before sharing them.
//!
//! A HAR capture records every request and response a browser made, including
//! cookies, authorization headers, tokens in query strings and response bodies.
//! This crate validates such a capture and redacts the sensitive parts while
//! keeping the document a valid HAR.
//!
//! The crate has two parts:
//! - **[`HarDocument`]** - validates an untrusted JSON value against the minimal
//!   HAR shape and exposes typed read access to cookies, headers, parameters,
//!   mimeTypes and bodies
//! - **[`HarSanitizer`]** - lists what is sensitive and redacts it, driven by a
//!   [`Wordlist`], a [`MimeScrublist`] and a [`SanitizerConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use harsan_core::{HarDocument, HarSanitizer, Wordlist, default_mime_scrublist};
//! use serde_json::json;
//!
//! let raw = json!({"log": {"entries": [{
//!     "request": {
//!         "method": "GET",
//!         "url": "https://example.com/?access_token=abc",
//!         "cookies": [],
//!         "headers": [{"name": "Authorization", "value": "Bearer abc"}],
//!         "queryString": [{"name": "access_token", "value": "abc"}]
//!     },
//!     "response": {
//!         "cookies": [],
//!         "headers": [],
//!         "content": {"mimeType": "application/json", "text": "{\"access_token\": \"abc\"}"}
//!     }
//! }]}});
//!
//! let har = HarDocument::parse(raw)?;
//! let wordlist = Wordlist::load(&json!(["access_token"]))?;
//!
//! let sanitizer = HarSanitizer::default();
//! let clean = sanitizer.sanitize_all(har, &wordlist, &default_mime_scrublist());
//!
//! let json = clean.into_json();
//! let request = &json["log"]["entries"][0]["request"];
//! assert_eq!(request["headers"][0]["value"], "[Authorization_redacted]");
//! assert_eq!(request["queryString"][0]["value"], "[access_token_redacted]");
//! # Ok::<(), harsan_core::HarsanError>(())
//! ```
//!
//! ## Pass Order
//!
//! [`HarSanitizer::sanitize_all`] narrows the wordlist to the words present in
//! the requests, then blanks bodies by mimeType, then redacts cookies, headers
//! and query parameters, and finally redacts whole words in the remaining bodies.
//! MIME blanking runs first so word matching never runs on a blanked body.
//!
//! ## Error Handling
//!
//! [`HarsanError`] covers every failure:
//! - [`HarsanError::InvalidHar`] - the input is not a HAR document
//! - [`HarsanError::InvalidWordlist`] - a wordlist is not a sequence of strings
//! - [`HarsanError::InvalidConfig`] - the sanitizer configuration is malformed
//!
//! Scrub passes themselves cannot fail: they only accept already validated inputs.
//!
//! ## Features
//!
//! - `yaml` - read a [`SanitizerConfig`] from YAML with `SanitizerConfig::from_yaml_str`

#![cfg_attr(docsrs, feature(doc_cfg))]

mod defaults;
mod error;
mod har;
mod sanitizer;
mod scrublist;
mod wordlist;

pub use self::defaults::{
    DEFAULT_BODY_DENYLIST, DEFAULT_COOKIE_NAMES, DEFAULT_HEADER_NAMES, DEFAULT_MIME_SCRUBLIST,
    DEFAULT_WORDLIST, default_body_denylist, default_mime_scrublist, default_wordlist,
};
pub use self::error::HarsanError;
pub use self::har::{BodyText, HarDocument, NameValue};
pub use self::sanitizer::{
    HarSanitizer, NameFilter, NameTagRedactor, Redactor, SanitizeReport, SanitizerConfig,
    ScrubTarget, redact_words_in_text,
};
pub use self::scrublist::MimeScrublist;
pub use self::wordlist::Wordlist;
