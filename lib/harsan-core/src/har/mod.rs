//! HAR document validation and typed read access.
//!
//! A [`HarDocument`] wraps an untrusted JSON value once it has been checked
//! against the minimal HAR 1.2 shape:
//!
//! ```text
//! { "log": { "entries": [ { "request": {...}, "response": {...} }, ... ] } }
//! ```
//!
//! Only the skeleton is validated. Inner arrays such as `cookies`, `headers`
//! or `queryString` are read leniently: a missing or malformed array simply
//! contributes no item.
//!
//! # Example
//!
//! ```rust
//! use harsan_core::HarDocument;
//! use serde_json::json;
//!
//! let raw = json!({"log": {"entries": [{
//!     "request": {
//!         "method": "GET",
//!         "url": "https://example.com/?q=1",
//!         "cookies": [{"name": "session", "value": "abc"}],
//!         "headers": [],
//!         "queryString": [{"name": "q", "value": "1"}]
//!     },
//!     "response": {
//!         "cookies": [],
//!         "headers": [],
//!         "content": {"mimeType": "text/plain", "text": "hello"}
//!     }
//! }]}});
//!
//! let har = HarDocument::parse(raw.clone())?;
//! assert_eq!(har.cookies()[0].name, "session");
//! assert_eq!(har.mime_types(), vec!["text/plain"]);
//! assert_eq!(har.into_json(), raw);
//! # Ok::<(), harsan_core::HarsanError>(())
//! ```

use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::defaults::default_body_denylist;
use crate::error::HarsanError;
use crate::scrublist::MimeScrublist;

mod view;
pub use self::view::{BodyText, NameValue};

pub(crate) const REQUEST: &str = "request";
pub(crate) const RESPONSE: &str = "response";

/// A validated HTTP Archive document.
///
/// The backing JSON is kept verbatim: serializing an unmodified document
/// yields exactly the value it was parsed from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct HarDocument {
    root: Value,
}

impl HarDocument {
    /// Validates a decoded JSON value and wraps it.
    ///
    /// Checks, in order:
    /// 1. the root is an object;
    /// 2. `log` exists and is an object;
    /// 3. `log.entries` exists and is an array;
    /// 4. `log.entries` is not empty;
    /// 5. every entry is an object;
    /// 6. every entry has a `request` or a `response`, and each one present is an object.
    ///
    /// # Errors
    ///
    /// Returns [`HarsanError::InvalidHar`] naming the first failed check.
    pub fn parse(value: Value) -> Result<Self, HarsanError> {
        validate(&value)?;
        Ok(Self { root: value })
    }

    /// Returns the backing JSON value.
    pub fn as_json(&self) -> &Value {
        &self.root
    }

    /// Unwraps the backing JSON value.
    pub fn into_json(self) -> Value {
        self.root
    }

    /// Returns the number of entries.
    pub fn entries_len(&self) -> usize {
        self.entries().len()
    }

    /// Request and response cookies of every entry, first appearance wins.
    pub fn cookies(&self) -> Vec<NameValue> {
        collect_name_values(self.sections(&[REQUEST, RESPONSE]), "/cookies")
    }

    /// Request and response headers of every entry, first appearance wins.
    pub fn headers(&self) -> Vec<NameValue> {
        collect_name_values(self.sections(&[REQUEST, RESPONSE]), "/headers")
    }

    /// Request query-string parameters of every entry, first appearance wins.
    pub fn query_params(&self) -> Vec<NameValue> {
        collect_name_values(self.sections(&[REQUEST]), "/queryString")
    }

    /// Request form parameters (`postData.params`) of every entry, first appearance wins.
    pub fn post_params(&self) -> Vec<NameValue> {
        collect_name_values(self.sections(&[REQUEST]), "/postData/params")
    }

    /// Distinct response `content.mimeType` values, in document order.
    pub fn mime_types(&self) -> Vec<String> {
        let mime_types: IndexSet<&str> = self
            .sections(&[RESPONSE])
            .filter_map(|response| response.pointer("/content/mimeType"))
            .filter_map(Value::as_str)
            .collect();
        mime_types.into_iter().map(str::to_owned).collect()
    }

    /// Response bodies eligible for word scrubbing.
    ///
    /// Bodies with empty text, base64-encoded bodies, and bodies whose mimeType
    /// is image, audio, video or font are left out.
    pub fn body_texts(&self) -> Vec<BodyText> {
        self.body_texts_excluding(&default_body_denylist())
    }

    /// Response bodies eligible for word scrubbing, with a custom MIME denylist.
    pub fn body_texts_excluding(&self, denylist: &MimeScrublist) -> Vec<BodyText> {
        self.entries()
            .iter()
            .enumerate()
            .filter_map(|(entry_index, entry)| {
                let content = entry.get(RESPONSE)?.get("content")?;
                let text = content.get("text")?.as_str()?;
                if text.is_empty() || is_base64(content) {
                    return None;
                }
                let mime_type = content
                    .get("mimeType")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if denylist.matches(mime_type) {
                    return None;
                }
                Some(BodyText {
                    entry_index,
                    mime_type: mime_type.to_owned(),
                    text: text.to_owned(),
                })
            })
            .collect()
    }

    pub(crate) fn entries(&self) -> &[Value] {
        self.root
            .pointer("/log/entries")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Value] {
        match self
            .root
            .pointer_mut("/log/entries")
            .and_then(Value::as_array_mut)
        {
            Some(entries) => entries.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Every entry's `request` object.
    pub(crate) fn requests(&self) -> impl Iterator<Item = &Value> + '_ {
        self.sections(&[REQUEST])
    }

    fn sections<'a>(&'a self, keys: &'a [&'a str]) -> impl Iterator<Item = &'a Value> + 'a {
        self.entries()
            .iter()
            .flat_map(move |entry| keys.iter().filter_map(move |key| entry.get(*key)))
            .filter(|section| section.is_object())
    }
}

impl TryFrom<Value> for HarDocument {
    type Error = HarsanError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl FromStr for HarDocument {
    type Err = HarsanError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = serde_json::from_str(raw)?;
        Self::parse(value)
    }
}

impl Serialize for HarDocument {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl From<HarDocument> for Value {
    fn from(har: HarDocument) -> Self {
        har.into_json()
    }
}

/// Items of the array found at `pointer` in a request or response object.
pub(crate) fn section_items<'a>(
    section: &'a Value,
    pointer: &str,
) -> impl Iterator<Item = &'a Value> + 'a {
    section
        .pointer(pointer)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// Mutable items of the array found at `pointer` in a request or response object.
pub(crate) fn section_items_mut<'a>(
    section: &'a mut Value,
    pointer: &str,
) -> impl Iterator<Item = &'a mut Value> + 'a {
    section
        .pointer_mut(pointer)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
}

pub(crate) fn is_base64(content: &Value) -> bool {
    content
        .get("encoding")
        .and_then(Value::as_str)
        .is_some_and(|encoding| encoding.eq_ignore_ascii_case("base64"))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn collect_name_values<'a>(sections: impl Iterator<Item = &'a Value>, pointer: &str) -> Vec<NameValue> {
    let items: IndexSet<NameValue> = sections
        .flat_map(|section| section_items(section, pointer))
        .filter_map(NameValue::from_item)
        .collect();
    items.into_iter().collect()
}

fn validate(value: &Value) -> Result<(), HarsanError> {
    let Value::Object(root) = value else {
        return Err(HarsanError::invalid_har(format!(
            "expected an object at the root, got {}",
            json_kind(value)
        )));
    };

    let log = match root.get("log") {
        Some(Value::Object(log)) => log,
        Some(other) => {
            return Err(HarsanError::invalid_har(format!(
                "`log` must be an object, got {}",
                json_kind(other)
            )));
        }
        None => return Err(HarsanError::invalid_har("missing `log`")),
    };

    let entries = match log.get("entries") {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(HarsanError::invalid_har(format!(
                "`log.entries` must be an array, got {}",
                json_kind(other)
            )));
        }
        None => return Err(HarsanError::invalid_har("missing `log.entries`")),
    };

    if entries.is_empty() {
        return Err(HarsanError::invalid_har("`log.entries` is empty"));
    }

    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(entry) = entry else {
            return Err(HarsanError::invalid_har(format!(
                "entry #{index} must be an object, got {}",
                json_kind(entry)
            )));
        };
        validate_entry(index, entry)?;
    }

    Ok(())
}

fn validate_entry(index: usize, entry: &Map<String, Value>) -> Result<(), HarsanError> {
    let request = entry.get(REQUEST);
    let response = entry.get(RESPONSE);
    if request.is_none() && response.is_none() {
        return Err(HarsanError::invalid_har(format!(
            "entry #{index} has neither `request` nor `response`"
        )));
    }

    for (key, section) in [(REQUEST, request), (RESPONSE, response)] {
        if let Some(section) = section
            && !section.is_object()
        {
            return Err(HarsanError::invalid_har(format!(
                "entry #{index}: `{key}` must be an object, got {}",
                json_kind(section)
            )));
        }
    }

    Ok(())
}
