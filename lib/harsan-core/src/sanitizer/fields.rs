//! In-place redaction of `{name, value}` items, cookie headers and URL queries.

use serde_json::Value;
use tracing::warn;
use url::{Url, form_urlencoded};

use super::config::NameFilter;
use super::redactor::Redactor;
use crate::har::section_items_mut;
use crate::scrublist::essence;
use crate::wordlist::Wordlist;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A name is sensitive when the configured filter or the wordlist selects it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NameMatcher<'a> {
    filter: &'a NameFilter,
    wordlist: &'a Wordlist,
}

impl<'a> NameMatcher<'a> {
    pub(crate) fn new(filter: &'a NameFilter, wordlist: &'a Wordlist) -> Self {
        Self { filter, wordlist }
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.filter.matches(name) || self.wordlist.contains(name)
    }
}

/// Replaces the `value` of every matching item of the array at `pointer`.
///
/// Items without a string `name` or without a `value` key are left alone.
/// Returns how many values changed.
pub(crate) fn redact_items(
    section: &mut Value,
    pointer: &str,
    matcher: NameMatcher<'_>,
    redactor: &dyn Redactor,
) -> usize {
    let mut count = 0;
    for item in section_items_mut(section, pointer) {
        let Some(name) = item.get("name").and_then(Value::as_str).map(str::to_owned) else {
            continue;
        };
        if !matcher.matches(&name) {
            continue;
        }
        let Some(value) = item.get_mut("value") else {
            continue;
        };
        let replacement = redactor.apply(&name, value);
        if *value != replacement {
            *value = replacement;
            count += 1;
        }
    }
    count
}

/// Redacts matching cookie values embedded in `Cookie` and `Set-Cookie` header values.
pub(crate) fn redact_cookie_headers(
    section: &mut Value,
    matcher: NameMatcher<'_>,
    redactor: &dyn Redactor,
) -> usize {
    let mut count = 0;
    for header in section_items_mut(section, "/headers") {
        let Some(name) = header.get("name").and_then(Value::as_str) else {
            continue;
        };
        let set_cookie = name.eq_ignore_ascii_case("set-cookie");
        if !set_cookie && !name.eq_ignore_ascii_case("cookie") {
            continue;
        }
        let Some(Value::String(value)) = header.get_mut("value") else {
            continue;
        };

        let (rewritten, changed) = if set_cookie {
            // Several Set-Cookie values may be folded into one header, one per line.
            let mut changed = 0;
            let lines: Vec<String> = value
                .split('\n')
                .map(|line| {
                    let (line, line_changed) = rewrite_cookie_pairs(line, true, matcher, redactor);
                    changed += line_changed;
                    line
                })
                .collect();
            (lines.join("\n"), changed)
        } else {
            rewrite_cookie_pairs(value, false, matcher, redactor)
        };

        if changed > 0 {
            *value = rewritten;
            count += changed;
        }
    }
    count
}

/// Redacts matching parameters in the query component of the request `url`.
///
/// Only the query text is rewritten in place: the rest of the URL and the pairs
/// that do not match keep their original spelling.
pub(crate) fn redact_url_query(
    request: &mut Value,
    matcher: NameMatcher<'_>,
    redactor: &dyn Redactor,
) -> usize {
    let Some(Value::String(raw_url)) = request.get_mut("url") else {
        return 0;
    };
    let query_end = raw_url.find('#').unwrap_or(raw_url.len());
    let Some(query_start) = raw_url[..query_end].find('?').map(|index| index + 1) else {
        return 0;
    };

    if let Err(error) = Url::parse(raw_url) {
        warn!(%error, "request url cannot be parsed, its query is left untouched");
        return 0;
    }

    let (rewritten, count) = rewrite_query(&raw_url[query_start..query_end], matcher, redactor);
    if count > 0 {
        raw_url.replace_range(query_start..query_end, &rewritten);
    }
    count
}

/// Redacts matching fields in the raw text of a url-encoded form body.
pub(crate) fn redact_form_text(
    request: &mut Value,
    matcher: NameMatcher<'_>,
    redactor: &dyn Redactor,
) -> usize {
    let Some(post_data) = request.get_mut("postData") else {
        return 0;
    };
    let is_form = post_data
        .get("mimeType")
        .and_then(Value::as_str)
        .is_some_and(|mime_type| essence(mime_type) == FORM_URLENCODED);
    if !is_form {
        return 0;
    }
    let Some(Value::String(text)) = post_data.get_mut("text") else {
        return 0;
    };

    let (rewritten, count) = rewrite_query(text, matcher, redactor);
    if count > 0 {
        *text = rewritten;
    }
    count
}

fn rewrite_cookie_pairs(
    raw: &str,
    first_only: bool,
    matcher: NameMatcher<'_>,
    redactor: &dyn Redactor,
) -> (String, usize) {
    let mut count = 0;
    let mut segments = Vec::new();
    for (index, segment) in raw.split(';').enumerate() {
        if first_only && index > 0 {
            segments.push(segment.to_owned());
            continue;
        }
        let Some((name, value)) = segment.split_once('=') else {
            segments.push(segment.to_owned());
            continue;
        };
        let cookie_name = name.trim();
        if !matcher.matches(cookie_name) {
            segments.push(segment.to_owned());
            continue;
        }
        let replacement = redactor.apply_text(cookie_name, value.trim());
        if replacement == value.trim() {
            segments.push(segment.to_owned());
            continue;
        }
        count += 1;
        segments.push(format!("{name}={replacement}"));
    }
    (segments.join(";"), count)
}

fn rewrite_query(query: &str, matcher: NameMatcher<'_>, redactor: &dyn Redactor) -> (String, usize) {
    let mut count = 0;
    let mut pieces = Vec::new();
    for piece in query.split('&') {
        let Some((raw_name, _)) = piece.split_once('=') else {
            pieces.push(piece.to_owned());
            continue;
        };
        let Some((name, value)) = form_urlencoded::parse(piece.as_bytes()).next() else {
            pieces.push(piece.to_owned());
            continue;
        };
        if !matcher.matches(&name) {
            pieces.push(piece.to_owned());
            continue;
        }
        let replacement = redactor.apply_text(&name, &value);
        if replacement == value {
            pieces.push(piece.to_owned());
            continue;
        }
        count += 1;
        let encoded: String = form_urlencoded::byte_serialize(replacement.as_bytes()).collect();
        pieces.push(format!("{raw_name}={encoded}"));
    }
    (pieces.join("&"), count)
}
