//! Read-only default lists.
//!
//! These are plain constants: the engine never reads them implicitly, they are
//! copied into a [`SanitizerConfig`](crate::SanitizerConfig) by its `Default`
//! implementation or passed explicitly by the caller.

use crate::scrublist::MimeScrublist;
use crate::wordlist::Wordlist;

/// Default sensitive words, matched against parameter names and body text.
pub const DEFAULT_WORDLIST: &[&str] = &[
    "state",
    "shdf",
    "usg",
    "password",
    "email",
    "code",
    "code_verifier",
    "client_secret",
    "client_id",
    "token",
    "access_token",
    "authenticity_token",
    "id_token",
    "refresh_token",
    "appID",
    "challenge",
    "facetID",
    "assertion",
    "fcParams",
    "serverData",
    "Authorization",
    "auth",
    "x-client-data",
    "SAMLRequest",
    "SAMLResponse",
];

/// Default cookie names whose values are always redacted.
pub const DEFAULT_COOKIE_NAMES: &[&str] = &[
    "SID",
    "HSID",
    "SSID",
    "APISID",
    "SAPISID",
    "OSID",
    "NID",
    "session",
    "sessionid",
    "session_id",
    "JSESSIONID",
    "PHPSESSID",
    "csrftoken",
    "_csrf",
    "XSRF-TOKEN",
    "remember_token",
];

/// Default header names whose values are always redacted.
pub const DEFAULT_HEADER_NAMES: &[&str] = &[
    "Authorization",
    "authorization",
    "Proxy-Authorization",
    "proxy-authorization",
    "Cookie",
    "cookie",
    "Set-Cookie",
    "set-cookie",
    "X-Auth-Token",
    "x-auth-token",
    "X-CSRF-Token",
    "x-csrf-token",
    "X-Api-Key",
    "x-api-key",
    "x-client-data",
];

/// Default MIME scrublist: bodies of these types are blanked by `sanitize_all`.
pub const DEFAULT_MIME_SCRUBLIST: &[&str] = &[
    "application/javascript",
    "application/x-javascript",
    "text/javascript",
    "text/html",
    "text/css",
    "application/octet-stream",
    "image/",
    "font/",
    "application/font-woff",
    "application/font-woff2",
];

/// MIME types whose bodies are never considered for word scrubbing.
pub const DEFAULT_BODY_DENYLIST: &[&str] = &["image/", "audio/", "video/", "font/"];

/// Builds the default wordlist.
pub fn default_wordlist() -> Wordlist {
    Wordlist::new(DEFAULT_WORDLIST.iter().copied())
}

/// Builds the default MIME scrublist.
pub fn default_mime_scrublist() -> MimeScrublist {
    MimeScrublist::new(DEFAULT_MIME_SCRUBLIST.iter().copied())
}

/// Builds the default body denylist.
pub fn default_body_denylist() -> MimeScrublist {
    MimeScrublist::new(DEFAULT_BODY_DENYLIST.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_are_free_of_duplicates() {
        assert_eq!(default_wordlist().len(), DEFAULT_WORDLIST.len());
        assert_eq!(
            Wordlist::new(DEFAULT_COOKIE_NAMES.iter().copied()).len(),
            DEFAULT_COOKIE_NAMES.len()
        );
        assert_eq!(
            Wordlist::new(DEFAULT_HEADER_NAMES.iter().copied()).len(),
            DEFAULT_HEADER_NAMES.len()
        );
    }

    #[test]
    fn default_mime_scrublist_covers_scripts() {
        let scrublist = default_mime_scrublist();

        assert!(scrublist.matches("text/javascript"));
        assert!(scrublist.matches("image/png"));
        assert!(!scrublist.matches("application/json"));
    }
}
