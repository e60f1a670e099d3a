use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::{
    DEFAULT_COOKIE_NAMES, DEFAULT_HEADER_NAMES, DEFAULT_WORDLIST, default_mime_scrublist,
    default_wordlist,
};
use crate::error::HarsanError;
use crate::scrublist::MimeScrublist;
use crate::wordlist::Wordlist;

/// Selects which cookie, header or parameter names a pass redacts.
///
/// Serialized as `"all"` or `{"names": ["..."]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFilter {
    /// Every name matches.
    All,
    /// Only the listed names match (case-sensitive).
    Names(Wordlist),
}

impl NameFilter {
    /// A filter matching only the given names.
    pub fn names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::Names(Wordlist::new(names))
    }

    /// A filter matching nothing.
    pub fn none() -> Self {
        Self::Names(Wordlist::default())
    }

    /// Returns `true` when the name is selected.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Names(names) => names.contains(name),
        }
    }
}

/// Configuration of a [`HarSanitizer`](super::HarSanitizer).
///
/// Every field has a default, so a partial document only overrides what it names:
///
/// ```rust
/// use harsan_core::{NameFilter, SanitizerConfig};
/// use serde_json::json;
///
/// let config = SanitizerConfig::from_json(&json!({
///     "cookies": "all",
///     "headers": {"names": ["Authorization"]},
///     "redaction_marker": "***"
/// }))?;
///
/// assert_eq!(config.cookies, NameFilter::All);
/// assert!(config.trim_wordlist);
/// # Ok::<(), harsan_core::HarsanError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanitizerConfig {
    /// Cookies whose value is always redacted.
    pub cookies: NameFilter,
    /// Headers whose value is always redacted.
    pub headers: NameFilter,
    /// Query-string and form parameters whose value is always redacted.
    pub query_params: NameFilter,
    /// Wordlist used by [`HarSanitizer::sanitize_default`](super::HarSanitizer::sanitize_default).
    pub wordlist: Wordlist,
    /// MIME scrublist used by [`HarSanitizer::sanitize_default`](super::HarSanitizer::sanitize_default).
    pub mime_scrublist: MimeScrublist,
    /// Narrow the wordlist to words present in the requests before sanitizing.
    pub trim_wordlist: bool,
    /// Fixed replacement text; `None` tags each value with its name, e.g. `[token_redacted]`.
    pub redaction_marker: Option<String>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            cookies: NameFilter::names(DEFAULT_COOKIE_NAMES.iter().copied()),
            headers: NameFilter::names(DEFAULT_HEADER_NAMES.iter().copied()),
            query_params: NameFilter::names(DEFAULT_WORDLIST.iter().copied()),
            wordlist: default_wordlist(),
            mime_scrublist: default_mime_scrublist(),
            trim_wordlist: true,
            redaction_marker: None,
        }
    }
}

impl SanitizerConfig {
    /// Reads a configuration from a decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`HarsanError::InvalidConfig`] with the path of the offending field.
    pub fn from_json(value: &Value) -> Result<Self, HarsanError> {
        serde_path_to_error::deserialize(value).map_err(|err| HarsanError::InvalidConfig {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })
    }

    /// Reads a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`HarsanError::InvalidConfig`] with the path of the offending field.
    pub fn from_json_str(raw: &str) -> Result<Self, HarsanError> {
        let deserializer = &mut serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize(deserializer).map_err(|err| HarsanError::InvalidConfig {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })
    }

    /// Reads a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`HarsanError::InvalidConfig`] when the YAML does not describe a configuration.
    #[cfg(feature = "yaml")]
    #[cfg_attr(docsrs, doc(cfg(feature = "yaml")))]
    pub fn from_yaml_str(raw: &str) -> Result<Self, HarsanError> {
        serde_saphyr::from_str(raw).map_err(|err| HarsanError::InvalidConfig {
            path: String::from("."),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_match_names() {
        let filter = NameFilter::names(["session", "token"]);

        assert!(filter.matches("session"));
        assert!(!filter.matches("Session"));
        assert!(NameFilter::All.matches("anything"));
        assert!(!NameFilter::none().matches("session"));
    }

    #[test]
    fn should_default_missing_fields() {
        let config = SanitizerConfig::from_json(&json!({"trim_wordlist": false}))
            .expect("should deserialize");

        assert!(!config.trim_wordlist);
        assert_eq!(config.wordlist, default_wordlist());
        assert_eq!(config.mime_scrublist, default_mime_scrublist());
        assert!(config.cookies.matches("JSESSIONID"));
    }

    #[test]
    fn should_read_name_filters() {
        let config = SanitizerConfig::from_json_str(
            r#"{"cookies": "all", "query_params": {"names": ["q", "q", "token"]}}"#,
        )
        .expect("should deserialize");

        assert_eq!(config.cookies, NameFilter::All);
        assert_eq!(config.query_params, NameFilter::names(["q", "token"]));
    }

    #[test]
    fn should_report_path_of_invalid_field() {
        let error = SanitizerConfig::from_json(&json!({"headers": {"names": ["ok", 42]}}))
            .expect_err("should fail");

        let HarsanError::InvalidConfig { path, .. } = error else {
            panic!("unexpected error: {error}");
        };
        assert!(path.starts_with("headers"), "unexpected path: {path}");
    }

    #[test]
    fn should_reject_unknown_fields() {
        let result = SanitizerConfig::from_json(&json!({"cookie": "all"}));

        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_filters() {
        let config = SanitizerConfig {
            cookies: NameFilter::All,
            headers: NameFilter::names(["Authorization"]),
            ..SanitizerConfig::default()
        };

        let value = serde_json::to_value(&config).expect("should serialize");

        assert_eq!(value["cookies"], json!("all"));
        assert_eq!(value["headers"], json!({"names": ["Authorization"]}));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn should_read_yaml() {
        let config = SanitizerConfig::from_yaml_str(
            "cookies: all\nmime_scrublist:\n  - text/\nredaction_marker: '***'\n",
        )
        .expect("should deserialize");

        assert_eq!(config.cookies, NameFilter::All);
        assert!(config.mime_scrublist.matches("text/css"));
        assert_eq!(config.redaction_marker.as_deref(), Some("***"));
    }
}
