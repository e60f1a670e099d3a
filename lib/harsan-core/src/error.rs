/// Errors that can occur when validating HAR captures, wordlists, or sanitizer configuration.
///
/// Every variant is a local validation failure: nothing is retried and no partial
/// result is produced. Once a [`HarDocument`](crate::HarDocument) and a
/// [`Wordlist`](crate::Wordlist) have been built, the scrub passes cannot fail.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum HarsanError {
    /// The input is valid JSON but does not have the minimal HAR shape.
    ///
    /// Raised only by [`HarDocument::parse`](crate::HarDocument::parse) and its
    /// conversions, never later by an accessor.
    #[display("Invalid HAR document: {reason}")]
    #[from(skip)]
    InvalidHar {
        /// Which structural check failed.
        reason: String,
    },

    /// A wordlist argument is not an ordered sequence of strings.
    #[display("Invalid wordlist: {message}")]
    #[from(skip)]
    InvalidWordlist {
        /// Description of the offending input.
        message: String,
    },

    /// The sanitizer configuration could not be deserialized.
    #[display("Invalid sanitizer configuration at '{path}': {message}")]
    #[from(skip)]
    InvalidConfig {
        /// Path of the failing field inside the configuration document.
        path: String,
        /// The underlying deserialization error message.
        message: String,
    },

    /// Raw input text is not JSON at all.
    Json(serde_json::Error),
}

impl HarsanError {
    pub(crate) fn invalid_har(reason: impl Into<String>) -> Self {
        Self::InvalidHar {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_wordlist(message: impl Into<String>) -> Self {
        Self::InvalidWordlist {
            message: message.into(),
        }
    }

    /// Returns `true` for the format-error kind (input is not a HAR document).
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidHar { .. } | Self::Json(_))
    }

    /// Returns `true` for the type-error kind (wordlist is not a sequence of strings).
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::InvalidWordlist { .. })
    }
}
