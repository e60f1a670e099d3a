//! Redactor trait and implementations for replacement values.
//!
//! The [`Redactor`] trait decides what a sensitive value is replaced with. It is
//! implemented for:
//!
//! - Static values (`&str`, `String`, `serde_json::Value`)
//! - Functions `Fn(&str, &Value) -> Value`
//! - [`NameTagRedactor`], the default, producing `[<name>_redacted]`
//!
//! # Examples
//!
//! ```rust
//! use harsan_core::{HarSanitizer, SanitizerConfig};
//! use serde_json::json;
//!
//! // Static value
//! let sanitizer = HarSanitizer::new(SanitizerConfig::default()).with_redactor("***");
//!
//! // Function of the matched name and the current value
//! let sanitizer = HarSanitizer::new(SanitizerConfig::default())
//!     .with_redactor(|name: &str, _current: &serde_json::Value| json!(format!("<{name}>")));
//! ```

use serde_json::Value;

/// Trait for types that produce the replacement of a sensitive value.
///
/// Implementations receive the matched name (cookie, header or parameter name,
/// or the matched word for body text) and the current value.
///
/// A redactor that ignores the current value keeps sanitizing idempotent.
pub trait Redactor {
    /// Returns the replacement for `current`, matched under `name`.
    fn apply(&self, name: &str, current: &Value) -> Value;

    /// Returns the replacement as text, for values embedded in strings.
    fn apply_text(&self, name: &str, current: &str) -> String {
        match self.apply(name, &Value::String(current.to_owned())) {
            Value::String(text) => text,
            other => other.to_string(),
        }
    }
}

/// The default redactor: replaces a value matched under `name` with `[name_redacted]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameTagRedactor;

impl Redactor for NameTagRedactor {
    fn apply(&self, name: &str, _current: &Value) -> Value {
        Value::String(format!("[{name}_redacted]"))
    }
}

// Implementation for serde_json::Value (direct replacement)
impl Redactor for Value {
    fn apply(&self, _name: &str, _current: &Value) -> Value {
        self.clone()
    }
}

// Implementation for &str
impl Redactor for &str {
    fn apply(&self, _name: &str, _current: &Value) -> Value {
        Value::String((*self).to_string())
    }
}

// Implementation for String
impl Redactor for String {
    fn apply(&self, _name: &str, _current: &Value) -> Value {
        Value::String(self.clone())
    }
}

// Implementation for Fn(&str, &Value) -> Value
impl<F> Redactor for F
where
    F: Fn(&str, &Value) -> Value,
{
    fn apply(&self, name: &str, current: &Value) -> Value {
        self(name, current)
    }
}
