use serde::Serialize;
use serde_json::Value;

/// A `{name, value}` pair read from a HAR cookie, header or parameter array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NameValue {
    /// The item name.
    pub name: String,
    /// The item value; non-string values hold their JSON text.
    pub value: String,
}

impl NameValue {
    /// Reads a HAR `{name, value}` item, skipping items without a string `name`.
    pub(crate) fn from_item(item: &Value) -> Option<Self> {
        let name = item.get("name")?.as_str()?.to_owned();
        let value = match item.get("value") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Some(Self { name, value })
    }
}

/// A response body eligible for word scrubbing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyText {
    /// Index of the entry in `log.entries`.
    pub entry_index: usize,
    /// The response `content.mimeType`, empty when absent.
    pub mime_type: String,
    /// The response `content.text`.
    pub text: String,
}
