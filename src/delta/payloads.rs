//! Deserialization structs for assistant stream payloads
//!
//! Only the fields the aggregator reads are modelled; everything else in
//! the payload is ignored by serde.

use serde::Deserialize;

/// `object` tag carried by incremental message events.
pub const MESSAGE_DELTA_OBJECT: &str = "thread.message.delta";

/// `type` of a content item that carries text.
pub const TEXT_CONTENT_TYPE: &str = "text";

/// Top-level JSON object of a data frame
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StreamPayload {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub delta: Option<DeltaPayload>,
}

/// `delta` member of a message delta event
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct DeltaPayload {
    #[serde(default)]
    pub content: Option<Vec<ContentItemPayload>>,
}

/// One entry of `delta.content`
///
/// `text` is kept as a raw value because non-text items reuse the field
/// name with other shapes.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentItemPayload {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<serde_json::Value>,
}

impl ContentItemPayload {
    pub fn is_text(&self) -> bool {
        self.kind.as_deref() == Some(TEXT_CONTENT_TYPE)
    }

    /// `text.value`, or empty when missing or not a string.
    pub fn text_value(&self) -> &str {
        self.text
            .as_ref()
            .and_then(|t| t.get("value"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }
}
