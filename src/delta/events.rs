//! Structured events decoded from data frames

use crate::delta::payloads::{StreamPayload, MESSAGE_DELTA_OBJECT};

/// Parsed form of a frame payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantEvent {
    /// A message delta; one entry per `text` content item, in order
    MessageDelta { fragments: Vec<String> },
    /// Valid JSON of any other shape (run status, step events, ...)
    Other { object: Option<String> },
}

impl AssistantEvent {
    /// Returns the event type name for logging.
    pub fn event_type_name(&self) -> &str {
        match self {
            AssistantEvent::MessageDelta { .. } => MESSAGE_DELTA_OBJECT,
            AssistantEvent::Other { object } => object.as_deref().unwrap_or("unknown"),
        }
    }
}

/// Parse a frame payload into an event.
///
/// Errors only on malformed JSON; unrecognized shapes become
/// [`AssistantEvent::Other`].
pub fn parse_event(payload: &str) -> Result<AssistantEvent, serde_json::Error> {
    let parsed: StreamPayload = serde_json::from_str(payload)?;

    let is_delta = parsed.object.as_deref() == Some(MESSAGE_DELTA_OBJECT);
    match parsed.delta.and_then(|d| d.content) {
        Some(items) if is_delta => {
            let fragments = items
                .iter()
                .filter(|item| item.is_text())
                .map(|item| item.text_value().to_string())
                .collect();
            Ok(AssistantEvent::MessageDelta { fragments })
        }
        _ => Ok(AssistantEvent::Other {
            object: parsed.object,
        }),
    }
}
