//! Delta aggregation and render-state tracking
//!
//! Owns the single append-only text buffer for one call and produces a
//! freshly rendered view of the whole buffer after every accepted frame.

use tracing::{debug, trace};

use crate::delta::events::{parse_event, AssistantEvent};
use crate::markup::render_markup;
use crate::sse::Frame;

/// Rendered view of the accumulated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    /// Markup for the full buffer
    pub markup: String,
    /// True on exactly one update per call: the first one with content
    pub first_content: bool,
}

/// Final result of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The raw accumulated text, not passed through markup rules
    Content(String),
    /// The stream ended without any text
    NoContent,
}

impl Completion {
    /// Text handed to the completion callback; empty for `NoContent`.
    pub fn text(&self) -> &str {
        match self {
            Completion::Content(text) => text,
            Completion::NoContent => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Completion::NoContent)
    }
}

/// Result of handing one frame to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accepted {
    /// Noise, an unrecognized event, or a frame after completion
    Ignored,
    /// The buffer was (possibly emptily) appended to and re-rendered
    Rendered(RenderState),
    /// The termination frame arrived
    Finished(Completion),
}

/// Per-call aggregator state.
#[derive(Debug, Default)]
pub struct DeltaAggregator {
    accumulator: String,
    first_content_seen: bool,
    finished: bool,
}

impl DeltaAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one decoded frame.
    pub fn accept(&mut self, frame: Frame) -> Accepted {
        if self.finished {
            trace!("Frame after completion ignored");
            return Accepted::Ignored;
        }

        let payload = match frame {
            Frame::Done => return Accepted::Finished(self.finish()),
            Frame::Data(payload) => payload,
        };

        let fragments = match parse_event(&payload) {
            Ok(AssistantEvent::MessageDelta { fragments }) => fragments,
            Ok(other) => {
                trace!(event_type = other.event_type_name(), "Ignoring non-delta event");
                return Accepted::Ignored;
            }
            Err(e) => {
                debug!("Dropping unparseable SSE payload: {}", e);
                return Accepted::Ignored;
            }
        };

        if fragments.is_empty() {
            return Accepted::Ignored;
        }

        for fragment in &fragments {
            self.accumulator.push_str(fragment);
        }

        let first_content = !self.first_content_seen && !self.accumulator.is_empty();
        if first_content {
            self.first_content_seen = true;
        }

        Accepted::Rendered(RenderState {
            markup: self.render(),
            first_content,
        })
    }

    /// End the call, e.g. when the transport closes without `[DONE]`.
    pub fn finish(&mut self) -> Completion {
        self.finished = true;
        if self.accumulator.is_empty() {
            Completion::NoContent
        } else {
            Completion::Content(self.accumulator.clone())
        }
    }

    /// Re-render the current buffer from scratch.
    pub fn render(&self) -> String {
        render_markup(&self.accumulator)
    }

    /// Raw text accumulated so far.
    pub fn text(&self) -> &str {
        &self.accumulator
    }

    pub fn has_content(&self) -> bool {
        self.first_content_seen
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
