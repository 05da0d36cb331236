//! Delta aggregation for assistant message streams
//!
//! Parses each data frame as a structured event, pulls the text fragments
//! out of `thread.message.delta` events and keeps the running buffer plus
//! its rendered view.
//!
//! # Module structure
//! - `payloads` - Internal payload deserialization structs
//! - `events` - Parsed event type (AssistantEvent, parse_event)
//! - `aggregator` - Per-call buffer and render state (DeltaAggregator)

mod aggregator;
mod events;
mod payloads;

pub use aggregator::{Accepted, Completion, DeltaAggregator, RenderState};
pub use events::{parse_event, AssistantEvent};
pub use payloads::{MESSAGE_DELTA_OBJECT, TEXT_CONTENT_TYPE};
