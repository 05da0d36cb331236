//! SSE line and frame types
//!
//! Contains the classification of a single decoded line and the `Frame`
//! handed from the decoder to the delta aggregator.

/// Payload that marks the end of an assistant stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Marker that introduces a data line.
pub const DATA_MARKER: &str = "data:";

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Data payload with the marker and surrounding whitespace removed
    Data(String),
    /// Anything else: blank lines, comments, `event:`/`id:`/`retry:` fields
    Ignored,
}

/// One logical unit extracted from a `data:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Payload to be parsed as a structured event
    Data(String),
    /// The `[DONE]` sentinel; the reader should stop pulling chunks
    Done,
}

impl Frame {
    /// Returns true for the termination frame.
    pub fn is_done(&self) -> bool {
        matches!(self, Frame::Done)
    }

    /// Returns the payload of a data frame.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Frame::Data(payload) => Some(payload),
            Frame::Done => None,
        }
    }
}

impl SseLine {
    /// Converts a data line into a frame; ignored lines produce nothing.
    pub fn into_frame(self) -> Option<Frame> {
        match self {
            SseLine::Data(payload) if payload == DONE_SENTINEL => Some(Frame::Done),
            SseLine::Data(payload) => Some(Frame::Data(payload)),
            SseLine::Ignored => None,
        }
    }
}
