//! SSE (Server-Sent Events) frame decoder
//!
//! Decodes the assistant streaming API's SSE body. Only a narrow slice of
//! the format is honoured:
//! - `data: <payload>` - one frame per line
//! - `data: [DONE]` - end of stream
//! - Everything else (`event:`, `id:`, comments, blank lines) is skipped
//!
//! # Module structure
//! - `events` - Line and frame types
//! - `utf8` - Streaming UTF-8 decoding across chunk boundaries
//! - `decoder` - Line reassembly (FrameDecoder, parse_sse_line)

mod decoder;
mod events;
mod utf8;

pub use decoder::{parse_sse_line, FrameDecoder};
pub use events::{Frame, SseLine, DATA_MARKER, DONE_SENTINEL};
pub use utf8::Utf8Decoder;
