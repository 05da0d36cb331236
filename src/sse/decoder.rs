//! SSE frame decoding
//!
//! Turns arbitrarily chunked transport bytes into `data:` frames. Only data
//! lines are meaningful; comments, `event:` fields and blank lines are
//! dropped.

use tracing::{debug, trace};

use crate::sse::events::{Frame, SseLine, DATA_MARKER};
use crate::sse::utf8::Utf8Decoder;

/// Whitespace as far as line trimming is concerned, including U+FEFF
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    match line.trim_matches(is_trimmable).strip_prefix(DATA_MARKER) {
        Some(rest) => SseLine::Data(rest.trim_matches(is_trimmable).to_string()),
        None => SseLine::Ignored,
    }
}

/// Stateful decoder that carries partial lines across chunk boundaries.
///
/// All emitted lines followed by [`FrameDecoder::line_buffer`] always
/// reconstruct the decoded stream prefix.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    utf8: Utf8Decoder,
    /// Unterminated tail of the decoded text
    line_buffer: String,
    /// Set once the `[DONE]` sentinel has been seen
    terminated: bool,
}

impl FrameDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport chunk, returning the frames it completes.
    ///
    /// Once a [`Frame::Done`] has been returned the decoder is terminated
    /// and every later call returns nothing.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        let mut frames = Vec::new();
        if self.terminated {
            return frames;
        }

        let text = self.utf8.decode(chunk);
        self.line_buffer.push_str(&text);

        let Some(last_newline) = self.line_buffer.rfind('\n') else {
            return frames;
        };
        let tail = self.line_buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.line_buffer, tail);

        for line in complete.lines() {
            let Some(frame) = parse_sse_line(line).into_frame() else {
                trace!("Skipping non-data SSE line");
                continue;
            };

            if frame.is_done() {
                self.terminated = true;
                self.line_buffer.clear();
                frames.push(frame);
                break;
            }
            frames.push(frame);
        }

        frames
    }

    /// Signal the true end of the transport stream.
    ///
    /// An unterminated trailing line is not turned into a frame; it is
    /// discarded along with any incomplete UTF-8 sequence.
    pub fn flush(&mut self) {
        let truncated = self.utf8.finish();
        if !self.line_buffer.is_empty() || !truncated.is_empty() {
            debug!(
                trailing_chars = self.line_buffer.chars().count(),
                truncated_utf8 = !truncated.is_empty(),
                "Discarding unterminated SSE tail at end of stream"
            );
        }
        self.line_buffer.clear();
    }

    /// Text received after the last newline.
    pub fn line_buffer(&self) -> &str {
        &self.line_buffer
    }

    /// Whether the termination sentinel has been decoded.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}
