//! Streaming UTF-8 decoding
//!
//! Transport chunks can split a multi-byte character anywhere. The decoder
//! holds an incomplete trailing sequence until the next chunk completes it,
//! replaces genuinely invalid bytes with U+FFFD and drops a leading byte
//! order mark, even when the mark itself is split across chunks.

use encoding_rs::{CoderResult, Decoder, UTF_8};

/// Incremental bytes-to-text decoder.
pub struct Utf8Decoder {
    inner: Decoder,
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self {
            inner: UTF_8.new_decoder_with_bom_removal(),
        }
    }
}

impl std::fmt::Debug for Utf8Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Utf8Decoder")
            .field("encoding", &self.inner.encoding().name())
            .finish()
    }
}

impl Utf8Decoder {
    /// Create a new decoder with nothing held over.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.run(chunk, false)
    }

    /// End the byte stream.
    ///
    /// Returns U+FFFD if a truncated sequence was still held back, otherwise
    /// an empty string. The decoder is reset for reuse.
    pub fn finish(&mut self) -> String {
        let tail = self.run(&[], true);
        self.inner = UTF_8.new_decoder_with_bom_removal();
        tail
    }

    fn run(&mut self, mut src: &[u8], last: bool) -> String {
        let mut text = String::new();
        loop {
            let needed = self
                .inner
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len() * 3 + 4);
            text.reserve(needed);

            let (result, read, _) = self.inner.decode_to_string(src, &mut text, last);
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => return text,
                CoderResult::OutputFull => continue,
            }
        }
    }
}
