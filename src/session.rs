//! One streaming assistant call, end to end.
//!
//! A [`StreamSession`] owns the per-call state (frame decoder, delta
//! aggregator, placeholder flag) and drives it from the transport's chunk
//! stream into a [`PresentationSink`]. The only await in the read loop is
//! the wait for the next chunk; decoding, rendering and every sink call for
//! a chunk run to completion before the next one is requested.
//!
//! # Sink call order
//!
//! 1. `show_placeholder` once, before the request is sent
//! 2. `remove_placeholder` at most once, immediately before the first
//!    render that carries content (or before the error/no-content text)
//! 3. `set_content` once per accepted delta frame
//! 4. exactly one of `report_complete(raw_text)` or `report_error(message)`

use futures_util::StreamExt;
use tracing::{debug, error, info, warn};

use crate::assistants::{open_stream, CallInput};
use crate::config::StreamConfig;
use crate::delta::{Accepted, Completion, DeltaAggregator};
use crate::error::{StreamError, StreamResult};
use crate::sse::FrameDecoder;
use crate::traits::{ByteStream, HttpClient, PresentationSink};

/// Summary of a finished call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOutcome {
    pub completion: Completion,
    /// Data and termination frames decoded
    pub frames: usize,
    /// `set_content` calls made for streamed markup
    pub renders: usize,
    /// Whether the stream ended with `[DONE]` rather than end-of-body
    pub terminated_by_sentinel: bool,
}

/// Per-call state for one streaming call.
pub struct StreamSession<'a, S: PresentationSink + ?Sized> {
    config: &'a StreamConfig,
    sink: &'a mut S,
    decoder: FrameDecoder,
    aggregator: DeltaAggregator,
    placeholder_shown: bool,
    frames: usize,
    renders: usize,
}

impl<'a, S: PresentationSink + ?Sized> StreamSession<'a, S> {
    pub fn new(config: &'a StreamConfig, sink: &'a mut S) -> Self {
        Self {
            config,
            sink,
            decoder: FrameDecoder::new(),
            aggregator: DeltaAggregator::new(),
            placeholder_shown: false,
            frames: 0,
            renders: 0,
        }
    }

    /// Show the loading placeholder.
    pub fn begin(&mut self) {
        self.sink.show_placeholder(&self.config.placeholder_text);
        self.placeholder_shown = true;
    }

    /// Remove the placeholder if it is still on screen.
    fn clear_placeholder(&mut self) {
        if self.placeholder_shown {
            self.sink.remove_placeholder();
            self.placeholder_shown = false;
        }
    }

    /// Decode one chunk and apply every frame it completes.
    ///
    /// Returns the completion once the termination frame is seen.
    pub fn handle_chunk(&mut self, chunk: &[u8]) -> Option<Completion> {
        for frame in self.decoder.feed(chunk) {
            self.frames += 1;
            match self.aggregator.accept(frame) {
                Accepted::Ignored => {}
                Accepted::Rendered(state) => {
                    if state.first_content {
                        self.clear_placeholder();
                    }
                    self.sink.set_content(&state.markup);
                    self.renders += 1;
                }
                Accepted::Finished(completion) => return Some(completion),
            }
        }
        None
    }

    /// Close out after end-of-body without a termination frame.
    pub fn handle_end_of_stream(&mut self) -> Completion {
        self.decoder.flush();
        self.aggregator.finish()
    }

    /// Report the completion to the sink and summarize the call.
    pub fn complete(&mut self, completion: Completion) -> StreamOutcome {
        if completion.is_empty() {
            self.clear_placeholder();
            self.sink.set_content(&self.config.no_content_text);
        }
        self.sink.report_complete(completion.text());

        StreamOutcome {
            completion,
            frames: self.frames,
            renders: self.renders,
            terminated_by_sentinel: self.decoder.is_terminated(),
        }
    }

    /// Report a terminal error to the sink.
    pub fn fail(&mut self, err: &StreamError) {
        error!(code = err.error_code(), "Assistant stream failed: {}", err);
        self.clear_placeholder();
        self.sink.report_error(&err.user_message());
    }

    /// Drive the read loop until termination, end-of-body or a read error.
    pub async fn consume(&mut self, mut stream: ByteStream) -> StreamResult<StreamOutcome> {
        loop {
            match stream.next().await {
                Some(Ok(chunk)) => {
                    debug!(bytes = chunk.len(), "Received chunk");
                    if let Some(completion) = self.handle_chunk(&chunk) {
                        return Ok(self.complete(completion));
                    }
                }
                Some(Err(e)) => {
                    let err = StreamError::Read(e);
                    self.fail(&err);
                    return Err(err);
                }
                None => {
                    let completion = self.handle_end_of_stream();
                    return Ok(self.complete(completion));
                }
            }
        }
    }
}

/// Run one assistant call, presenting its progress through `sink`.
///
/// Every failure is reported to the sink exactly once and also returned.
pub async fn run_call<C, S>(
    client: &C,
    config: &StreamConfig,
    input: &CallInput,
    sink: &mut S,
) -> StreamResult<StreamOutcome>
where
    C: HttpClient + ?Sized,
    S: PresentationSink + ?Sized,
{
    let mut session = StreamSession::new(config, sink);
    session.begin();

    let stream = match open_stream(client, config, input).await {
        Ok(stream) => stream,
        Err(err) => {
            if let StreamError::Rejected { status, body } = &err {
                warn!(status, body = %body, "Run request rejected");
            }
            session.fail(&err);
            return Err(err);
        }
    };

    let outcome = session.consume(stream).await?;
    info!(
        frames = outcome.frames,
        renders = outcome.renders,
        empty = outcome.completion.is_empty(),
        "Assistant stream finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{RecordingSink, SinkCall};

    fn delta(text: &str) -> String {
        format!(
            "data: {}\n",
            serde_json::json!({
                "object": "thread.message.delta",
                "delta": { "content": [{ "type": "text", "text": { "value": text } }] }
            })
        )
    }

    #[test]
    fn test_first_content_removes_placeholder_before_render() {
        let config = StreamConfig::default();
        let mut sink = RecordingSink::new();
        let mut session = StreamSession::new(&config, &mut sink);
        session.begin();

        assert!(session.handle_chunk(delta("Hi").as_bytes()).is_none());
        assert!(session.handle_chunk(delta(" there").as_bytes()).is_none());
        let completion = session.handle_chunk(b"data: [DONE]\n").unwrap();
        let outcome = session.complete(completion);

        assert_eq!(outcome.renders, 2);
        assert_eq!(outcome.frames, 3);
        assert!(outcome.terminated_by_sentinel);
        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::ShowPlaceholder("Thinking...".to_string()),
                SinkCall::RemovePlaceholder,
                SinkCall::SetContent("Hi".to_string()),
                SinkCall::SetContent("Hi there".to_string()),
                SinkCall::ReportComplete("Hi there".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_content_on_end_of_stream() {
        let config = StreamConfig::default().with_no_content_text("nothing");
        let mut sink = RecordingSink::new();
        let mut session = StreamSession::new(&config, &mut sink);
        session.begin();

        assert!(session.handle_chunk(b": keepalive\n").is_none());
        let completion = session.handle_end_of_stream();
        let outcome = session.complete(completion);

        assert_eq!(outcome.completion, Completion::NoContent);
        assert!(!outcome.terminated_by_sentinel);
        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::ShowPlaceholder("Thinking...".to_string()),
                SinkCall::RemovePlaceholder,
                SinkCall::SetContent("nothing".to_string()),
                SinkCall::ReportComplete(String::new()),
            ]
        );
    }

    #[test]
    fn test_fail_removes_placeholder_once() {
        let config = StreamConfig::default();
        let mut sink = RecordingSink::new();
        let mut session = StreamSession::new(&config, &mut sink);
        session.begin();
        session.handle_chunk(delta("partial").as_bytes());
        session.fail(&StreamError::Read(crate::traits::HttpError::Timeout(
            "30s".to_string(),
        )));

        let calls = sink.calls();
        let removals = calls
            .iter()
            .filter(|c| **c == SinkCall::RemovePlaceholder)
            .count();
        assert_eq!(removals, 1);
        assert_eq!(
            calls.last(),
            Some(&SinkCall::ReportError(
                "Error: Stream read failed: Request timeout: 30s".to_string()
            ))
        );
    }
}
