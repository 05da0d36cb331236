//! Recording presentation sink for headless tests.
//!
//! Captures every sink call in order so tests can assert on the exact
//! sequence of placeholder, render, error and completion notifications.

use std::sync::{Arc, Mutex};

use crate::traits::PresentationSink;

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    ShowPlaceholder(String),
    RemovePlaceholder,
    SetContent(String),
    ReportError(String),
    ReportComplete(String),
}

/// Sink that records calls instead of drawing anything.
///
/// Clones share the same log, so a clone can be handed to the session
/// while the test keeps another for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Markup of every `set_content` call, in order.
    pub fn renders(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SinkCall::SetContent(markup) => Some(markup),
                _ => None,
            })
            .collect()
    }

    /// The most recent `set_content` markup.
    pub fn last_render(&self) -> Option<String> {
        self.renders().pop()
    }

    /// The completion text, if the call completed.
    pub fn completion(&self) -> Option<String> {
        self.calls().into_iter().find_map(|call| match call {
            SinkCall::ReportComplete(text) => Some(text),
            _ => None,
        })
    }

    /// The error message, if the call failed.
    pub fn error(&self) -> Option<String> {
        self.calls().into_iter().find_map(|call| match call {
            SinkCall::ReportError(message) => Some(message),
            _ => None,
        })
    }

    fn push(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PresentationSink for RecordingSink {
    fn show_placeholder(&mut self, label: &str) {
        self.push(SinkCall::ShowPlaceholder(label.to_string()));
    }

    fn remove_placeholder(&mut self) {
        self.push(SinkCall::RemovePlaceholder);
    }

    fn set_content(&mut self, markup: &str) {
        self.push(SinkCall::SetContent(markup.to_string()));
    }

    fn report_error(&mut self, message: &str) {
        self.push(SinkCall::ReportError(message.to_string()));
    }

    fn report_complete(&mut self, text: &str) {
        self.push(SinkCall::ReportComplete(text.to_string()));
    }
}
