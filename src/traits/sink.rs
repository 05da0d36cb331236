//! Presentation sink trait abstraction.
//!
//! The stream session never touches a concrete UI. Everything visible goes
//! through this small capability set, which lets the whole pipeline run
//! headless in tests.

/// Receiver of everything a call wants to show.
///
/// Calls arrive strictly in this order per call:
/// `show_placeholder`, then optionally `remove_placeholder` (at most once),
/// then any number of `set_content`, then exactly one of `report_complete`
/// or `report_error`.
pub trait PresentationSink: Send {
    /// Mount the loading indicator with the given label.
    fn show_placeholder(&mut self, label: &str);

    /// Remove the loading indicator.
    fn remove_placeholder(&mut self);

    /// Replace the whole visible content with `markup`.
    fn set_content(&mut self, markup: &str);

    /// Show a terminal error message in place of the placeholder.
    fn report_error(&mut self, message: &str);

    /// Notify the host that the call finished, carrying the raw text.
    fn report_complete(&mut self, text: &str);
}

impl<S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn show_placeholder(&mut self, label: &str) {
        (**self).show_placeholder(label)
    }

    fn remove_placeholder(&mut self) {
        (**self).remove_placeholder()
    }

    fn set_content(&mut self, markup: &str) {
        (**self).set_content(markup)
    }

    fn report_error(&mut self, message: &str) {
        (**self).report_error(message)
    }

    fn report_complete(&mut self, text: &str) {
        (**self).report_complete(text)
    }
}

impl<S: PresentationSink + ?Sized> PresentationSink for Box<S> {
    fn show_placeholder(&mut self, label: &str) {
        (**self).show_placeholder(label)
    }

    fn remove_placeholder(&mut self) {
        (**self).remove_placeholder()
    }

    fn set_content(&mut self, markup: &str) {
        (**self).set_content(markup)
    }

    fn report_error(&mut self, message: &str) {
        (**self).report_error(message)
    }

    fn report_complete(&mut self, text: &str) {
        (**self).report_complete(text)
    }
}
