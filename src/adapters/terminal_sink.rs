//! Terminal presentation sink.
//!
//! Draws the rendered markup in place on a terminal: each update moves the
//! cursor back to where the previous draw began, clears downwards and
//! prints the new frame, so growing output never scrolls duplicate copies.
//! Only rows still on screen can be reached: once a frame is taller than
//! the terminal, the part that scrolled off the top stays in scrollback.
//! The small HTML vocabulary produced by [`crate::markup`] is translated to
//! ANSI styling and OSC 8 hyperlinks.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::Stylize,
    terminal::{self, Clear, ClearType},
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use crate::traits::PresentationSink;

/// Fallback width when the output is not a terminal
const DEFAULT_COLUMNS: usize = 80;

/// Fallback height when the output is not a terminal
const DEFAULT_ROWS: usize = 24;

static IMG_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img alt="(.*?)" src="(.*?)"[^>]*>"#).expect("Invalid img tag pattern")
});
static ANCHOR_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href="(.*?)"[^>]*>(.*?)</a>"#).expect("Invalid anchor tag pattern")
});
static STRONG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<strong[^>]*>(.*?)</strong>").expect("Invalid strong tag pattern"));
static EM_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<em>(.*?)</em>").expect("Invalid em tag pattern"));
static ESCAPE_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;]*m|\x1b\]8;;[^\x07]*\x07").expect("Invalid escape pattern")
});

/// Create an OSC 8 hyperlink escape sequence that wraps text
///
/// OSC 8 format: `\x1B]8;;{url}\x07{text}\x1B]8;;\x07`
pub fn wrap_osc8_hyperlink(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, text)
}

/// Translate rendered markup into ANSI-styled terminal text.
pub fn markup_to_ansi(markup: &str) -> String {
    let text = IMG_TAG.replace_all(markup, |caps: &Captures| {
        wrap_osc8_hyperlink(&caps[2], &format!("[image: {}]", &caps[1]))
    });
    let text = ANCHOR_TAG.replace_all(&text, |caps: &Captures| {
        wrap_osc8_hyperlink(&caps[1], &caps[2].to_string().underlined().to_string())
    });
    let text = STRONG_TAG.replace_all(&text, |caps: &Captures| caps[1].to_string().bold().to_string());
    let text = EM_TAG.replace_all(&text, |caps: &Captures| caps[1].to_string().italic().to_string());
    text.replace("<br>", "\n")
}

/// Number of terminal rows `text` occupies at the given width.
fn visible_rows(text: &str, columns: usize) -> usize {
    let columns = columns.max(1);
    text.split('\n')
        .map(|line| {
            let width = ESCAPE_SEQUENCE.replace_all(line, "").width();
            width.div_ceil(columns).max(1)
        })
        .sum()
}

/// Sink that redraws in place on a terminal.
pub struct TerminalSink<W: Write + Send> {
    out: W,
    columns: usize,
    /// Terminal height; bounds how far back a redraw can reach
    rows: usize,
    /// Rows covered by the last draw; the cursor sits on the last of them
    rows_drawn: usize,
}

impl TerminalSink<io::Stdout> {
    /// Sink writing to stdout, sized to the current terminal.
    pub fn stdout() -> Self {
        let (columns, rows) = terminal::size()
            .map(|(cols, rows)| (cols as usize, rows as usize))
            .unwrap_or((DEFAULT_COLUMNS, DEFAULT_ROWS));
        Self::with_size(io::stdout(), columns, rows)
    }
}

impl<W: Write + Send> TerminalSink<W> {
    /// Sink writing to `out`, wrapping at `columns`.
    pub fn with_columns(out: W, columns: usize) -> Self {
        Self::with_size(out, columns, DEFAULT_ROWS)
    }

    /// Sink writing to `out` on a terminal of `columns` by `rows`.
    pub fn with_size(out: W, columns: usize, rows: usize) -> Self {
        Self {
            out,
            columns,
            rows,
            rows_drawn: 0,
        }
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Lines the cursor moves up to reach the top of the last draw.
    ///
    /// Clamped to the terminal height, since the cursor cannot leave the
    /// visible screen.
    fn rows_to_move_up(&self) -> usize {
        self.rows_drawn
            .saturating_sub(1)
            .min(self.rows.saturating_sub(1))
    }

    fn clear_drawn(&mut self) -> io::Result<()> {
        if self.rows_drawn == 0 {
            return Ok(());
        }
        let up = self.rows_to_move_up();
        if up > 0 {
            let up = u16::try_from(up).unwrap_or(u16::MAX);
            queue!(self.out, cursor::MoveToPreviousLine(up))?;
        } else {
            queue!(self.out, cursor::MoveToColumn(0))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        self.rows_drawn = 0;
        Ok(())
    }

    fn draw(&mut self, text: &str) -> io::Result<()> {
        self.clear_drawn()?;
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        self.rows_drawn = visible_rows(text, self.columns);
        Ok(())
    }

    fn finish_line(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()?;
        self.rows_drawn = 0;
        Ok(())
    }

    fn log_failure(result: io::Result<()>) {
        if let Err(e) = result {
            warn!("Terminal sink write failed: {}", e);
        }
    }
}

impl<W: Write + Send> PresentationSink for TerminalSink<W> {
    fn show_placeholder(&mut self, label: &str) {
        let styled = label.to_string().dim().to_string();
        Self::log_failure(self.draw(&styled));
    }

    fn remove_placeholder(&mut self) {
        Self::log_failure(self.clear_drawn().and_then(|_| self.out.flush()));
    }

    fn set_content(&mut self, markup: &str) {
        let text = markup_to_ansi(markup);
        Self::log_failure(self.draw(&text));
    }

    fn report_error(&mut self, message: &str) {
        let styled = message.to_string().red().to_string();
        let result = self.draw(&styled).and_then(|_| self.finish_line());
        Self::log_failure(result);
    }

    fn report_complete(&mut self, _text: &str) {
        Self::log_failure(self.finish_line());
    }
}
