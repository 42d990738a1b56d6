//! Status sink for a terminal: progress lines on stderr, last error kept for the exit message.

use rbxdl_core::flow::StatusSink;
use std::io::{self, Write};

pub struct TerminalStatus<W: Write> {
    out: W,
    progress: Option<String>,
    error: Option<String>,
}

impl TerminalStatus<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalStatus<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            progress: None,
            error: None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusSink for TerminalStatus<W> {
    // No control to grey out; one submission per process.
    fn set_submit_enabled(&mut self, enabled: bool) {
        tracing::trace!(enabled, "submit control");
    }

    fn show_progress(&mut self, message: &str) {
        // Repeats of the same line are dropped.
        if self.progress.as_deref() == Some(message) {
            return;
        }
        let _ = writeln!(self.out, "{}", message);
        self.progress = Some(message.to_string());
    }

    fn hide_progress(&mut self) {
        self.progress = None;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }
}
