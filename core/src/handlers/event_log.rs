use std::fmt::Write;

use crate::events::{RaceSignal, SignalHandler};

/// Accumulates the chronological race log, one line per signal.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    text: String,
    lines: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl SignalHandler for EventLog {
    fn handle_signal(&mut self, signal: &RaceSignal) {
        // Writing into a String cannot fail
        let _ = writeln!(self.text, "{signal}");
        self.lines += 1;
    }
}

/// Mirrors every signal to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalTrace;

impl SignalHandler for SignalTrace {
    fn handle_signal(&mut self, signal: &RaceSignal) {
        tracing::debug!(
            competitor = %signal.competitor_id,
            timestamp = %signal.timestamp,
            kind = ?signal.kind,
            "Signal"
        );
    }
}
