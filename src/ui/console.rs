// ── Output console ────────────────────────────────────────────────────────────
//
// Every line shown to the user, whether program output or a status notice,
// goes through `OutputSink::format` and is stamped with the wall-clock time
// at which it is displayed, not when the program printed it.

use std::fmt;
use std::io::Write;

use chrono::{Local, NaiveTime};
use tracing::warn;

// ── Formatter ─────────────────────────────────────────────────────────────────

/// Stamps lines as `HH:MM:SS > line`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputSink;

impl OutputSink {
    /// Format `line` with the current local time.
    pub fn format(&self, line: &str) -> String {
        self.format_at(Local::now().time(), line)
    }

    /// Format `line` with a fixed time.
    pub fn format_at(&self, time: NaiveTime, line: &str) -> String {
        format!("{} > {line}", time.format("%H:%M:%S"))
    }
}

// ── Console ───────────────────────────────────────────────────────────────────

/// The in-memory console log, optionally mirrored to a companion writer.
#[derive(Default)]
pub struct Console {
    sink: OutputSink,
    lines: Vec<String>,
    companion: Option<Box<dyn Write + Send>>,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("lines", &self.lines)
            .field("companion", &self.companion.is_some())
            .finish()
    }
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console that also writes every formatted line to `writer`.
    pub fn with_companion(writer: impl Write + Send + 'static) -> Self {
        Self {
            companion: Some(Box::new(writer)),
            ..Self::default()
        }
    }

    pub fn set_companion(&mut self, writer: Option<Box<dyn Write + Send>>) {
        self.companion = writer;
    }

    /// Stamp `line` once and append it to the log and the companion.
    ///
    /// A failing companion is logged and otherwise ignored; the in-memory
    /// log always receives the line.
    pub fn push(&mut self, line: &str) {
        let formatted = self.sink.format(line);
        if let Some(writer) = self.companion.as_mut() {
            if let Err(e) = writeln!(writer, "{formatted}").and_then(|()| writer.flush()) {
                warn!(error = %e, "console companion write failed");
            }
        }
        self.lines.push(formatted);
    }

    /// [`push`](Self::push) each line in order.
    pub fn extend<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        for line in lines {
            self.push(line);
        }
    }

    /// Formatted lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole log as one newline-joined string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
