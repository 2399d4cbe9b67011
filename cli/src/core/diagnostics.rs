//! # composer-file-copy Diagnostic Output
//!
//! File: cli/src/core/diagnostics.rs
//!
//! ## Overview
//!
//! User-facing output lines (`Copying File ...`, `No source files found: ...`)
//! go through a `DiagnosticSink` instead of being printed directly, so the
//! copy engine can be driven from tests without capturing stdout. Whether a
//! line is debug-gated is decided by the caller; the sink writes everything it
//! receives.
//!
use std::io::Write;
use tracing::debug;

/// Destination for human-readable diagnostic lines.
pub trait DiagnosticSink {
    fn write(&self, line: &str);
}

/// Writes lines to stdout and mirrors them as `tracing` debug events.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn write(&self, line: &str) {
        debug!(target: "composer_file_copy::output", "{}", line);
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // A closed stdout must not abort a half-finished copy run.
        let _ = writeln!(handle, "{}", line);
    }
}

/// Collects lines in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
impl DiagnosticSink for MemorySink {
    fn write(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
