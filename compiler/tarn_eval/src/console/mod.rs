//! Destination of `console.*` output.
//!
//! Scripts write through the `console` host object; the embedder decides
//! where the lines go: the process streams, an in-memory buffer, or
//! nowhere. Dispatch is an enum rather than a trait object.

mod inspect;

use std::sync::Arc;

use parking_lot::Mutex;

pub use inspect::{format_args, inspect};

/// Severity of a console line, named after the method that wrote it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConsoleLevel {
    Log,
    Info,
    Warn,
    Error,
}

impl ConsoleLevel {
    pub const fn method_name(self) -> &'static str {
        match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Warn => "warn",
            ConsoleLevel::Error => "error",
        }
    }
}

/// One captured line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub level: ConsoleLevel,
    pub text: String,
}

/// Keeps every line in memory, for tests and embedders that render
/// output themselves.
#[derive(Default)]
pub struct BufferConsole {
    entries: Mutex<Vec<ConsoleEntry>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, level: ConsoleLevel, text: &str) {
        self.entries.lock().push(ConsoleEntry {
            level,
            text: text.to_string(),
        });
    }

    /// All captured lines, newline-terminated.
    pub fn output(&self) -> String {
        self.entries
            .lock()
            .iter()
            .fold(String::new(), |mut out, entry| {
                out.push_str(&entry.text);
                out.push('\n');
                out
            })
    }

    pub fn entries(&self) -> Vec<ConsoleEntry> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

pub enum ConsoleSink {
    /// `log`/`info` to stdout, `warn`/`error` to stderr.
    Stdout,
    Buffer(BufferConsole),
    /// Discards everything.
    Silent,
}

impl ConsoleSink {
    pub fn write(&self, level: ConsoleLevel, text: &str) {
        match self {
            Self::Stdout => match level {
                ConsoleLevel::Log | ConsoleLevel::Info => println!("{text}"),
                ConsoleLevel::Warn | ConsoleLevel::Error => eprintln!("{text}"),
            },
            Self::Buffer(buffer) => buffer.write(level, text),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for sinks that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.output(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Captured lines; empty for sinks that do not capture.
    pub fn entries(&self) -> Vec<ConsoleEntry> {
        match self {
            Self::Buffer(buffer) => buffer.entries(),
            Self::Stdout | Self::Silent => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.clear();
        }
    }
}

/// Console sink shared between the embedder and the `console` object.
pub type SharedConsole = Arc<ConsoleSink>;

pub fn stdout_console() -> SharedConsole {
    Arc::new(ConsoleSink::Stdout)
}

pub fn buffer_console() -> SharedConsole {
    Arc::new(ConsoleSink::Buffer(BufferConsole::new()))
}

pub fn silent_console() -> SharedConsole {
    Arc::new(ConsoleSink::Silent)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
