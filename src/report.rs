//! Reporting context shared by every command
//!
//! A [`Reporter`] is built once in `main` from the `--debug`, `--onlydebug`
//! and `--nocolor` flags and handed by reference to library calls that
//! want to log. There is no global logger.
//!
//! # Examples
//!
//! ```
//! use uet::report::{Level, MemorySink, Reporter};
//!
//! let sink = MemorySink::new();
//! let reporter = Reporter::with_sink(Level::Info, false, Box::new(sink.clone()));
//!
//! reporter.debug("hidden");
//! reporter.warn("Plugin directory seems broken");
//!
//! assert_eq!(sink.contents(), "WARNING: Plugin directory seems broken\n");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Severity of a message, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    fn prefix(&self) -> &'static str {
        match self {
            Level::Debug => "DBG: ",
            Level::Info => "",
            Level::Warning => "WARNING: ",
            Level::Error => "ERROR: ",
        }
    }

    fn color_code(&self) -> Option<&'static str> {
        match self {
            Level::Debug => Some("\x1b[90m"),   // Dark grey
            Level::Info => None,
            Level::Warning => Some("\x1b[93m"), // Yellow
            Level::Error => Some("\x1b[31m"),   // Red
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        f.write_str(name)
    }
}

/// Leveled message sink threaded through the library
pub struct Reporter {
    level: Level,
    color: bool,
    sink: RefCell<Box<dyn Write>>,
}

impl Reporter {
    /// Reporter writing to stdout
    pub fn stdout(level: Level, color: bool) -> Self {
        Self::with_sink(level, color, Box::new(io::stdout()))
    }

    pub fn with_sink(level: Level, color: bool, sink: Box<dyn Write>) -> Self {
        Self {
            level,
            color,
            sink: RefCell::new(sink),
        }
    }

    /// Reporter that drops everything, for callers that don't care
    pub fn silent() -> Self {
        Self::with_sink(Level::Error, false, Box::new(io::sink()))
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        if !self.is_enabled(level) {
            return;
        }

        let line = format!("{}{}", level.prefix(), message.as_ref());
        let line = match (self.color, level.color_code()) {
            (true, Some(code)) => format!("{}{}\x1b[0m", code, line),
            _ => line,
        };

        // A closed stdout is not worth aborting a build over
        let mut sink = self.sink.borrow_mut();
        let _ = writeln!(sink, "{}", line);
        let _ = sink.flush();
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message);
    }
}

/// In-memory sink whose clones share one buffer
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
