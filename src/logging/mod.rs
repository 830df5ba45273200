//! Logging Module
//!
//! Diagnostic side channel for vectors and sets. Records are `(code, level)`
//! pairs, optionally with the source location that produced them. Logging
//! never influences whether an operation succeeds.

mod stream;
mod tracing_sink;

use std::fmt;
use std::sync::Arc;

pub use stream::StreamLogger;
pub use tracing_sink::TracingLogger;

use crate::error::{Error, ReturnCode};

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Severe,
    Warning,
    Info,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Severe => "SEVERE",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source location attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

/// Capture the current [`Location`]
#[macro_export]
macro_rules! location {
    () => {
        $crate::logging::Location {
            file: file!(),
            line: line!(),
            function: module_path!(),
        }
    };
}

/// Sink for diagnostic records
pub trait Logger: Send + Sync {
    /// Write one record
    fn log(&self, code: ReturnCode, level: Level);

    /// Write one record with its source location
    fn log_at(&self, code: ReturnCode, level: Level, location: &Location) {
        let _ = location;
        self.log(code, level);
    }

    fn severe(&self, code: ReturnCode) {
        self.log(code, Level::Severe);
    }

    fn warning(&self, code: ReturnCode) {
        self.log(code, Level::Warning);
    }

    fn info(&self, code: ReturnCode) {
        self.log(code, Level::Info);
    }
}

/// Logger handle shared by vectors and sets
pub type SharedLogger = Arc<dyn Logger>;

/// Logger that discards every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    #[inline]
    fn log(&self, _code: ReturnCode, _level: Level) {}
}

/// Default logger handle
pub fn noop() -> SharedLogger {
    Arc::new(NoopLogger)
}

/// Report a failed operation at warning level, located at the caller
#[track_caller]
pub(crate) fn report(logger: &dyn Logger, err: &Error, function: &'static str) {
    let caller = std::panic::Location::caller();
    let location = Location {
        file: caller.file(),
        line: caller.line(),
        function,
    };
    logger.log_at(err.code(), Level::Warning, &location);
}
