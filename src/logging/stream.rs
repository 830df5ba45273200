//! Stream Logger
//!
//! Writes formatted records to stdout or a file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;

use super::{Level, Location, Logger};
use crate::error::ReturnCode;

/// Record separator framing located records
const FRAME: &str = "#####";

/// Logger writing one text record per call
pub struct StreamLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    timestamps: bool,
}

impl StreamLogger {
    /// Log to standard output
    pub fn stdout() -> Self {
        Self::from_writer(Box::new(io::stdout()))
    }

    /// Log to the file at `path`, truncating it when `overwrite` is set and
    /// appending otherwise.
    ///
    /// Falls back to standard output when the file cannot be opened, after
    /// writing a warning about the fallback there.
    pub fn open(path: impl AsRef<Path>, overwrite: bool) -> Self {
        Self::open_or_else(path.as_ref(), overwrite, || Box::new(io::stdout()))
    }

    fn open_or_else<F>(path: &Path, overwrite: bool, fallback: F) -> Self
    where
        F: FnOnce() -> Box<dyn Write + Send>,
    {
        let mut options = OpenOptions::new();
        if overwrite {
            options.write(true).create(true).truncate(true);
        } else {
            options.append(true).create(true);
        }

        match options.open(path) {
            Ok(file) => Self::from_writer(Box::new(file)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Log file unavailable, using stdout");
                let logger = Self::from_writer(fallback());
                logger.write_record(|out| {
                    writeln!(
                        out,
                        "{}: {} {}",
                        Level::Warning,
                        ReturnCode::FileNotFound,
                        path.display()
                    )
                });
                logger
            }
        }
    }

    /// Log to an arbitrary writer
    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(writer),
            timestamps: false,
        }
    }

    /// Prefix each record with an RFC 3339 UTC timestamp
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    fn header(&self, code: ReturnCode, level: Level) -> String {
        if self.timestamps {
            format!(
                "[{}] {}: {}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                level,
                code
            )
        } else {
            format!("{}: {}", level, code)
        }
    }

    // Write failures are dropped: a log sink never fails the caller.
    fn write_record<F>(&self, f: F)
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut sink = self.sink.lock();
        let out: &mut dyn Write = &mut **sink;
        let _ = f(&mut *out).and_then(|_| out.flush());
    }
}

impl Logger for StreamLogger {
    fn log(&self, code: ReturnCode, level: Level) {
        let header = self.header(code, level);
        self.write_record(|out| writeln!(out, "{}", header));
    }

    fn log_at(&self, code: ReturnCode, level: Level, location: &Location) {
        let header = self.header(code, level);
        self.write_record(|out| {
            writeln!(out, "{}", FRAME)?;
            writeln!(out, "{}", header)?;
            writeln!(
                out,
                "File: {}\nLine: {}\nFunction: {}",
                location.file, location.line, location.function
            )?;
            writeln!(out, "{}", FRAME)
        });
    }
}

impl Default for StreamLogger {
    fn default() -> Self {
        Self::stdout()
    }
}
