//! Tracing Logger
//!
//! Forwards records to the `tracing` subscriber.

use tracing::{error, info, warn};

use super::{Level, Location, Logger};
use crate::error::ReturnCode;

/// Logger emitting each record as a `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, code: ReturnCode, level: Level) {
        match level {
            Level::Severe => error!(?code, "{}", code),
            Level::Warning => warn!(?code, "{}", code),
            Level::Info => info!(?code, "{}", code),
        }
    }

    fn log_at(&self, code: ReturnCode, level: Level, location: &Location) {
        let Location {
            file,
            line,
            function,
        } = *location;
        match level {
            Level::Severe => error!(?code, src_file = file, src_line = line, function, "{}", code),
            Level::Warning => warn!(?code, src_file = file, src_line = line, function, "{}", code),
            Level::Info => info!(?code, src_file = file, src_line = line, function, "{}", code),
        }
    }
}
