//! Minimal stderr logger for the `log` crate.
//!
//! Library code instruments with the `log` macros and stays silent unless a
//! consumer installs a logger; the CLI installs this one. Output is one line
//! per record: `[timestamp] LEVEL target: message`.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Plain stderr logger.
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    #[must_use]
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = OffsetDateTime::now_utc()
            .format(&TIME_FORMAT)
            .unwrap_or_default();
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };

        // Logging must never take the process down; a failed write to
        // stderr is dropped.
        let _ = writeln!(
            std::io::stderr(),
            "[{timestamp}] {level} {}: {}",
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Install the stderr logger with the given filter.
///
/// # Errors
///
/// Returns [`SetLoggerError`] when a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}
