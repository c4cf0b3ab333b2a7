//! Quasi logging utilities. This defines a simple logger with a style that is
//! used by the `quasi` command line tool. Library crates only talk to the
//! [log] facade.

use std::io::Write;

use once_cell::sync::OnceCell;

use crate::{
    highlight::{highlight, Colour, Modifier},
    log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError},
};

/// Logger that prints `level: message` lines on the standard error stream.
#[derive(Debug, Default)]
pub struct QuasiLogger {
    /// The most verbose level that is printed, set once on installation.
    max_level: OnceCell<LevelFilter>,
}

impl QuasiLogger {
    /// Create a new logger, nothing is printed until [QuasiLogger::install]
    /// is called.
    pub const fn new() -> Self {
        Self { max_level: OnceCell::new() }
    }

    /// Register this logger with the [log] facade. When `debug` is set,
    /// `debug!` and `trace!` records are printed, otherwise only warnings and
    /// errors are.
    pub fn install(&'static self, debug: bool) -> Result<(), SetLoggerError> {
        let level = if debug { LevelFilter::Trace } else { LevelFilter::Warn };
        let _ = self.max_level.set(level);

        log::set_logger(self)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for QuasiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level.get().copied().unwrap_or(LevelFilter::Off)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Custom colour formatting for the log level
        let level_prefix = match record.level() {
            Level::Error => highlight(Colour::Red | Modifier::Bold, "error"),
            Level::Warn => highlight(Colour::Yellow | Modifier::Bold, "warn"),
            Level::Info => highlight(Colour::Blue | Modifier::Bold, "info"),
            Level::Debug => highlight(Colour::Blue | Modifier::Bold, "debug"),
            Level::Trace => highlight(Colour::Magenta | Modifier::Bold, "trace"),
        };

        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{level_prefix}: {}", record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
