//! A `log` backend that writes colored messages to stderr.

use std::io::{self, Write};

use colored::Colorize;
use log::{Level, LevelFilter, Metadata, Record};

/// Writes errors in red, warnings in yellow and everything else with a blue level tag.
#[derive(Debug, Clone, Copy)]
pub struct ColorLogger {
    max_level: LevelFilter,
}

impl ColorLogger {
    /// `quiet` silences everything, `verbose` enables debug and trace output.
    #[must_use]
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let max_level = if quiet {
            LevelFilter::Off
        } else if verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Info
        };
        Self { max_level }
    }

    fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    /// Installs this logger as the global `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if a logger was already installed.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for ColorLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let (tag, message) = match record.level() {
            Level::Error => ("[ERROR]".red().bold(), message.red().bold()),
            Level::Warn => ("[WARN]".yellow().bold(), message.yellow().bold()),
            level => (format!("[{level}]").blue(), message.normal()),
        };
        eprintln!("{tag} {message}");
        self.flush();
    }

    fn flush(&self) {
        io::stderr().flush().ok();
    }
}
