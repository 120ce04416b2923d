//! Loading, comparison and rendering for the `flopbudget` command line tool.
//!
//! The cost models themselves live in [`flopbudget_cost`]; this crate reads a bank
//! description from disk, evaluates every filtering method against it, and renders the
//! result as a table.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{ExitCode, Termination};

use log::error;

pub mod bank_file;
pub mod logger;
pub mod report;

pub use logger::ColorLogger;

/// Everything that can stop the tool from printing a report.
#[derive(Debug)]
pub enum Error {
    /// The bank description could not be read.
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The bank description was not valid JSON or was missing fields.
    Parse(serde_json::Error),

    /// The bank or the model settings were rejected by the cost models.
    Bank(flopbudget_cost::Error),

    /// Latencies can only be computed for banks whose slices all have an extent.
    MissingExtent,

    /// The report could not be written to standard output.
    Write(io::Error),

    /// Another logger was already installed.
    Logger(log::SetLoggerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read { path, source } => {
                write!(f, "could not read {}: {source}", path.display())
            }
            Error::Parse(err) => write!(f, "malformed bank description: {err}"),
            Error::Bank(err) => write!(f, "invalid bank: {err}"),
            Error::MissingExtent => write!(f, "every time slice needs a start and an end"),
            Error::Write(err) => write!(f, "could not write report: {err}"),
            Error::Logger(err) => write!(f, "could not install logger: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { source, .. } | Error::Write(source) => Some(source),
            Error::Parse(err) => Some(err),
            Error::Bank(err) => Some(err),
            Error::Logger(err) => Some(err),
            Error::MissingExtent => None,
        }
    }
}

impl From<flopbudget_cost::Error> for Error {
    fn from(err: flopbudget_cost::Error) -> Self {
        Error::Bank(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Error::Logger(err)
    }
}

/// Logs the error of a failed run and turns it into a failing exit code.
pub struct TermResult(pub Result<(), Error>);

impl Termination for TermResult {
    fn report(self) -> ExitCode {
        match self.0 {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("{err}");
                ExitCode::FAILURE
            }
        }
    }
}
