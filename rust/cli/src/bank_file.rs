//! JSON bank descriptions.
//!
//! ```json
//! {
//!   "reconstruction_dim": 4,
//!   "slices": [
//!     { "rate": 4096, "start": 0.0, "end": 0.5, "channel_count": 12 },
//!     { "rate": 512, "start": 0.5, "end": 4.5, "channel_count": 8, "kernel_length": 2048 }
//!   ]
//! }
//! ```
//!
//! `kernel_length` defaults to the number of samples the slice spans at its rate.

use std::fs;
use std::path::Path;

use flopbudget_cost::{Extent, TemplateBank, TimeSlice};
use log::debug;
use serde::Deserialize;

use crate::Error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BankFile {
    reconstruction_dim: u32,
    slices: Vec<SliceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SliceEntry {
    rate: f64,
    start: f64,
    end: f64,
    channel_count: u32,
    #[serde(default)]
    kernel_length: Option<u32>,
}

impl SliceEntry {
    fn to_slice(&self) -> Result<TimeSlice, flopbudget_cost::Error> {
        let extent = Extent {
            start: self.start,
            end: self.end,
        };
        match self.kernel_length {
            Some(kernel_length) => {
                TimeSlice::new(self.rate, self.channel_count, kernel_length, Some(extent))
            }
            None => TimeSlice::spanning(self.rate, extent, self.channel_count),
        }
    }
}

/// Parses a bank description.
///
/// # Errors
///
/// - [`Error::Parse`] if `json` is not a bank description.
/// - [`Error::Bank`] if the description is not a valid bank.
pub fn parse_bank(json: &str) -> Result<TemplateBank, Error> {
    let file: BankFile = serde_json::from_str(json)?;
    let slices = file
        .slices
        .iter()
        .map(SliceEntry::to_slice)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TemplateBank::new(slices, file.reconstruction_dim)?)
}

/// Reads and parses the bank description at `path`.
///
/// # Errors
///
/// - [`Error::Read`] if the file can't be read.
/// - Any error from [`parse_bank`].
pub fn read_bank(path: &Path) -> Result<TemplateBank, Error> {
    let json = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    let bank = parse_bank(&json)?;
    debug!(
        "Read {} time slices from {}, reconstruction dimension {}",
        bank.slices().len(),
        path.display(),
        bank.reconstruction_dim()
    );
    Ok(bank)
}
