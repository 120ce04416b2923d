//! Floating point operation budgets for time-sliced, rank-reduced matched filter banks.
//!
//! This crate estimates how many operations per output sample it takes to run a bank
//! of matched filters in the style of LLOID, where each template is split into time
//! slices filtered at the lowest sufficient rate against a reduced set of SVD basis
//! channels. The same bank can be costed as:
//!
//! - a conventional FIR or FFT filter ([`td_conv_ops`], [`fd_conv_ops`]),
//! - a multirate filter with no rank reduction ([`time_sliced_conv_ops`]),
//! - a flat LLOID pipeline ([`lloid_ops`]),
//! - a cascaded LLOID pipeline ([`cascade_ops`]).
//!
//! The pipeline models are generic over [`Convolution`], so each can be evaluated with
//! time-domain ([`TimeDomain`]) or frequency-domain ([`FrequencyDomain`]) filtering.
//!
//! Nothing here filters any data; every function is a pure function of the bank's shape.

mod bank;
mod cascade;
mod conv;
mod error;
mod lloid;
mod resample;
mod time_sliced;

pub use bank::{Extent, TemplateBank, TimeSlice};
pub use cascade::{Topology, cascade_ops};
pub use conv::{
    Convolution, DEFAULT_BLOCK_LEN_FACTOR, FrequencyDomain, TimeDomain, fd_conv_ops, lg,
    td_conv_ops,
};
pub use error::Error;
pub use lloid::{
    CASCADE_RESAMPLE_KERNEL_LENGTH, DEFAULT_RECONSTRUCTION_DUTY_CYCLE, LloidOptions, lloid_ops,
};
pub use resample::resample_ops;
pub use time_sliced::{DEFAULT_RESAMPLE_KERNEL_LENGTH, time_sliced_conv_ops};
