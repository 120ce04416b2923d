//! Operation counts for convolution (or cross-correlation) filters.

use crate::Error;

/// Logarithm base 2.
#[must_use]
pub fn lg(x: f64) -> f64 {
    x.log2()
}

pub(crate) fn check_kernel_length(kernel_length: u32) -> Result<(), Error> {
    if kernel_length == 0 {
        return Err(Error::ZeroKernelLength);
    }
    Ok(())
}

/// Operations per sample to apply a `kernel_length` tap filter to `channels` channels
/// directly in the time domain.
///
/// # Errors
///
/// - [`Error::ZeroKernelLength`] if `kernel_length` is zero.
///
/// # Examples
///
/// ```
/// # use flopbudget_cost::td_conv_ops;
/// assert_eq!(td_conv_ops(100, 8), Ok(1600.0));
/// ```
pub fn td_conv_ops(kernel_length: u32, channels: u32) -> Result<f64, Error> {
    check_kernel_length(kernel_length)?;

    // One multiply and one add per tap.
    Ok(2. * f64::from(kernel_length) * f64::from(channels))
}

/// Operations per sample to apply a `kernel_length` tap filter to `channels` channels with
/// overlap-save FFT convolution, using blocks `block_len_factor` times as long as the kernel.
///
/// # Errors
///
/// - [`Error::ZeroKernelLength`] if `kernel_length` is zero.
/// - [`Error::InvalidBlockLenFactor`] if `block_len_factor` is not a finite number
///   greater than 1.
pub fn fd_conv_ops(kernel_length: u32, block_len_factor: f64, channels: u32) -> Result<f64, Error> {
    check_kernel_length(kernel_length)?;
    if !(block_len_factor > 1. && block_len_factor.is_finite()) {
        return Err(Error::InvalidBlockLenFactor(block_len_factor));
    }
    let channels = f64::from(channels);

    // One forward FFT shared by all channels, plus one inverse FFT per channel.
    let transforms = 4. * lg(f64::from(kernel_length) * block_len_factor) * (channels + 1.);

    // One complex dot product per channel.
    let products = 2. * channels;

    // `1 / block_len_factor` of every block is reused from the previous one.
    Ok((transforms + products) / (1. - 1. / block_len_factor))
}

/// A way of evaluating a convolution filter.
///
/// The pipeline models are written once against this trait and can then be costed
/// with either realization.
pub trait Convolution {
    /// Operations per sample to apply a `kernel_length` tap filter to `channels` channels.
    ///
    /// # Errors
    ///
    /// Implementations reject kernels and parameters outside their numeric domain.
    fn ops(&self, kernel_length: u32, channels: u32) -> Result<f64, Error>;
}

/// Direct FIR convolution, with the minimum possible latency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeDomain;

impl Convolution for TimeDomain {
    fn ops(&self, kernel_length: u32, channels: u32) -> Result<f64, Error> {
        td_conv_ops(kernel_length, channels)
    }
}

/// Overlap-save FFT convolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyDomain {
    /// Ratio of the FFT block length to the kernel length. Must be greater than 1.
    pub block_len_factor: f64,
}

/// Block length factor used when none is given.
pub const DEFAULT_BLOCK_LEN_FACTOR: f64 = 2.;

impl Default for FrequencyDomain {
    fn default() -> Self {
        Self {
            block_len_factor: DEFAULT_BLOCK_LEN_FACTOR,
        }
    }
}

impl Convolution for FrequencyDomain {
    fn ops(&self, kernel_length: u32, channels: u32) -> Result<f64, Error> {
        fd_conv_ops(kernel_length, self.block_len_factor, channels)
    }
}
