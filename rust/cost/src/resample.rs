use crate::{Error, conv::td_conv_ops};

pub(crate) fn check_rate(rate: f64) -> Result<(), Error> {
    if !(rate > 0. && rate.is_finite()) {
        return Err(Error::InvalidRate(rate));
    }
    Ok(())
}

/// Operations per sample to change the sample rate of `channels` channels from `rate_in`
/// to `rate_out` with an FIR interpolation or decimation filter of `kernel_length` taps.
///
/// Converting to the same rate is free.
///
/// # Errors
///
/// - [`Error::InvalidRate`] if either rate is not positive and finite.
/// - [`Error::ZeroKernelLength`] if `kernel_length` is zero.
///
/// # Examples
///
/// ```
/// # use flopbudget_cost::{resample_ops, td_conv_ops};
/// assert_eq!(resample_ops(64, 4096., 4096., 1), Ok(0.0));
/// assert_eq!(
///     resample_ops(64, 4096., 512., 1),
///     Ok(td_conv_ops(64, 1).unwrap() * (512. / 4096.))
/// );
/// ```
#[allow(clippy::float_cmp)]
pub fn resample_ops(
    kernel_length: u32,
    rate_in: f64,
    rate_out: f64,
    channels: u32,
) -> Result<f64, Error> {
    check_rate(rate_in)?;
    check_rate(rate_out)?;
    let ops = td_conv_ops(kernel_length, channels)?;
    if rate_in == rate_out {
        return Ok(0.);
    }

    // Either the filter runs at the lower output rate (decimation) or all but
    // min/max of its input samples are stuffed zeros (interpolation).
    Ok(ops * (rate_in.min(rate_out) / rate_in.max(rate_out)))
}

#[cfg(test)]
mod tests;
