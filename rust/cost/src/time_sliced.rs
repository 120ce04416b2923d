use crate::{Convolution, Error, TemplateBank, resample_ops};

/// Resampling filter length used by the flat (non-cascaded) models.
pub const DEFAULT_RESAMPLE_KERNEL_LENGTH: u32 = 192;

/// Operations per output sample to apply a multirate convolution filter to `channels`
/// channels, where each slice of `bank` is filtered at its own rate.
///
/// Every slice is decimated from the bank's maximum rate, convolved, interpolated back
/// with a `resample_kernel_length` tap filter, and accumulated into the output. The
/// slice's own channel count is ignored; every slice carries `channels` channels.
///
/// # Errors
///
/// - [`Error::ZeroKernelLength`] if `resample_kernel_length` is zero.
/// - Any error the convolution realization reports for a slice's kernel.
pub fn time_sliced_conv_ops<C: Convolution>(
    conv: &C,
    bank: &TemplateBank,
    resample_kernel_length: u32,
    channels: u32,
) -> Result<f64, Error> {
    let max_rate = bank.max_rate();
    bank.slices()
        .iter()
        .map(|slice| -> Result<f64, Error> {
            let rate = slice.rate();
            let decimate = resample_ops(resample_kernel_length, max_rate, rate, channels)?;
            let filter = conv.ops(slice.kernel_length(), channels)? * bank.relative_rate(slice);
            let interpolate = resample_ops(resample_kernel_length, rate, max_rate, channels)?;
            Ok(decimate + filter + interpolate + f64::from(channels))
        })
        .sum()
}
